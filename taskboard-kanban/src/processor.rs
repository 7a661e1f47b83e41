//! Operation processor that records activity on the context

use crate::context::KanbanContext;
use crate::error::KanbanError;
use serde_json::Value;
use taskboard_operations::{async_trait, Execute, Operation, OperationProcessor};

/// Runs kanban operations and appends their log entries to the context's
/// activity log, stamped with the acting user or agent.
#[derive(Debug, Clone, Default)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    pub fn new() -> Self {
        Self { actor: None }
    }

    /// Attribute every logged operation to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &KanbanContext) -> Result<Value, KanbanError>
    where
        O: Execute<KanbanContext, KanbanError> + Operation + Send + Sync,
    {
        let op = operation.op_string();
        tracing::debug!(op = %op, actor = ?self.actor, "processing operation");

        let (result, log_entry) = operation.execute(ctx).await.split();

        match &result {
            Ok(value) => {
                let affected = operation.affected_resource_ids(value);
                tracing::debug!(op = %op, ?affected, "operation succeeded");
            }
            Err(error) if error.is_rejection() => {
                tracing::warn!(op = %op, %error, "operation rejected");
            }
            Err(error) => {
                tracing::error!(op = %op, %error, "operation failed");
            }
        }

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            ctx.append_activity(entry).await;
        }

        result
    }
}
