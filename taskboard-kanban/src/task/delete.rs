//! DeleteTask command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::types::{BoardEvent, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Remove a task from the board
#[operation(verb = "delete", noun = "task", description = "Remove a task from the board")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let removed = board.remove_task(&self.id)?;
                board.touch();
                ctx.emit(BoardEvent::TaskRemoved {
                    task_id: self.id.clone(),
                    column_id: removed.0.column.clone(),
                });
                Ok(removed)
            })
            .await
            .map(|(location, _task)| {
                serde_json::json!({
                    "deleted": true,
                    "id": self.id,
                    "column": location.column,
                })
            });

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
