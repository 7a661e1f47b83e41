//! UpdateBoard command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Update board metadata
#[operation(verb = "update", noun = "board", description = "Rename the board")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateBoard {
    /// New title
    pub title: Option<String>,
}

impl UpdateBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                if let Some(title) = &self.title {
                    board.title = title.clone();
                    board.touch();
                }
                Ok(serde_json::json!({
                    "id": board.id,
                    "title": board.title,
                    "updatedAt": board.updated_at,
                }))
            })
            .await;

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }
}
