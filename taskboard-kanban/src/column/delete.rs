//! DeleteColumn command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Delete a column (fails if it has tasks)
#[operation(verb = "delete", noun = "column", description = "Delete an empty column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let column = board
                    .find_column(&self.id)
                    .ok_or_else(|| KanbanError::ColumnNotFound {
                        id: self.id.to_string(),
                    })?;

                if !column.tasks.is_empty() {
                    return Err(KanbanError::ColumnNotEmpty {
                        id: self.id.to_string(),
                        count: column.tasks.len(),
                    });
                }

                board.columns.remove(&self.id);
                board.touch();
                Ok(serde_json::json!({
                    "deleted": true,
                    "id": self.id.to_string()
                }))
            })
            .await;

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }
}
