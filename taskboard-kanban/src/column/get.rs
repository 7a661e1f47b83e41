//! GetColumn command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get a column with its tasks
#[operation(verb = "get", noun = "column", description = "Get a column with its tasks")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetColumn {
    /// The column ID
    pub id: ColumnId,
}

impl GetColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let board = ctx.read_board().await?;
            let column = board
                .find_column(&self.id)
                .ok_or_else(|| KanbanError::ColumnNotFound {
                    id: self.id.to_string(),
                })?;
            let mut value = serde_json::to_value(column)?;
            value["order"] = Value::from(board.columns.index_of(&self.id));
            Ok(value)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::test_support::setup;

    #[tokio::test]
    async fn test_get_column() {
        let ctx = setup().await;
        let result = GetColumn::new("doing").execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["title"], "Doing");
        assert_eq!(result["order"], 1);
        assert_eq!(result["tasks"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_column() {
        let ctx = setup().await;
        let result = GetColumn::new("nope").execute(&ctx).await;
        assert!(!result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::ColumnNotFound { .. })
        ));
    }
}
