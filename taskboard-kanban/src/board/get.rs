//! GetBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get the board with its columns and tasks
#[operation(
    verb = "get",
    noun = "board",
    description = "Get the board with its columns and tasks"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetBoard;

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let board = ctx.read_board().await?;
            let mut value = serde_json::to_value(&board)?;
            value["taskCount"] = Value::from(board.task_count());
            Ok(value)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;

    #[tokio::test]
    async fn test_get_board() {
        let ctx = KanbanContext::new();
        InitBoard::new("Test")
            .with_default_columns()
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = GetBoard.execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["title"], "Test");
        assert_eq!(result["taskCount"], 0);
    }

    #[tokio::test]
    async fn test_get_board_uninitialized() {
        let ctx = KanbanContext::new();
        let result = GetBoard.execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::NotInitialized)));
    }
}
