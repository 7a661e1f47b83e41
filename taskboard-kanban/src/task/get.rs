//! GetTask command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get a task by ID together with its location
#[operation(
    verb = "get",
    noun = "task",
    description = "Retrieve a task by ID with its column and index"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetTask {
    /// The task ID to retrieve
    pub id: TaskId,
}

impl GetTask {
    /// Create a new GetTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let board = ctx.read_board().await?;
            let not_found = || KanbanError::TaskNotFound {
                id: self.id.to_string(),
            };
            let location = board.locate_task(&self.id).ok_or_else(not_found)?;
            let task = board.find_task(&self.id).ok_or_else(not_found)?;

            let mut result = serde_json::to_value(task)?;
            result["column"] = serde_json::to_value(&location.column)?;
            result["index"] = Value::from(location.index);
            Ok(result)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::test_support::setup;
    use crate::task::AddTask;

    #[tokio::test]
    async fn test_get_task() {
        let ctx = setup().await;
        AddTask::new("A").with_id("t1").execute(&ctx).await.into_result().unwrap();
        AddTask::new("B").with_id("t2").execute(&ctx).await.into_result().unwrap();

        let result = GetTask::new("t2").execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["content"], "B");
        assert_eq!(result["column"], "todo");
        assert_eq!(result["index"], 1);
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let ctx = setup().await;
        let result = GetTask::new("nope").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::TaskNotFound { .. })));
    }
}
