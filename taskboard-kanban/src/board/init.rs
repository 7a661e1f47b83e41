//! InitBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{Board, BoardId, Column};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Initialize the board, optionally seeded with columns and their tasks
#[operation(
    verb = "init",
    noun = "board",
    description = "Initialize the board from optional seed columns"
)]
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitBoard {
    /// The board title
    pub title: String,
    /// Board id; generated when absent
    pub id: Option<BoardId>,
    /// Seed columns with their tasks; an empty board when absent
    #[param(alias = "initialData")]
    pub columns: Option<Vec<Column>>,
}

impl InitBoard {
    /// Create a new InitBoard command for an empty board
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: None,
            columns: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<BoardId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Seed with the given columns
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Seed with the stock todo / doing / done columns
    pub fn with_default_columns(self) -> Self {
        self.with_columns(Board::default_columns())
    }

    fn build(&self) -> Result<Board> {
        let mut board = Board::new(&self.title);
        if let Some(id) = &self.id {
            board = board.with_id(id);
        }

        for column in self.columns.iter().flatten() {
            let mut column = column.clone();
            column.infer_status();
            if let Some(status) = column.status {
                let mismatched = column.tasks.iter().filter(|t| t.status != status).count();
                if mismatched > 0 {
                    tracing::warn!(
                        column = %column.id,
                        mismatched,
                        "seed tasks carry a status different from their column"
                    );
                }
            }
            board
                .columns
                .push(column)
                .map_err(|c| KanbanError::duplicate_id("column", c.id.to_string()))?;
        }

        board.validate()?;
        Ok(board)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for InitBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result: Result<Value> = async {
            let board = self.build()?;
            ctx.install_board(board.clone()).await?;
            tracing::info!(
                board = %board.id,
                columns = board.columns.len(),
                tasks = board.task_count(),
                "board initialized"
            );
            Ok(serde_json::to_value(&board)?)
        }
        .await;

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Task, TaskId, TaskStatus};

    #[tokio::test]
    async fn test_init_empty_board() {
        let ctx = KanbanContext::new();
        let result = InitBoard::new("Test Board")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["title"], "Test Board");
        assert_eq!(result["columns"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_init_default_columns() {
        let ctx = KanbanContext::new();
        let result = InitBoard::new("Test")
            .with_default_columns()
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["columns"].as_array().unwrap().len(), 3);
        assert_eq!(result["columns"][1]["status"], "doing");
    }

    #[tokio::test]
    async fn test_init_board_already_exists() {
        let ctx = KanbanContext::new();
        let cmd = InitBoard::new("Test");
        cmd.execute(&ctx).await.into_result().unwrap();

        let result = cmd.execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::AlreadyInitialized { .. })));
    }

    #[tokio::test]
    async fn test_init_infers_status_from_column_id() {
        let ctx = KanbanContext::new();
        InitBoard::new("Seeded")
            .with_columns(vec![Column::new("done", "Done"), Column::new("later", "Later")])
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let board = ctx.read_board().await.unwrap();
        let columns: Vec<_> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(columns, [Some(TaskStatus::Done), None]);
    }

    #[tokio::test]
    async fn test_init_rejects_task_in_two_columns() {
        let ctx = KanbanContext::new();
        let task = Task::new("A", TaskStatus::Todo).with_id(1);
        let result = InitBoard::new("Broken")
            .with_columns(vec![
                Column::new("todo", "To Do").with_tasks([task.clone()]).unwrap(),
                Column::new("done", "Done").with_tasks([task]).unwrap(),
            ])
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::DuplicateId { .. })));
        assert!(!ctx.is_initialized().await);
    }

    #[tokio::test]
    async fn test_init_rejects_duplicate_columns() {
        let ctx = KanbanContext::new();
        let result = InitBoard::new("Broken")
            .with_columns(vec![Column::new("todo", "A"), Column::new("todo", "B")])
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::DuplicateId { .. })));
    }

    #[tokio::test]
    async fn test_seed_ids_are_kept() {
        let ctx = KanbanContext::new();
        InitBoard::new("Seeded")
            .with_id("b1")
            .with_columns(vec![Column::new("todo", "To Do")
                .with_tasks([Task::new("A", TaskStatus::Todo).with_id(1)])
                .unwrap()])
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let board = ctx.read_board().await.unwrap();
        assert_eq!(board.id.as_str(), "b1");
        assert!(board.find_task(&TaskId::from(1)).is_some());
    }

    #[test]
    fn test_operation_metadata() {
        let op = InitBoard::new("test");

        assert_eq!(op.verb(), "init");
        assert_eq!(op.noun(), "board");
        assert_eq!(op.op_string(), "init board");

        let params = op.parameters();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].name, "title");
        assert!(params[0].required);
        assert_eq!(params[2].name, "columns");
        assert!(!params[2].required);
        assert!(params[2].matches("initialData"));
    }
}
