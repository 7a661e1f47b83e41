//! MoveTask command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::types::{BoardEvent, ColumnId, Position, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Move a task to a new position
#[operation(
    verb = "move",
    noun = "task",
    description = "Move a task to a different column or position"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// The new position (column, optional index)
    #[param(kind = "object")]
    pub position: Position,
}

impl MoveTask {
    /// Create a new MoveTask command with full position
    pub fn new(id: impl Into<TaskId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    /// Create a MoveTask command to move to a column (at the end)
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self::new(id, Position::in_column(column))
    }

    /// Create a MoveTask command to a given index within a column
    pub fn to_index(id: impl Into<TaskId>, column: impl Into<ColumnId>, index: usize) -> Self {
        Self::new(id, Position::at(column, index))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let moved = board.move_task(&self.id, &self.position)?;
                if !moved.is_noop() {
                    board.touch();
                    ctx.emit(BoardEvent::TaskMoved {
                        task_id: self.id.clone(),
                        from_column_id: moved.from.column.clone(),
                        to_column_id: moved.to.column.clone(),
                    });
                }
                Ok(moved)
            })
            .await;

        let result = result.and_then(|moved| {
            if moved.is_noop() {
                tracing::debug!(task = %self.id, column = %moved.from.column, "drop on own column, nothing to do");
            } else {
                tracing::info!(
                    task = %self.id,
                    from = %moved.from.column,
                    to = %moved.to.column,
                    index = moved.to.index,
                    "task moved"
                );
            }
            Ok(json!({
                "task": serde_json::to_value(&moved.task)?,
                "from": { "column": moved.from.column, "index": moved.from.index },
                "to": { "column": moved.to.column, "index": moved.to.index },
                "moved": !moved.is_noop(),
            }))
        });

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::test_support::setup;
    use crate::task::AddTask;
    use crate::types::TaskStatus;

    async fn setup_with_tasks() -> KanbanContext {
        let ctx = setup().await;
        for (id, content) in [(1u64, "A"), (2, "B"), (3, "C")] {
            AddTask::new(content)
                .with_id(id)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        ctx
    }

    #[tokio::test]
    async fn test_move_task_to_column() {
        let ctx = setup_with_tasks().await;
        let mut rx = ctx.subscribe();

        let result = MoveTask::to_column(1, "done")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["from"]["column"], "todo");
        assert_eq!(result["to"]["column"], "done");
        assert_eq!(result["task"]["status"], "done");

        let board = ctx.read_board().await.unwrap();
        assert_eq!(board.task_count(), 3);
        let todo = board.find_column(&"todo".into()).unwrap();
        assert!(!todo.tasks.contains(&TaskId::from(1)));
        let done = board.find_column(&"done".into()).unwrap();
        assert_eq!(done.tasks.get(&TaskId::from(1)).unwrap().status, TaskStatus::Done);

        assert_eq!(
            rx.try_recv().unwrap(),
            BoardEvent::TaskMoved {
                task_id: TaskId::from(1),
                from_column_id: "todo".into(),
                to_column_id: "done".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_reorder_within_column() {
        let ctx = setup_with_tasks().await;
        let mut rx = ctx.subscribe();

        MoveTask::to_index(3, "todo", 0)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let board = ctx.read_board().await.unwrap();
        let order: Vec<_> = board
            .find_column(&"todo".into())
            .unwrap()
            .tasks
            .keys()
            .cloned()
            .collect();
        assert_eq!(order, vec![TaskId::from(3), TaskId::from(1), TaskId::from(2)]);
        assert!(matches!(rx.try_recv().unwrap(), BoardEvent::TaskMoved { .. }));
    }

    #[tokio::test]
    async fn test_drop_on_own_column_is_noop() {
        let ctx = setup_with_tasks().await;
        let before = serde_json::to_value(ctx.read_board().await.unwrap()).unwrap();
        let mut rx = ctx.subscribe();

        let result = MoveTask::to_column(2, "todo")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["moved"], false);

        let after = serde_json::to_value(ctx.read_board().await.unwrap()).unwrap();
        assert_eq!(before, after);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_move_to_unknown_column_changes_nothing() {
        let ctx = setup_with_tasks().await;
        let before = serde_json::to_value(ctx.read_board().await.unwrap()).unwrap();
        let mut rx = ctx.subscribe();

        let result = MoveTask::to_column(1, "archive")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));

        let after = serde_json::to_value(ctx.read_board().await.unwrap()).unwrap();
        assert_eq!(before, after);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_move_unknown_task() {
        let ctx = setup_with_tasks().await;
        let result = MoveTask::to_column(42, "done").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::TaskNotFound { .. })));
    }

    #[tokio::test]
    async fn test_index_hint_is_clamped() {
        let ctx = setup_with_tasks().await;
        let result = MoveTask::to_index(1, "doing", 99)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["to"]["index"], 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_moves_emit_in_apply_order() {
        let ctx = std::sync::Arc::new(setup_with_tasks().await);
        let mut rx = ctx.subscribe();

        let handles: Vec<_> = (0..32)
            .map(|n| {
                let ctx = ctx.clone();
                let target = ["todo", "doing", "done"][n % 3];
                tokio::spawn(async move {
                    MoveTask::to_column(1, target).execute(&*ctx).await.into_result()
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut at = ColumnId::from("todo");
        while let Ok(event) = rx.try_recv() {
            let BoardEvent::TaskMoved {
                from_column_id,
                to_column_id,
                ..
            } = event
            else {
                panic!("only moves were emitted");
            };
            assert_eq!(from_column_id, at);
            at = to_column_id;
        }
        let board = ctx.read_board().await.unwrap();
        assert_eq!(board.locate_task(&TaskId::from(1)).unwrap().column, at);
    }
}
