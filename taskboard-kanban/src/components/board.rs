//! KanbanBoard: the root unit and sole owner of the board state

use super::column::{ColumnEvent, KanbanColumn, KanbanColumnProps};
use crate::board::InitBoard;
use crate::context::KanbanContext;
use crate::drag::DragSession;
use crate::error::{KanbanError, Result};
use crate::processor::KanbanOperationProcessor;
use crate::task::{AddTask, DeleteTask, MoveTask, UpdateTask};
use crate::types::{
    Board, BoardEvent, Column, ColumnId, DragEndEvent, DragStartEvent, Position, Task, TaskId,
    UpdateTaskPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{Execute, LogEntry, Operation, OperationProcessor};
use tokio::sync::broadcast;

pub const DEFAULT_BOARD_TITLE: &str = "Kanban Board";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoardProps {
    /// Seed columns; an empty board when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_data: Option<Vec<Column>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl KanbanBoardProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_data(mut self, columns: Vec<Column>) -> Self {
        self.initial_data = Some(columns);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The mounted board.
///
/// Owns the context (board, activity, event channel), the processor that
/// applies changes, and the drag session. Columns and cards are rebuilt from
/// the current board on demand.
pub struct KanbanBoard {
    ctx: KanbanContext,
    processor: KanbanOperationProcessor,
    drag: DragSession,
}

impl KanbanBoard {
    /// Build the board from its props
    pub async fn mount(props: KanbanBoardProps) -> Result<Self> {
        Self::mount_with(props, KanbanOperationProcessor::new()).await
    }

    /// Build the board, attributing every change to the processor's actor
    pub async fn mount_with(
        props: KanbanBoardProps,
        processor: KanbanOperationProcessor,
    ) -> Result<Self> {
        let ctx = KanbanContext::new();
        let title = props
            .title
            .unwrap_or_else(|| DEFAULT_BOARD_TITLE.to_string());
        let mut init = InitBoard::new(title);
        if let Some(columns) = props.initial_data {
            init = init.with_columns(columns);
        }
        processor.process(&init, &ctx).await?;

        Ok(Self {
            ctx,
            processor,
            drag: DragSession::new(),
        })
    }

    pub fn context(&self) -> &KanbanContext {
        &self.ctx
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.ctx.subscribe()
    }

    pub async fn snapshot(&self) -> Result<Board> {
        self.ctx.read_board().await
    }

    pub async fn activity(&self, limit: Option<usize>) -> Vec<LogEntry> {
        self.ctx.read_activity(limit).await
    }

    /// Column units for the current board, in order
    pub async fn columns(&self) -> Result<Vec<KanbanColumn>> {
        let board = self.snapshot().await?;
        Ok(board
            .columns
            .into_iter()
            .enumerate()
            .map(|(index, column)| {
                KanbanColumn::new(KanbanColumnProps {
                    column,
                    index: Some(index),
                })
            })
            .collect())
    }

    pub async fn column(&self, id: &ColumnId) -> Result<KanbanColumn> {
        self.columns()
            .await?
            .into_iter()
            .find(|column| column.id() == id)
            .ok_or_else(|| KanbanError::ColumnNotFound { id: id.to_string() })
    }

    /// Run any command against the board through the processor
    pub async fn apply<O>(&self, operation: &O) -> Result<Value>
    where
        O: Execute<KanbanContext, KanbanError> + Operation + Send + Sync,
    {
        self.processor.process(operation, &self.ctx).await
    }

    // =========================================================================
    // Column events
    // =========================================================================

    /// Apply an event reported by one of the columns.
    ///
    /// Returns the command result for events that change the board, `None`
    /// for a drag start and for drops that leave the board as it was.
    pub async fn handle(&mut self, event: ColumnEvent) -> Result<Option<Value>> {
        match event {
            ColumnEvent::TaskDelete { task_id } => self.remove_task(&task_id).await.map(Some),
            ColumnEvent::TaskEdit { task } => {
                self.apply(&UpdateTask::from_edit(&task)).await.map(Some)
            }
            ColumnEvent::TaskDragStart { task_id, column_id } => {
                self.drag.start(DragStartEvent {
                    task_id,
                    source_column_id: column_id,
                });
                Ok(None)
            }
            ColumnEvent::TaskDrop {
                task_id,
                target_column_id,
                index,
            } => {
                match self.drop_task(&task_id, target_column_id, index).await? {
                    Some(end) => Ok(Some(serde_json::to_value(end)?)),
                    None => Ok(None),
                }
            }
        }
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }

    /// The pointer entered a column while dragging
    pub fn drag_over(&mut self, column: impl Into<ColumnId>) {
        self.drag.hover(column);
    }

    /// The pointer left every column
    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Released outside any column. The board is not touched.
    pub fn cancel_drag(&mut self) -> Option<DragStartEvent> {
        self.drag.cancel()
    }

    /// Finish a drag by moving the task.
    ///
    /// Appends to the target column unless `index` is given. A rejected move
    /// (unknown task or column) leaves the board unchanged and ends the
    /// gesture. Dropping onto the task's own column without an index is a
    /// no-op and returns `None`.
    pub async fn drop_task(
        &mut self,
        task_id: &TaskId,
        target: ColumnId,
        index: Option<usize>,
    ) -> Result<Option<DragEndEvent>> {
        self.drag.drop_on(task_id, target.clone());

        let result = self
            .apply(&MoveTask::new(task_id, Position::new(target.clone(), index)))
            .await?;
        if result["moved"] != Value::Bool(true) {
            return Ok(None);
        }

        let source: ColumnId = serde_json::from_value(result["from"]["column"].clone())?;
        Ok(Some(DragEndEvent {
            task_id: task_id.clone(),
            source_column_id: source,
            target_column_id: target,
        }))
    }

    // =========================================================================
    // Task helpers
    // =========================================================================

    /// Add a task and return it as stored
    pub async fn add_task(&self, command: AddTask) -> Result<Task> {
        let result = self.apply(&command).await?;
        let id: TaskId = serde_json::from_value(result["id"].clone())?;
        self.snapshot()
            .await?
            .find_task(&id)
            .cloned()
            .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })
    }

    pub async fn remove_task(&self, task_id: &TaskId) -> Result<Value> {
        self.apply(&DeleteTask::new(task_id)).await
    }

    /// Apply a `{taskId, key, value}` update
    pub async fn update_task(&self, payload: UpdateTaskPayload) -> Result<Value> {
        let command = UpdateTask::from_payload(payload)?;
        self.apply(&command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::CardEvent;
    use crate::types::{DragEvent, DropPayload, TaskStatus};
    use serde_json::json;

    fn seed() -> Vec<Column> {
        vec![
            Column::new("todo", "To Do")
                .with_tasks([Task::new("A", TaskStatus::Todo).with_id(1)])
                .unwrap(),
            Column::new("done", "Done"),
        ]
    }

    #[tokio::test]
    async fn test_mount_without_seed_is_empty() {
        let board = KanbanBoard::mount(KanbanBoardProps::new()).await.unwrap();
        let snapshot = board.snapshot().await.unwrap();
        assert_eq!(snapshot.title, DEFAULT_BOARD_TITLE);
        assert!(snapshot.columns.is_empty());
    }

    #[tokio::test]
    async fn test_card_to_board_drag_and_drop() {
        let mut board = KanbanBoard::mount(KanbanBoardProps::new().with_initial_data(seed()))
            .await
            .unwrap();
        let mut rx = board.subscribe();

        let todo = board.column(&"todo".into()).await.unwrap();
        let card = todo.card(&TaskId::from(1)).unwrap();
        let CardEvent::DragStart(start) = card.drag_start(DragEvent::new(10.0, 10.0)) else {
            unreachable!();
        };
        let lifted = todo.forward(CardEvent::DragStart(start.clone()));
        assert_eq!(board.handle(lifted).await.unwrap(), None);
        assert!(board.drag_session().is_dragging());

        board.drag_over("done");
        let done = board.column(&"done".into()).await.unwrap();
        let dropped = done.drop(DropPayload::new(start.event, "done")).unwrap();
        let end = board.handle(dropped).await.unwrap().unwrap();
        assert_eq!(
            end,
            json!({"taskId": 1, "sourceColumnId": "todo", "targetColumnId": "done"})
        );
        assert!(!board.drag_session().is_dragging());

        let snapshot = board.snapshot().await.unwrap();
        let todo = snapshot.find_column(&"todo".into()).unwrap();
        let done = snapshot.find_column(&"done".into()).unwrap();
        assert!(todo.tasks.is_empty());
        let task = done.tasks.get(&TaskId::from(1)).unwrap();
        assert_eq!(task.content, "A");
        assert_eq!(task.status, TaskStatus::Done);

        assert!(matches!(rx.try_recv().unwrap(), BoardEvent::TaskMoved { .. }));
    }

    #[tokio::test]
    async fn test_cancelled_drag_changes_nothing() {
        let mut board = KanbanBoard::mount(KanbanBoardProps::new().with_initial_data(seed()))
            .await
            .unwrap();
        let before = serde_json::to_value(board.snapshot().await.unwrap()).unwrap();

        board
            .handle(ColumnEvent::TaskDragStart {
                task_id: TaskId::from(1),
                column_id: "todo".into(),
            })
            .await
            .unwrap();
        assert!(board.cancel_drag().is_some());

        let after = serde_json::to_value(board.snapshot().await.unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_drop_on_unknown_column_is_rejected() {
        let mut board = KanbanBoard::mount(KanbanBoardProps::new().with_initial_data(seed()))
            .await
            .unwrap();
        let before = serde_json::to_value(board.snapshot().await.unwrap()).unwrap();

        let result = board
            .drop_task(&TaskId::from(1), "nowhere".into(), None)
            .await;
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));

        let after = serde_json::to_value(board.snapshot().await.unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_delete_and_edit_from_cards() {
        let mut board = KanbanBoard::mount(KanbanBoardProps::new().with_initial_data(seed()))
            .await
            .unwrap();
        let todo = board.column(&"todo".into()).await.unwrap();
        let card = todo.card(&TaskId::from(1)).unwrap();

        let edit = todo.forward(card.edit(|task| task.content = "A, revised".into()));
        board.handle(edit).await.unwrap();
        let snapshot = board.snapshot().await.unwrap();
        assert_eq!(snapshot.find_task(&TaskId::from(1)).unwrap().content, "A, revised");

        let mut rx = board.subscribe();
        board.handle(todo.forward(card.delete())).await.unwrap();
        assert_eq!(board.snapshot().await.unwrap().task_count(), 0);
        assert!(matches!(rx.try_recv().unwrap(), BoardEvent::TaskRemoved { .. }));
    }

    #[tokio::test]
    async fn test_changes_are_logged_with_actor() {
        let board = KanbanBoard::mount_with(
            KanbanBoardProps::new().with_initial_data(seed()),
            KanbanOperationProcessor::with_actor("tester"),
        )
        .await
        .unwrap();
        board
            .add_task(AddTask::new("B").with_column("done"))
            .await
            .unwrap();

        let activity = board.activity(None).await;
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].op, "add task");
        assert_eq!(activity[1].op, "init board");
        assert_eq!(activity[0].actor.as_deref(), Some("tester"));
    }
}
