//! Board-level types: Board, Column, and the board algebra.
//!
//! Everything here is synchronous and pure. Commands in `crate::task` and
//! `crate::column` take the board lock, call into these methods and emit
//! events; the methods themselves validate before they mutate so a rejected
//! call leaves the board untouched.

use super::ids::{BoardId, ColumnId, TaskId};
use super::ordered::{Keyed, Ordered};
use super::position::Position;
use super::task::{Task, TaskStatus};
use crate::error::{KanbanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub columns: Ordered<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A workflow stage holding an ordered list of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Status given to tasks that land in this column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub tasks: Ordered<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Keyed for Column {
    type Key = ColumnId;

    fn key(&self) -> &ColumnId {
        &self.id
    }
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: None,
            tasks: Ordered::new(),
            color: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Append tasks in order. Fails on the first id already in the column.
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Result<Self> {
        for task in tasks {
            self.tasks
                .push(task)
                .map_err(|t| KanbanError::duplicate_id("task", t.id.to_string()))?;
        }
        Ok(self)
    }

    /// Fill in `status` from the id when the id names a status
    pub fn infer_status(&mut self) {
        if self.status.is_none() {
            self.status = self.id.as_str().parse().ok();
        }
    }
}

/// Where a task currently sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskLocation {
    pub column: ColumnId,
    pub index: usize,
}

/// Outcome of a successful move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMove {
    pub task: Task,
    pub from: TaskLocation,
    pub to: TaskLocation,
}

impl TaskMove {
    pub fn changed_column(&self) -> bool {
        self.from.column != self.to.column
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

impl Board {
    /// Create an empty board
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            title: title.into(),
            columns: Ordered::new(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn with_id(mut self, id: impl Into<BoardId>) -> Self {
        self.id = id.into();
        self
    }

    /// The stock todo / doing / done columns
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new("todo", "To Do").with_status(TaskStatus::Todo),
            Column::new("doing", "Doing").with_status(TaskStatus::Doing),
            Column::new("done", "Done").with_status(TaskStatus::Done),
        ]
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.get_mut(id)
    }

    pub fn first_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    /// First column (in board order) whose status mapping is `status`
    pub fn column_for_status(&self, status: TaskStatus) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == Some(status))
    }

    pub fn locate_task(&self, id: &TaskId) -> Option<TaskLocation> {
        self.columns.iter().find_map(|column| {
            column.tasks.index_of(id).map(|index| TaskLocation {
                column: column.id.clone(),
                index,
            })
        })
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.columns.iter().find_map(|c| c.tasks.get(id))
    }

    pub fn find_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.columns.iter_mut().find_map(|c| c.tasks.get_mut(id))
    }

    /// Resolve user-facing text to a task id by its display form
    pub fn resolve_task_id(&self, text: &str) -> Option<TaskId> {
        self.tasks().find(|t| t.id.to_string() == text).map(|t| t.id.clone())
    }

    /// All tasks in board order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Check that no task id appears in more than one column
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for task in self.tasks() {
            if !seen.insert(&task.id) {
                return Err(KanbanError::duplicate_id("task", task.id.to_string()));
            }
        }
        Ok(())
    }

    /// Add a task at `position`. Fails if the column is unknown or the id is
    /// already on the board.
    pub fn insert_task(&mut self, mut task: Task, position: &Position) -> Result<TaskLocation> {
        if self.find_task(&task.id).is_some() {
            return Err(KanbanError::duplicate_id("task", task.id.to_string()));
        }
        let column = self
            .columns
            .get_mut(&position.column)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: position.column.to_string(),
            })?;
        if let Some(status) = column.status {
            task.status = status;
        }
        let index = position.resolve(column.tasks.len());
        let index = column
            .tasks
            .insert_at(index, task)
            .map_err(|t| KanbanError::duplicate_id("task", t.id.to_string()))?;
        Ok(TaskLocation {
            column: position.column.clone(),
            index,
        })
    }

    /// Remove a task wherever it is
    pub fn remove_task(&mut self, id: &TaskId) -> Result<(TaskLocation, Task)> {
        let location = self
            .locate_task(id)
            .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
        let (_, task) = self
            .columns
            .get_mut(&location.column)
            .and_then(|c| c.tasks.remove(id))
            .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
        Ok((location, task))
    }

    /// Move a task to `position`.
    ///
    /// Unknown task or destination column fails before anything changes.
    /// Across columns the task is removed from its column, inserted in the
    /// destination, takes the destination's status (if it maps one) and is
    /// touched. Within a column an index reorders; no index is a no-op.
    pub fn move_task(&mut self, id: &TaskId, position: &Position) -> Result<TaskMove> {
        let from = self
            .locate_task(id)
            .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
        let target_status = self
            .find_column(&position.column)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: position.column.to_string(),
            })?
            .status;

        if from.column == position.column {
            let column = self
                .columns
                .get_mut(&from.column)
                .ok_or_else(|| KanbanError::ColumnNotFound {
                    id: from.column.to_string(),
                })?;
            let index = match position.index {
                Some(index) => column.tasks.move_to(id, index).unwrap_or(from.index),
                None => from.index,
            };
            let task = column
                .tasks
                .get_mut(id)
                .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
            if index != from.index {
                task.touch();
            }
            let to = TaskLocation {
                column: from.column.clone(),
                index,
            };
            return Ok(TaskMove {
                task: task.clone(),
                from,
                to,
            });
        }

        let (_, mut task) = self
            .columns
            .get_mut(&from.column)
            .and_then(|c| c.tasks.remove(id))
            .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
        if let Some(status) = target_status {
            task.status = status;
        }
        task.touch();
        let moved = task.clone();

        let column = self
            .columns
            .get_mut(&position.column)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: position.column.to_string(),
            })?;
        let index = position.resolve(column.tasks.len());
        let index = column
            .tasks
            .insert_at(index, task)
            .map_err(|t| KanbanError::duplicate_id("task", t.id.to_string()))?;

        Ok(TaskMove {
            task: moved,
            from,
            to: TaskLocation {
                column: position.column.clone(),
                index,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, content: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::from(id),
            content: content.into(),
            status,
            priority: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_board() -> Board {
        let mut board = Board::new("Test");
        for mut column in Board::default_columns() {
            if column.id.as_str() == "todo" {
                column = column
                    .with_tasks([task(1, "A", TaskStatus::Todo), task(2, "B", TaskStatus::Todo)])
                    .unwrap();
            }
            let _ = board.columns.push(column);
        }
        board
    }

    fn ids(board: &Board, column: &str) -> Vec<String> {
        board
            .find_column(&ColumnId::from(column))
            .unwrap()
            .tasks
            .keys()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn test_default_columns() {
        let cols = Board::default_columns();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].id.as_str(), "todo");
        assert_eq!(cols[2].status, Some(TaskStatus::Done));
    }

    #[test]
    fn test_with_tasks_rejects_repeated_id() {
        let result = Column::new("todo", "To Do")
            .with_tasks([task(1, "A", TaskStatus::Todo), task(1, "again", TaskStatus::Todo)]);
        assert!(matches!(result, Err(KanbanError::DuplicateId { .. })));
    }

    #[test]
    fn test_move_across_columns() {
        let mut board = sample_board();
        let mv = board
            .move_task(&TaskId::from(1), &Position::in_column("done"))
            .unwrap();

        assert!(mv.changed_column());
        assert_eq!(mv.task.status, TaskStatus::Done);
        assert!(mv.task.updated_at.is_some());
        assert_eq!(ids(&board, "todo"), ["2"]);
        assert_eq!(ids(&board, "done"), ["1"]);
        assert_eq!(board.task_count(), 2);
    }

    #[test]
    fn test_move_to_unknown_column_is_rejected() {
        let mut board = sample_board();
        let before = board.clone();
        let err = board
            .move_task(&TaskId::from(1), &Position::in_column("archive"))
            .unwrap_err();
        assert!(matches!(err, KanbanError::ColumnNotFound { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_unknown_task_is_rejected() {
        let mut board = sample_board();
        let before = board.clone();
        let err = board
            .move_task(&TaskId::from(99), &Position::in_column("done"))
            .unwrap_err();
        assert!(matches!(err, KanbanError::TaskNotFound { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_reorder_within_column() {
        let mut board = sample_board();
        let mv = board
            .move_task(&TaskId::from(2), &Position::at("todo", 0))
            .unwrap();
        assert!(!mv.changed_column());
        assert_eq!(mv.to.index, 0);
        assert_eq!(ids(&board, "todo"), ["2", "1"]);
    }

    #[test]
    fn test_drop_on_own_column_without_index_is_noop() {
        let mut board = sample_board();
        let before = board.clone();
        let mv = board
            .move_task(&TaskId::from(1), &Position::in_column("todo"))
            .unwrap();
        assert!(mv.is_noop());
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_into_unmapped_column_keeps_status() {
        let mut board = sample_board();
        let _ = board.columns.push(Column::new("review", "Review"));
        let mv = board
            .move_task(&TaskId::from(1), &Position::at("review", 0))
            .unwrap();
        assert_eq!(mv.task.status, TaskStatus::Todo);
        assert_eq!(mv.to.column.as_str(), "review");
    }

    #[test]
    fn test_insert_task_rejects_duplicates() {
        let mut board = sample_board();
        let err = board
            .insert_task(task(1, "again", TaskStatus::Todo), &Position::in_column("doing"))
            .unwrap_err();
        assert!(matches!(err, KanbanError::DuplicateId { .. }));
        assert_eq!(board.task_count(), 2);
    }

    #[test]
    fn test_insert_task_takes_column_status() {
        let mut board = sample_board();
        let location = board
            .insert_task(task(3, "C", TaskStatus::Todo), &Position::in_column("doing"))
            .unwrap();
        assert_eq!(location.index, 0);
        assert_eq!(
            board.find_task(&TaskId::from(3)).unwrap().status,
            TaskStatus::Doing
        );
    }

    #[test]
    fn test_validate_detects_duplicates_across_columns() {
        let mut board = sample_board();
        board
            .find_column_mut(&ColumnId::from("done"))
            .unwrap()
            .tasks
            .push(task(1, "dup", TaskStatus::Done))
            .unwrap();
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_infer_status() {
        let mut column = Column::new("doing", "In progress");
        column.infer_status();
        assert_eq!(column.status, Some(TaskStatus::Doing));

        let mut custom = Column::new("review", "Review");
        custom.infer_status();
        assert_eq!(custom.status, None);
    }

    #[test]
    fn test_board_serialization() {
        let board = sample_board();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["columns"][0]["tasks"][0]["id"], 1);
        let parsed: Board = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_resolve_task_id() {
        let board = sample_board();
        assert_eq!(board.resolve_task_id("2"), Some(TaskId::from(2)));
        assert_eq!(board.resolve_task_id("9"), None);
    }
}
