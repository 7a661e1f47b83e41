//! Events the board emits to its host

use super::ids::{ColumnId, TaskId};
use super::task::Task;
use serde::{Deserialize, Serialize};

/// Public surface of the board: what a host observes to persist or log changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BoardEvent {
    #[serde(rename_all = "camelCase")]
    TaskAdded { task: Task, column_id: ColumnId },
    #[serde(rename_all = "camelCase")]
    TaskRemoved { task_id: TaskId, column_id: ColumnId },
    #[serde(rename_all = "camelCase")]
    TaskMoved {
        task_id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
    },
}

impl BoardEvent {
    /// The task the event is about
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskAdded { task, .. } => &task.id,
            Self::TaskRemoved { task_id, .. } => task_id,
            Self::TaskMoved { task_id, .. } => task_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskAdded { .. } => "taskAdded",
            Self::TaskRemoved { .. } => "taskRemoved",
            Self::TaskMoved { .. } => "taskMoved",
        }
    }
}
