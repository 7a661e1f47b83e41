//! Drag and drop payloads exchanged between the card, column and board units

use super::ids::{ColumnId, TaskId};
use super::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The native gesture data of a drag.
///
/// `data_transfer` carries the dragged task's id from the card that started
/// the drag to whichever column receives the drop. `index_hint` is the slot
/// under the pointer at drop time, when the host can compute one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_transfer: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_hint: Option<usize>,
    pub timestamp: DateTime<Utc>,
}

impl DragEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            data_transfer: None,
            index_hint: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_data_transfer(mut self, task_id: impl Into<TaskId>) -> Self {
        self.data_transfer = Some(task_id.into());
        self
    }

    pub fn with_index_hint(mut self, index: usize) -> Self {
        self.index_hint = Some(index);
        self
    }
}

impl Default for DragEvent {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Emitted by a card when it is lifted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragStartPayload {
    pub event: DragEvent,
    pub task: Task,
}

/// Emitted when a drag is released over a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    pub event: DragEvent,
    pub column_id: ColumnId,
}

impl DropPayload {
    pub fn new(event: DragEvent, column_id: impl Into<ColumnId>) -> Self {
        Self {
            event,
            column_id: column_id.into(),
        }
    }
}

/// Which task is in flight and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStartEvent {
    pub task_id: TaskId,
    pub source_column_id: ColumnId,
}

/// A completed gesture: source and target of a drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndEvent {
    pub task_id: TaskId,
    pub source_column_id: ColumnId,
    pub target_column_id: ColumnId,
}
