//! TaskCard: one task inside a column

use crate::types::{ColumnId, DragEvent, DragStartPayload, Task, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCardProps {
    pub task: Task,
    pub column_id: ColumnId,
}

/// What a card reports to its column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum CardEvent {
    Delete(TaskId),
    /// An edited copy of the card's task
    Edit(Task),
    DragStart(DragStartPayload),
}

/// Renders a single task. Holds a copy of its props and only ever emits.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    props: TaskCardProps,
}

impl TaskCard {
    pub fn new(props: TaskCardProps) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &TaskCardProps {
        &self.props
    }

    pub fn task(&self) -> &Task {
        &self.props.task
    }

    pub fn column_id(&self) -> &ColumnId {
        &self.props.column_id
    }

    /// The delete control was used
    pub fn delete(&self) -> CardEvent {
        CardEvent::Delete(self.props.task.id.clone())
    }

    /// Edit a copy of the task; the card's own props stay as they were
    pub fn edit(&self, f: impl FnOnce(&mut Task)) -> CardEvent {
        let mut task = self.props.task.clone();
        f(&mut task);
        task.id = self.props.task.id.clone();
        CardEvent::Edit(task)
    }

    /// The card was lifted. The task id rides along in the event's data
    /// transfer so the receiving column can name it on drop.
    pub fn drag_start(&self, event: DragEvent) -> CardEvent {
        let event = event.with_data_transfer(&self.props.task.id);
        CardEvent::DragStart(DragStartPayload {
            event,
            task: self.props.task.clone(),
        })
    }
}
