//! KanbanColumn: a titled list of cards and a drop target

use super::card::{CardEvent, TaskCard, TaskCardProps};
use crate::types::{Column, ColumnId, DropPayload, Task, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumnProps {
    pub column: Column,
    /// Position of the column on the board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// What a column reports to the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ColumnEvent {
    #[serde(rename_all = "camelCase")]
    TaskDelete { task_id: TaskId },
    TaskEdit { task: Task },
    #[serde(rename_all = "camelCase")]
    TaskDragStart { task_id: TaskId, column_id: ColumnId },
    #[serde(rename_all = "camelCase")]
    TaskDrop {
        task_id: TaskId,
        target_column_id: ColumnId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanColumn {
    props: KanbanColumnProps,
}

impl KanbanColumn {
    pub fn new(props: KanbanColumnProps) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &KanbanColumnProps {
        &self.props
    }

    pub fn id(&self) -> &ColumnId {
        &self.props.column.id
    }

    pub fn title(&self) -> &str {
        &self.props.column.title
    }

    /// Cards in column order
    pub fn cards(&self) -> Vec<TaskCard> {
        self.props
            .column
            .tasks
            .iter()
            .map(|task| self.card_for(task))
            .collect()
    }

    pub fn card(&self, task_id: &TaskId) -> Option<TaskCard> {
        self.props.column.tasks.get(task_id).map(|task| self.card_for(task))
    }

    fn card_for(&self, task: &Task) -> TaskCard {
        TaskCard::new(TaskCardProps {
            task: task.clone(),
            column_id: self.props.column.id.clone(),
        })
    }

    /// Re-emit a card's event in board terms
    pub fn forward(&self, event: CardEvent) -> ColumnEvent {
        match event {
            CardEvent::Delete(task_id) => ColumnEvent::TaskDelete { task_id },
            CardEvent::Edit(task) => ColumnEvent::TaskEdit { task },
            CardEvent::DragStart(payload) => ColumnEvent::TaskDragStart {
                task_id: payload.task.id,
                column_id: self.props.column.id.clone(),
            },
        }
    }

    /// Turn a drop on this column into a `TaskDrop` targeting it.
    ///
    /// The dragged task is read from the event's data transfer; a drop that
    /// carries none is not a task drag and yields `None`, as does a payload
    /// addressed to another column.
    pub fn drop(&self, payload: DropPayload) -> Option<ColumnEvent> {
        let DropPayload { event, column_id } = payload;
        if &column_id != self.id() {
            tracing::warn!(column = %self.id(), payload = %column_id, "drop addressed to another column");
            return None;
        }
        let Some(task_id) = event.data_transfer else {
            tracing::debug!(column = %column_id, "drop without a task id ignored");
            return None;
        };
        Some(ColumnEvent::TaskDrop {
            task_id,
            target_column_id: column_id,
            index: event.index_hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DragEvent, TaskStatus};

    fn column() -> KanbanColumn {
        let column = Column::new("todo", "To Do")
            .with_status(TaskStatus::Todo)
            .with_tasks([
                Task::new("A", TaskStatus::Todo).with_id(1),
                Task::new("B", TaskStatus::Todo).with_id(2),
            ])
            .unwrap();
        KanbanColumn::new(KanbanColumnProps {
            column,
            index: Some(0),
        })
    }

    #[test]
    fn test_cards_follow_column_order() {
        let cards = column().cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].task().content, "A");
        assert_eq!(cards[1].column_id(), &ColumnId::from("todo"));
    }

    #[test]
    fn test_forward_card_events() {
        let column = column();
        let card = column.card(&TaskId::from(2)).unwrap();

        assert_eq!(
            column.forward(card.delete()),
            ColumnEvent::TaskDelete {
                task_id: TaskId::from(2)
            }
        );
        assert_eq!(
            column.forward(card.drag_start(DragEvent::default())),
            ColumnEvent::TaskDragStart {
                task_id: TaskId::from(2),
                column_id: "todo".into(),
            }
        );
    }

    #[test]
    fn test_drop_reads_data_transfer() {
        let event = DragEvent::new(0.0, 0.0)
            .with_data_transfer(1)
            .with_index_hint(0);
        let dropped = column().drop(DropPayload::new(event, "todo"));
        assert_eq!(
            dropped,
            Some(ColumnEvent::TaskDrop {
                task_id: TaskId::from(1),
                target_column_id: "todo".into(),
                index: Some(0),
            })
        );
    }

    #[test]
    fn test_drop_without_task_is_ignored() {
        let dropped = column().drop(DropPayload::new(DragEvent::default(), "todo"));
        assert_eq!(dropped, None);
    }

    #[test]
    fn test_drop_for_other_column_is_ignored() {
        let event = DragEvent::new(0.0, 0.0).with_data_transfer(1);
        assert_eq!(column().drop(DropPayload::new(event, "done")), None);
    }

    #[test]
    fn test_column_event_shape() {
        let event = ColumnEvent::TaskDragStart {
            task_id: TaskId::from(1),
            column_id: "todo".into(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({"event": "taskDragStart", "taskId": 1, "columnId": "todo"})
        );
    }
}
