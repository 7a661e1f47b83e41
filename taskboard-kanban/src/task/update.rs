//! UpdateTask command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{
    BoardEvent, ColumnId, Position, Priority, Task, TaskId, TaskStatus, TaskUpdate,
    UpdateTaskPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Update a task's fields
///
/// The updates are applied together or not at all. Changing the status moves
/// the task to the end of the column mapped to the new status.
#[operation(
    verb = "update",
    noun = "task",
    description = "Update a task's content, status or priority"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID to update
    #[param(alias = "taskId")]
    pub id: TaskId,
    /// Field changes, applied in order
    pub updates: Vec<TaskUpdate>,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            updates: Vec::new(),
        }
    }

    /// Build from the `{taskId, key, value}` wire form
    pub fn from_payload(payload: UpdateTaskPayload) -> Result<Self> {
        let (id, update) = payload.into_update()?;
        Ok(Self::new(id).with_update(update))
    }

    /// Build from an edited copy of a task: every mutable field is carried
    /// over and unchanged ones are skipped when applied.
    pub fn from_edit(task: &Task) -> Self {
        Self::new(&task.id)
            .with_content(task.content.clone())
            .with_status(task.status)
            .with_priority(task.priority)
    }

    pub fn with_update(mut self, update: TaskUpdate) -> Self {
        self.updates.push(update);
        self
    }

    pub fn with_content(self, content: impl Into<String>) -> Self {
        self.with_update(TaskUpdate::Content(content.into()))
    }

    pub fn with_status(self, status: TaskStatus) -> Self {
        self.with_update(TaskUpdate::Status(status))
    }

    pub fn with_priority(self, priority: Option<Priority>) -> Self {
        self.with_update(TaskUpdate::Priority(priority))
    }
}

struct Applied {
    task: Task,
    changed: Vec<&'static str>,
    column: ColumnId,
    index: usize,
    moved_from: Option<ColumnId>,
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let not_found = || KanbanError::TaskNotFound {
                    id: self.id.to_string(),
                };
                let location = board.locate_task(&self.id).ok_or_else(not_found)?;
                let original = board.find_task(&self.id).cloned().ok_or_else(not_found)?;

                let mut task = original.clone();
                let changed: Vec<&'static str> = self
                    .updates
                    .iter()
                    .filter(|update| task.apply(update))
                    .map(TaskUpdate::key)
                    .collect();

                let mut relocate_to = None;
                if task.status != original.status {
                    let current_maps_status = board
                        .find_column(&location.column)
                        .and_then(|c| c.status)
                        .is_some();
                    match board.column_for_status(task.status) {
                        Some(target) if target.id != location.column => {
                            relocate_to = Some(target.id.clone())
                        }
                        Some(_) => {}
                        None if current_maps_status => {
                            return Err(KanbanError::invalid_value(
                                "status",
                                format!("no column holds {} tasks", task.status),
                            ));
                        }
                        None => {}
                    }
                }

                if changed.is_empty() {
                    return Ok(Applied {
                        task: original,
                        changed,
                        column: location.column,
                        index: location.index,
                        moved_from: None,
                    });
                }

                if let Some(slot) = board.find_task_mut(&self.id) {
                    *slot = task.clone();
                }
                let applied = match relocate_to {
                    Some(target) => {
                        let moved = board.move_task(&self.id, &Position::in_column(target))?;
                        Applied {
                            task: moved.task,
                            changed,
                            column: moved.to.column,
                            index: moved.to.index,
                            moved_from: Some(moved.from.column),
                        }
                    }
                    None => Applied {
                        task,
                        changed,
                        column: location.column,
                        index: location.index,
                        moved_from: None,
                    },
                };
                board.touch();
                if let Some(from) = &applied.moved_from {
                    ctx.emit(BoardEvent::TaskMoved {
                        task_id: self.id.clone(),
                        from_column_id: from.clone(),
                        to_column_id: applied.column.clone(),
                    });
                }
                Ok(applied)
            })
            .await;

        let result = result.and_then(|applied| {
            tracing::debug!(task = %self.id, changed = ?applied.changed, "task updated");
            let mut value = serde_json::to_value(&applied.task)?;
            value["column"] = serde_json::to_value(&applied.column)?;
            value["index"] = Value::from(applied.index);
            value["changed"] = Value::from(applied.changed);
            Ok(value)
        });

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
