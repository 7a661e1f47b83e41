//! AddTask command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::types::{BoardEvent, ColumnId, Position, Priority, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Add a new task to the board
#[operation(verb = "add", noun = "task", description = "Create a new task on the board")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The task content (required)
    pub content: String,
    /// Explicit id; a ULID is generated when absent
    pub id: Option<TaskId>,
    /// Target column; defaults to the column mapped to `status`, else the first column
    #[param(alias = "columnId")]
    pub column: Option<ColumnId>,
    /// Initial status; a column with a status mapping overrides it
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    /// Insertion index in the column; appended when absent
    pub index: Option<usize>,
}

impl AddTask {
    /// Create a new AddTask command with just content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            id: None,
            column: None,
            status: None,
            priority: None,
            index: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let column = match (&self.column, self.status) {
                    (Some(column), _) => column.clone(),
                    (None, Some(status)) => board
                        .column_for_status(status)
                        .or_else(|| board.first_column())
                        .map(|c| c.id.clone())
                        .ok_or_else(|| KanbanError::invalid_value("column", "board has no columns"))?,
                    (None, None) => board
                        .first_column()
                        .map(|c| c.id.clone())
                        .ok_or_else(|| KanbanError::invalid_value("column", "board has no columns"))?,
                };

                let mut task = Task::new(
                    self.content.clone(),
                    self.status.unwrap_or(TaskStatus::Todo),
                );
                if let Some(id) = &self.id {
                    task = task.with_id(id);
                }
                task.priority = self.priority;

                let id = task.id.clone();
                let location = board.insert_task(task, &Position::new(column, self.index))?;
                board.touch();

                let task = board
                    .find_task(&id)
                    .cloned()
                    .ok_or_else(|| KanbanError::TaskNotFound { id: id.to_string() })?;
                ctx.emit(BoardEvent::TaskAdded {
                    task: task.clone(),
                    column_id: location.column.clone(),
                });
                Ok((task, location))
            })
            .await;

        let result = result.and_then(|(task, location)| {
            tracing::debug!(task = %task.id, column = %location.column, "task added");
            let mut value = serde_json::to_value(&task)?;
            value["column"] = serde_json::to_value(&location.column)?;
            value["index"] = Value::from(location.index);
            Ok(value)
        });

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result
            .get("id")
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .into_iter()
            .collect()
    }
}
