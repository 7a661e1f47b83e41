//! ListTasks command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::{ColumnId, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List tasks in board order
#[operation(
    verb = "list",
    noun = "tasks",
    description = "List tasks, optionally filtered by column or status"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListTasks {
    /// Only tasks in this column
    pub column: Option<ColumnId>,
    /// Only tasks with this status
    pub status: Option<TaskStatus>,
}

impl ListTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListTasks {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let board = ctx.read_board().await?;
            if let Some(column) = &self.column {
                if board.find_column(column).is_none() {
                    return Err(KanbanError::ColumnNotFound {
                        id: column.to_string(),
                    });
                }
            }

            let mut tasks = Vec::new();
            for column in board.columns.iter() {
                if self.column.as_ref().is_some_and(|c| *c != column.id) {
                    continue;
                }
                for (index, task) in column.tasks.iter().enumerate() {
                    if self.status.is_some_and(|s| s != task.status) {
                        continue;
                    }
                    let mut value = serde_json::to_value(task)?;
                    value["column"] = serde_json::to_value(&column.id)?;
                    value["index"] = Value::from(index);
                    tasks.push(value);
                }
            }

            Ok(json!({ "count": tasks.len(), "tasks": tasks }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
