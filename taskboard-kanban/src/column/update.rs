//! UpdateColumn command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::types::{ColumnId, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Update a column's title, status mapping, color or position
#[operation(verb = "update", noun = "column", description = "Update column properties")]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    /// New title
    pub title: Option<String>,
    /// New status mapping (None = don't change, Some(None) = clear)
    pub status: Option<Option<TaskStatus>>,
    /// New color (None = don't change, Some(None) = clear)
    pub color: Option<Option<String>>,
    /// New position in column order
    pub order: Option<usize>,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            status: None,
            color: None,
            order: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: Option<TaskStatus>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let column = board
                    .find_column_mut(&self.id)
                    .ok_or_else(|| KanbanError::ColumnNotFound {
                        id: self.id.to_string(),
                    })?;

                if let Some(Some(status)) = self.status {
                    let mismatched = column.tasks.iter().filter(|t| t.status != status).count();
                    if mismatched > 0 {
                        return Err(KanbanError::invalid_value(
                            "status",
                            format!(
                                "column '{}' holds {} tasks that are not {}",
                                self.id, mismatched, status
                            ),
                        ));
                    }
                }

                if let Some(title) = &self.title {
                    column.title = title.clone();
                }
                if let Some(status) = self.status {
                    column.status = status;
                }
                if let Some(color) = &self.color {
                    column.color = color.clone();
                }
                let mut value = serde_json::to_value(&*column)?;

                if let Some(order) = self.order {
                    board.columns.move_to(&self.id, order);
                }
                board.touch();
                value["order"] = Value::from(board.columns.index_of(&self.id));
                Ok(value)
            })
            .await;

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }
}
