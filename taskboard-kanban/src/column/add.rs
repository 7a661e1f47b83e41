//! AddColumn command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::types::{Column, ColumnId, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Add a new column to the board
#[operation(
    verb = "add",
    noun = "column",
    description = "Add a new column to the board"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// The column ID (slug)
    pub id: ColumnId,
    /// The column display title
    pub title: String,
    /// Status given to tasks dropped into this column
    pub status: Option<TaskStatus>,
    /// Display color hint
    pub color: Option<String>,
    /// Position in column order; appended when absent
    pub order: Option<usize>,
}

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: None,
            color: None,
            order: None,
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

    /// Set the order (position in column list)
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = ctx
            .with_board(|board| {
                let mut column = Column::new(self.id.clone(), self.title.clone());
                column.status = self.status;
                column.infer_status();
                column.color = self.color.clone();

                let index = self.order.unwrap_or(board.columns.len());
                board
                    .columns
                    .insert_at(index, column.clone())
                    .map_err(|c| KanbanError::duplicate_id("column", c.id.to_string()))?;
                board.touch();

                let mut value = serde_json::to_value(&column)?;
                value["order"] = Value::from(board.columns.index_of(&column.id));
                Ok(value)
            })
            .await;

        ExecutionResult::logged(&self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
