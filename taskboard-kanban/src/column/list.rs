//! ListColumns command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List all columns in board order, without their tasks
#[operation(verb = "list", noun = "columns", description = "List all columns in order")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListColumns;

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result = ctx.read_board().await.map(|board| {
            let columns: Vec<Value> = board
                .columns
                .iter()
                .enumerate()
                .map(|(order, c)| {
                    json!({
                        "id": c.id,
                        "title": c.title,
                        "status": c.status,
                        "color": c.color,
                        "order": order,
                        "taskCount": c.tasks.len(),
                    })
                })
                .collect();
            json!({ "columns": columns, "count": columns.len() })
        });

        ExecutionResult::unlogged(result)
    }
}
