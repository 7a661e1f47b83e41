//! Operation catalog
//!
//! Describes every board command with its parameters, for hosts that list or
//! validate commands without executing them.

use crate::board::{GetBoard, InitBoard, UpdateBoard};
use crate::column::{AddColumn, DeleteColumn, GetColumn, ListColumns, UpdateColumn};
use crate::task::{AddTask, DeleteTask, GetTask, ListTasks, MoveTask, UpdateTask};
use crate::types::{ColumnId, TaskId};
use serde_json::{json, Value};
use taskboard_operations::Operation;

/// One instance of every command, in board / column / task order
pub fn all_operations() -> Vec<Box<dyn Operation + Send + Sync>> {
    let no_task = TaskId::default;
    let no_column = ColumnId::default;
    vec![
        Box::new(InitBoard::new("")),
        Box::new(GetBoard),
        Box::new(UpdateBoard::new()),
        Box::new(AddColumn::new(no_column(), "")),
        Box::new(GetColumn::new(no_column())),
        Box::new(ListColumns),
        Box::new(UpdateColumn::new(no_column())),
        Box::new(DeleteColumn::new(no_column())),
        Box::new(AddTask::new("")),
        Box::new(GetTask::new(no_task())),
        Box::new(ListTasks::new()),
        Box::new(UpdateTask::new(no_task())),
        Box::new(DeleteTask::new(no_task())),
        Box::new(MoveTask::to_column(no_task(), no_column())),
    ]
}

/// JSON description of a single operation
pub fn describe_operation(op: &dyn Operation) -> Value {
    let parameters: Vec<Value> = op
        .parameters()
        .iter()
        .map(|param| {
            json!({
                "name": param.name,
                "type": param.param_type.to_string(),
                "required": param.required,
                "description": param.description,
                "aliases": param.aliases,
            })
        })
        .collect();
    json!({
        "op": op.op_string(),
        "verb": op.verb(),
        "noun": op.noun(),
        "description": op.description(),
        "parameters": parameters,
    })
}

/// Find an operation by its "verb noun" string
pub fn find_operation(op_string: &str) -> Option<Box<dyn Operation + Send + Sync>> {
    let wanted = op_string.split_whitespace().collect::<Vec<_>>().join(" ");
    all_operations()
        .into_iter()
        .find(|op| op.op_string() == wanted)
}
