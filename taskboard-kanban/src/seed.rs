//! Seed data parsing
//!
//! A seed is the initial column list a board starts from. It is accepted in
//! several shapes, as JSON or YAML:
//!
//! - a list of columns: `[{id, title?, status?, color?, tasks: [...]}, ...]`
//! - an object with a list of columns: `{title?, columns: [...]}`
//! - a map of column id to task list: `{todo: [...], done: []}`
//!
//! A column without a title gets one derived from its id. A seed task without
//! a status takes its column's status.

use crate::error::{KanbanError, Result};
use crate::types::{Column, TaskStatus};
use serde_json::{Map, Value};

/// Parsed seed data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Seed {
    pub title: Option<String>,
    pub columns: Vec<Column>,
}

impl Seed {
    /// Parse seed text, JSON first and YAML otherwise
    pub fn parse(text: &str) -> Result<Self> {
        let value = match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(json_err) => serde_yaml_ng::from_str::<Value>(text).map_err(|yaml_err| {
                KanbanError::parse(format!(
                    "seed is neither JSON ({}) nor YAML ({})",
                    json_err, yaml_err
                ))
            })?,
        };
        Self::from_value(value)
    }

    /// Normalize any accepted shape into columns
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(columns) => Ok(Self {
                title: None,
                columns: parse_columns(columns)?,
            }),
            Value::Object(mut obj) if obj.contains_key("columns") => {
                let title = match obj.remove("title") {
                    Some(Value::String(title)) => Some(title),
                    Some(Value::Null) | None => None,
                    Some(_) => return Err(KanbanError::parse("seed title must be a string")),
                };
                match obj.remove("columns") {
                    Some(Value::Array(columns)) => Ok(Self {
                        title,
                        columns: parse_columns(columns)?,
                    }),
                    _ => Err(KanbanError::parse("seed columns must be a list")),
                }
            }
            Value::Object(obj) => {
                let columns = obj
                    .into_iter()
                    .map(|(id, tasks)| {
                        let mut column = Map::new();
                        column.insert("id".into(), Value::String(id));
                        column.insert("tasks".into(), tasks);
                        Value::Object(column)
                    })
                    .collect();
                Ok(Self {
                    title: None,
                    columns: parse_columns(columns)?,
                })
            }
            Value::Null => Ok(Self::default()),
            _ => Err(KanbanError::parse(
                "seed must be a list of columns or an object of columns",
            )),
        }
    }
}

fn parse_columns(columns: Vec<Value>) -> Result<Vec<Column>> {
    columns.into_iter().map(parse_column).collect()
}

fn parse_column(value: Value) -> Result<Column> {
    let Value::Object(mut obj) = value else {
        return Err(KanbanError::parse("each seed column must be an object"));
    };

    let id = match obj.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(KanbanError::parse("seed column is missing an id")),
    };
    obj.insert("id".into(), Value::String(id.clone()));
    if !matches!(obj.get("title"), Some(Value::String(_))) {
        obj.insert("title".into(), Value::String(title_from_id(&id)));
    }

    let status = match obj.get("status") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => id.parse::<TaskStatus>().ok().map(|s| s.as_str().to_string()),
    };
    if let Some(status) = status {
        if let Some(Value::Array(tasks)) = obj.get_mut("tasks") {
            for task in tasks.iter_mut() {
                if let Value::Object(task) = task {
                    task.entry("status")
                        .or_insert_with(|| Value::String(status.clone()));
                }
            }
        }
    }

    Ok(serde_json::from_value(Value::Object(obj))?)
}

/// "todo" -> "To Do", "in_review" -> "In Review"
fn title_from_id(id: &str) -> String {
    if id == "todo" {
        return "To Do".to_string();
    }
    id.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskId;

    #[test]
    fn test_column_list_json() {
        let seed = Seed::parse(
            r#"[
                {"id": "todo", "title": "To Do", "tasks": [{"id": 1, "content": "A", "status": "todo"}]},
                {"id": "done", "title": "Done", "tasks": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(seed.title, None);
        assert_eq!(seed.columns.len(), 2);
        assert!(seed.columns[0].tasks.contains(&TaskId::from(1)));
    }

    #[test]
    fn test_column_map_yaml() {
        let seed = Seed::parse(
            "todo:\n  - id: 1\n    content: A\n    status: todo\ndone: []\n",
        )
        .unwrap();
        let ids: Vec<_> = seed.columns.iter().map(|c| c.id.to_string()).collect();
        assert!(ids.contains(&"todo".to_string()));
        assert!(ids.contains(&"done".to_string()));
        let todo = seed.columns.iter().find(|c| c.id.as_str() == "todo").unwrap();
        assert_eq!(todo.title, "To Do");
    }

    #[test]
    fn test_board_object_with_title() {
        let seed = Seed::parse(
            "title: Sprint\ncolumns:\n  - id: in_review\n    status: doing\n    tasks:\n      - id: x\n        content: Review\n",
        )
        .unwrap();
        assert_eq!(seed.title.as_deref(), Some("Sprint"));
        let column = &seed.columns[0];
        assert_eq!(column.title, "In Review");
        assert_eq!(column.status, Some(TaskStatus::Doing));
        assert_eq!(
            column.tasks.get(&TaskId::from("x")).unwrap().status,
            TaskStatus::Doing
        );
    }

    #[test]
    fn test_task_without_status_in_plain_column() {
        let result = Seed::parse(r#"[{"id": "later", "tasks": [{"id": 1, "content": "A"}]}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_task_ids_rejected() {
        let result = Seed::parse(
            r#"[{"id": "todo", "tasks": [
                {"id": 1, "content": "A", "status": "todo"},
                {"id": 1, "content": "B", "status": "todo"}
            ]}]"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage() {
        assert!(matches!(
            Seed::parse("[1, 2"),
            Err(KanbanError::Parse { .. })
        ));
        assert!(Seed::parse("42").is_err());
    }

    #[test]
    fn test_title_from_id() {
        assert_eq!(title_from_id("todo"), "To Do");
        assert_eq!(title_from_id("doing"), "Doing");
        assert_eq!(title_from_id("in-review"), "In Review");
    }
}
