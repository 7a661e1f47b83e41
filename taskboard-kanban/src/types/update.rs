//! Typed task updates.
//!
//! Hosts send `{taskId, key, value}` triples. Before anything touches the
//! model the triple becomes a [`TaskUpdate`], whose variants only admit
//! well-typed values for real, mutable task fields.

use super::ids::TaskId;
use super::task::{Priority, TaskStatus};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field change on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum TaskUpdate {
    Content(String),
    Status(TaskStatus),
    /// `None` clears the priority
    Priority(Option<Priority>),
}

impl TaskUpdate {
    /// Name of the task field this update writes
    pub fn key(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::Status(_) => "status",
            Self::Priority(_) => "priority",
        }
    }

    /// Build an update from an untyped key/value pair
    pub fn from_key_value(key: &str, value: Value) -> Result<Self> {
        match key {
            "content" => match value {
                Value::String(s) => Ok(Self::Content(s)),
                other => Err(type_mismatch("content", "a string", &other)),
            },
            "status" => serde_json::from_value(value.clone())
                .map(Self::Status)
                .map_err(|_| type_mismatch("status", "one of todo, doing, done", &value)),
            "priority" => serde_json::from_value(value.clone())
                .map(Self::Priority)
                .map_err(|_| type_mismatch("priority", "one of low, medium, high or null", &value)),
            "id" | "createdAt" | "updatedAt" => Err(KanbanError::invalid_value(
                key,
                "field is managed by the board and cannot be updated",
            )),
            other => Err(KanbanError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    /// Parse a value given as command-line text.
    ///
    /// Content takes the text verbatim; priority accepts `none` to clear.
    pub fn from_key_text(key: &str, text: &str) -> Result<Self> {
        match key {
            "content" => Ok(Self::Content(text.to_string())),
            "status" => Ok(Self::Status(text.parse()?)),
            "priority" if text == "none" => Ok(Self::Priority(None)),
            "priority" => Ok(Self::Priority(Some(text.parse()?))),
            other => Self::from_key_value(other, Value::String(text.to_string())),
        }
    }
}

fn type_mismatch(field: &str, expected: &str, got: &Value) -> KanbanError {
    KanbanError::invalid_value(field, format!("expected {}, got {}", expected, got))
}

/// Wire form of an update request: `{taskId, key, value}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    pub task_id: TaskId,
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

impl UpdateTaskPayload {
    pub fn new(task_id: impl Into<TaskId>, key: impl Into<String>, value: Value) -> Self {
        Self {
            task_id: task_id.into(),
            key: key.into(),
            value,
        }
    }

    /// Validate into the target id and a typed update
    pub fn into_update(self) -> Result<(TaskId, TaskUpdate)> {
        let update = TaskUpdate::from_key_value(&self.key, self.value)?;
        Ok((self.task_id, update))
    }
}

impl TryFrom<UpdateTaskPayload> for (TaskId, TaskUpdate) {
    type Error = KanbanError;

    fn try_from(payload: UpdateTaskPayload) -> Result<Self> {
        payload.into_update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_payload() {
        let payload: UpdateTaskPayload =
            serde_json::from_value(json!({"taskId": 1, "key": "content", "value": "new text"}))
                .unwrap();
        let (id, update) = payload.into_update().unwrap();
        assert_eq!(id, TaskId::from(1));
        assert_eq!(update, TaskUpdate::Content("new text".into()));
    }

    #[test]
    fn test_status_and_priority_payloads() {
        assert_eq!(
            TaskUpdate::from_key_value("status", json!("doing")).unwrap(),
            TaskUpdate::Status(TaskStatus::Doing)
        );
        assert_eq!(
            TaskUpdate::from_key_value("priority", Value::Null).unwrap(),
            TaskUpdate::Priority(None)
        );
        assert_eq!(
            TaskUpdate::from_key_value("priority", json!("high")).unwrap(),
            TaskUpdate::Priority(Some(Priority::High))
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TaskUpdate::from_key_value("assignee", json!("bob")).unwrap_err();
        assert!(matches!(err, KanbanError::UnknownField { ref field } if field == "assignee"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = TaskUpdate::from_key_value("content", json!(42)).unwrap_err();
        assert!(matches!(err, KanbanError::InvalidValue { .. }));
        let err = TaskUpdate::from_key_value("status", json!("blocked")).unwrap_err();
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn test_managed_fields_rejected() {
        for key in ["id", "createdAt", "updatedAt"] {
            assert!(TaskUpdate::from_key_value(key, json!("x")).is_err());
        }
    }

    #[test]
    fn test_from_key_text() {
        assert_eq!(
            TaskUpdate::from_key_text("priority", "none").unwrap(),
            TaskUpdate::Priority(None)
        );
        assert_eq!(
            TaskUpdate::from_key_text("status", "done").unwrap(),
            TaskUpdate::Status(TaskStatus::Done)
        );
        assert!(TaskUpdate::from_key_text("colour", "red").is_err());
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(TaskUpdate::Status(TaskStatus::Done)).unwrap();
        assert_eq!(json, json!({"key": "status", "value": "done"}));
    }
}
