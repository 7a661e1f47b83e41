//! Task types: Task, TaskStatus, Priority

use super::ids::TaskId;
use super::ordered::Keyed;
use super::update::TaskUpdate;
use crate::error::KanbanError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::Doing, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(KanbanError::invalid_value(
                "status",
                format!("'{}' is not one of todo, doing, done", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(KanbanError::invalid_value(
                "priority",
                format!("'{}' is not one of low, medium, high", other),
            )),
        }
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with a generated id, stamped now
    pub fn new(content: impl Into<String>, status: TaskStatus) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            content: content.into(),
            status,
            priority: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Apply a typed update. Returns false (and leaves the task alone) when the
    /// field already holds the value.
    pub fn apply(&mut self, update: &TaskUpdate) -> bool {
        let changed = match update {
            TaskUpdate::Content(content) if *content != self.content => {
                self.content = content.clone();
                true
            }
            TaskUpdate::Status(status) if *status != self.status => {
                self.status = *status;
                true
            }
            TaskUpdate::Priority(priority) if *priority != self.priority => {
                self.priority = *priority;
                true
            }
            _ => false,
        };
        if changed {
            self.touch();
        }
        changed
    }
}

impl Keyed for Task {
    type Key = TaskId;

    fn key(&self) -> &TaskId {
        &self.id
    }
}
