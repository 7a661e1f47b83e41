//! Audit entries for executed operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record of one operation execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// ULID of this entry
    pub id: String,

    pub timestamp: DateTime<Utc>,

    /// Canonical op string, e.g. "move task"
    pub op: String,

    /// The operation's parameters as JSON
    pub input: Value,

    /// The result value, or `{"error": ...}`
    pub output: Value,

    /// Who triggered the operation, e.g. "cli" or "board[session]"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    pub duration_ms: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        actor: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor,
            duration_ms,
        }
    }

    /// Set the actor
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// True when the output records an error
    pub fn is_failure(&self) -> bool {
        self.output.get("error").is_some()
    }
}
