//! Execution result types for operations

use crate::LogEntry;
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;

/// Result of executing an operation
///
/// Mutations come back `Logged` so the processor can audit them, queries come
/// back `Unlogged`, and errors come back `Failed` with an optional entry.
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }

    /// Wrap a read-only outcome. Failures are returned without an entry.
    pub fn unlogged(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

impl<E: Display> ExecutionResult<Value, E> {
    /// Wrap a mutating outcome, recording a log entry for success and failure.
    ///
    /// `started` is taken before the operation ran and becomes `duration_ms`.
    pub fn logged(op: &str, input: Value, result: Result<Value, E>, started: Instant) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => Self::Logged {
                log_entry: LogEntry::new(op, input, value.clone(), None, duration_ms),
                value,
            },
            Err(error) => {
                let output = serde_json::json!({ "error": error.to_string() });
                Self::Failed {
                    log_entry: Some(LogEntry::new(op, input, output, None, duration_ms)),
                    error,
                }
            }
        }
    }
}
