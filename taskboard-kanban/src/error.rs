//! Error types for the kanban engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// No board has been initialized in this context
    #[error("board not initialized")]
    NotInitialized,

    /// The context already holds a board
    #[error("board already initialized: {id}")]
    AlreadyInitialized { id: String },

    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Column has tasks and cannot be deleted
    #[error("column '{id}' has {count} tasks and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// An update named something that is not a task field
    #[error("unknown task field: {field}")]
    UnknownField { field: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl KanbanError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Errors caused by the request rather than the engine: the board is
    /// left exactly as it was and the caller may simply carry on.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. }
                | Self::ColumnNotFound { .. }
                | Self::ColumnNotEmpty { .. }
                | Self::DuplicateId { .. }
                | Self::UnknownField { .. }
                | Self::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::TaskNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_parse_error() {
        let err = KanbanError::parse("unexpected token");
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_rejection() {
        assert!(KanbanError::ColumnNotFound { id: "x".into() }.is_rejection());
        assert!(!KanbanError::NotInitialized.is_rejection());
    }
}
