//! Where a task lands when it is placed in a column.

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};

/// Destination of a placement: a column plus an optional index.
///
/// Without an index the task is appended. An index past the end of the
/// column is clamped to the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub column: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Position {
    pub fn new(column: ColumnId, index: Option<usize>) -> Self {
        Self { column, index }
    }

    /// At the end of a column
    pub fn in_column(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
            index: None,
        }
    }

    /// At a given index within a column
    pub fn at(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index: Some(index),
        }
    }

    /// Concrete index for a column currently holding `len` tasks
    pub fn resolve(&self, len: usize) -> usize {
        self.index.map_or(len, |i| i.min(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Position::in_column("todo").resolve(3), 3);
        assert_eq!(Position::at("todo", 1).resolve(3), 1);
        assert_eq!(Position::at("todo", 10).resolve(3), 3);
    }

    #[test]
    fn test_serialization_omits_missing_index() {
        let json = serde_json::to_value(Position::in_column("done")).unwrap();
        assert_eq!(json, serde_json::json!({"column": "done"}));
    }
}
