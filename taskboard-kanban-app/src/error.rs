//! Error types for the host application

use std::path::PathBuf;
use taskboard_kanban::KanbanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Mount element #{id} not found in HTML")]
    MountNotFound { id: String },

    #[error("Failed to read {what} at {}: {source}", .path.display())]
    Read {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config at {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Invalid host page: {0}")]
    Page(String),

    #[error(transparent)]
    Kanban(#[from] KanbanError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Faults that stop the application before any board exists
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::MountNotFound { .. } | Self::Read { .. } | Self::Config { .. } | Self::Page(_)
        )
    }
}
