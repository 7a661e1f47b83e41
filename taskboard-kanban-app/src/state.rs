//! Application configuration and the mounted application context

use crate::bootstrap::{self, MountPoint, DEFAULT_MOUNT_ID, DEFAULT_PAGE};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_kanban::components::{KanbanBoard, KanbanBoardProps};
use taskboard_kanban::{KanbanOperationProcessor, Seed};

const CONFIG_DIR_NAME: &str = "taskboard";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Settings read from `config.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Id of the host page element the board mounts on
    pub mount_id: String,
    /// Board title; falls back to the seed's title, then the mount element's
    pub title: Option<String>,
    /// Seed file (JSON or YAML)
    pub seed: Option<PathBuf>,
    /// Host page; the bundled page when absent
    pub page: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Recorded as the actor of every change
    pub actor: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            title: None,
            seed: None,
            page: None,
            log_level: "warn".to_string(),
            actor: "cli".to_string(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/taskboard/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the explicit config file, or the default one when it exists.
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_file("config", path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(&content).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything the running application needs, built once at startup and
/// passed down explicitly.
pub struct AppContext {
    pub config: AppConfig,
    pub mount: MountPoint,
    pub board: KanbanBoard,
}

impl AppContext {
    /// Find the mount point, then load the seed and mount the board on it
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        let page = match &config.page {
            Some(path) => read_file("host page", path)?,
            None => DEFAULT_PAGE.to_string(),
        };

        let (mount, board) = bootstrap::mount(&page, &config.mount_id, |mount_point| {
            mount_board(&config, mount_point)
        })
        .await?;

        tracing::info!(mount = %mount.id, "board mounted");
        Ok(Self {
            config,
            mount,
            board,
        })
    }
}

/// Load the seed and mount the board unit on `mount_point`
async fn mount_board(config: &AppConfig, mount_point: MountPoint) -> Result<KanbanBoard> {
    let seed = match &config.seed {
        Some(path) => Seed::parse(&read_file("seed", path)?)?,
        None => Seed::default(),
    };
    let title = config.title.clone().or(seed.title).or(mount_point.title);

    let mut props = KanbanBoardProps::new();
    if config.seed.is_some() {
        props = props.with_initial_data(seed.columns);
    }
    if let Some(title) = title {
        props = props.with_title(title);
    }
    let processor = KanbanOperationProcessor::with_actor(config.actor.clone());
    Ok(KanbanBoard::mount_with(props, processor).await?)
}

fn read_file(what: &'static str, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        what,
        path: path.to_path_buf(),
        source,
    })
}
