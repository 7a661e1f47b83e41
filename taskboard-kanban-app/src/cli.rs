//! Command-line interface definition

use crate::state::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskboard - a kanban board in the terminal.
///
/// Every invocation mounts a fresh board from the seed file, applies one
/// command, then prints the events it emitted and the resulting board.
/// Nothing is written back to the seed.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Drive a kanban board from the command line")]
pub struct Cli {
    /// Config file (default: <config dir>/taskboard/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed columns and tasks (JSON or YAML)
    #[arg(long, global = true, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Host HTML page holding the mount element
    #[arg(long, global = true, value_name = "PATH")]
    pub page: Option<PathBuf>,

    /// Id of the mount element
    #[arg(long, global = true, value_name = "ID")]
    pub mount_id: Option<String>,

    /// Board title
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log operations to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only print errors to stderr
    #[arg(short, long, global = true, conflicts_with_all = ["debug", "verbose"])]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Show the board (the default)
    Show {
        /// Also show the activity log
        #[arg(long)]
        activity: bool,
    },

    /// Add a task
    Add {
        /// Task content
        content: String,
        /// Column to add to (default: the column for the status, else the first)
        #[arg(long)]
        column: Option<String>,
        /// todo, doing or done
        #[arg(long)]
        status: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Explicit task id
        #[arg(long)]
        id: Option<String>,
        /// Position in the column (default: end)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Move a task to a column
    Move {
        id: String,
        column: String,
        /// Position in the column (default: end)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Remove a task
    Remove { id: String },

    /// Set one field of a task: content, status or priority
    Update { id: String, key: String, value: String },

    /// Drag a card onto a column, going through the card, column and board units
    Drag {
        id: String,
        /// Column to drop on
        to: String,
        /// Slot under the pointer at drop time
        #[arg(long)]
        index: Option<usize>,
        /// Release outside any column instead of dropping
        #[arg(long)]
        cancel: bool,
    },

    /// List the board operations and their parameters
    Ops {
        /// Only this operation, e.g. "move task"
        op: Option<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Show { activity: false })
    }

    /// Command-line flags win over the config file
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(seed) = &self.seed {
            config.seed = Some(seed.clone());
        }
        if let Some(page) = &self.page {
            config.page = Some(page.clone());
        }
        if let Some(id) = &self.mount_id {
            config.mount_id = id.clone();
        }
        if let Some(title) = &self.title {
            config.title = Some(title.clone());
        }
    }

    /// Tracing filter: `--debug` / `--verbose` / `--quiet`, then `RUST_LOG`, then config
    pub fn log_filter(&self, config: &AppConfig) -> Option<String> {
        if self.debug {
            Some("debug".to_string())
        } else if self.verbose {
            Some("info".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else if std::env::var_os("RUST_LOG").is_some() {
            None
        } else {
            Some(config.log_level.clone())
        }
    }
}
