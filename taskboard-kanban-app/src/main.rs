//! Taskboard - drive a kanban board from the command line.
//!
//! Commands:
//! - `taskboard show [--activity]`: Print the board
//! - `taskboard add <content>`: Add a task
//! - `taskboard move <id> <column>`: Move a task
//! - `taskboard remove <id>`: Remove a task
//! - `taskboard update <id> <key> <value>`: Change one task field
//! - `taskboard drag <id> <column>`: Drag a card onto a column
//! - `taskboard ops [op]`: List board operations
//!
//! Exit codes:
//! - 0: Success
//! - 1: The command was rejected
//! - 2: Startup failed (config, host page, mount point or seed)

mod bootstrap;
mod cli;
mod commands;
mod error;
mod render;
mod state;

use clap::Parser;
use cli::Cli;
use error::AppError;
use state::{AppConfig, AppContext};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    cli.apply_overrides(&mut config);

    let filter = match cli.log_filter(&config) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = runtime.block_on(run(cli, config)) {
        exit_with(&e);
    }
}

async fn run(cli: Cli, config: AppConfig) -> error::Result<()> {
    let mut ctx = AppContext::bootstrap(config).await?;
    tracing::debug!(mount = %ctx.mount.id, actor = %ctx.config.actor, "running command");
    let output = commands::run(&mut ctx, cli.command()).await?;
    println!("{}", render::render(&output, cli.json)?);
    Ok(())
}

fn exit_with(error: &AppError) -> ! {
    tracing::debug!(?error, "exiting");
    eprintln!("Error: {}", error);
    std::process::exit(if error.is_startup() { 2 } else { 1 });
}
