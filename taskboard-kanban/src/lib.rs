//! Kanban board engine
//!
//! This crate holds a single kanban board in memory: ordered columns, each
//! holding an ordered list of tasks. Every change goes through a command
//! (an [`Operation`]) executed against a [`KanbanContext`], so mutations are
//! atomic, observable as [`BoardEvent`]s and recorded in an activity log.
//!
//! ## Overview
//!
//! - **Entity model** - [`Task`], [`Column`], [`Board`] in [`types`]
//! - **Commands** - [`board`], [`column`] and [`task`] operations
//! - **Drag and drop** - payload types plus the [`drag::DragSession`] gesture tracker
//! - **Components** - [`components::TaskCard`], [`components::KanbanColumn`] and
//!   [`components::KanbanBoard`], which owns the board and applies column events
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard_kanban::{board::InitBoard, task::{AddTask, MoveTask}, Execute, KanbanContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::new();
//! InitBoard::new("My Project")
//!     .with_default_columns()
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! let task = AddTask::new("Implement feature X")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! MoveTask::to_column(task["id"].as_str().unwrap_or_default(), "doing")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! # Ok(())
//! # }
//! ```

mod context;
pub mod drag;
mod error;
mod processor;
pub mod schema;
pub mod seed;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod task;

pub mod components;

// Re-export Execute trait and types from operations crate
pub use taskboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use context::KanbanContext;
pub use error::{KanbanError, Result};
pub use processor::KanbanOperationProcessor;
pub use seed::Seed;

// Re-export commonly used types
pub use types::{
    Board, BoardEvent, BoardId, Column, ColumnId, Position, Priority, Task, TaskId, TaskStatus,
    TaskUpdate, UpdateTaskPayload,
};
