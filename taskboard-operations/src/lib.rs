//! # Taskboard Operations
//!
//! Every board mutation and query is an operation: a plain struct whose fields
//! are its parameters. The `#[operation]` attribute derives the metadata
//! (verb, noun, description, parameters) and the struct implements
//! [`Execute`] against whatever context it needs.
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_operations::*;
//!
//! #[operation(verb = "add", noun = "task", description = "Create a new task")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddTask {
//!     /// The task content
//!     pub content: String,
//!     /// Target column
//!     pub column: Option<String>,
//! }
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for AddTask {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // mutate through ctx, return ExecutionResult::Logged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod parameter;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::{ParamMeta, ParamType};
pub use processor::OperationProcessor;

// Re-export proc macros
pub use taskboard_operations_macros::operation;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
