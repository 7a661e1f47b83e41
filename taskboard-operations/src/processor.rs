//! Operation processors wrap execution with auditing

use crate::{Execute, Operation};
use async_trait::async_trait;
use serde_json::Value;

/// Executes operations and takes care of their log entries.
///
/// Implementations decide where entries go (memory, files, nowhere) and may
/// stamp them with an actor before storing them.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + Operation + Send + Sync;
}
