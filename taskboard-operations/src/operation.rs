//! The `Operation` and `Execute` traits

use crate::{ExecutionResult, ParamMeta};
use async_trait::async_trait;
use serde_json::Value;

/// Static metadata of an operation, normally derived with `#[operation]`
pub trait Operation {
    /// The action, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The thing acted on, e.g. "task"
    fn noun(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn parameters(&self) -> &'static [ParamMeta];

    /// Canonical "verb noun" string used in log entries
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context `C`, failing with `E`
#[async_trait]
pub trait Execute<C, E>: Operation
where
    C: Send + Sync,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// Ids of the resources a successful result touched
    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        Vec::new()
    }
}
