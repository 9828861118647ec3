//! The polymorphic agent contract.

use async_trait::async_trait;
use relay_core::{AgentKind, AgentResult};

use crate::error::AgentError;

/// A capability-specific executor.
///
/// One implementation exists per [`AgentKind`]; the router's decision is the
/// discriminant for a single dispatch call. Implementations must run with an
/// unavailable generation backend without erroring: the shared policy is to
/// return a clearly marked placeholder via [`offline_result`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// Which variant this agent implements.
    fn kind(&self) -> AgentKind;

    /// Execute the task and produce a result.
    async fn execute(&self, task: &str) -> Result<AgentResult, AgentError>;
}

/// Placeholder result used by every agent when no generation backend is
/// configured.
pub(crate) fn offline_result(role: &str, task: &str) -> AgentResult {
    AgentResult::text_only(format!("[mock] {role} executed task: {task}"))
}
