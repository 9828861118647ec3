//! Agent execution errors.

use crate::generate::GeneratorError;
use thiserror::Error;

/// Errors that can occur during agent execution.
///
/// These become the `failed` terminal state of a job; they never crash the
/// worker processing the job.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("generation backend error: {0}")]
    Generation(#[from] GeneratorError),

    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}
