//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Relay.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Task description was empty after trimming.
    #[error("Task cannot be empty")]
    EmptyTask,
}
