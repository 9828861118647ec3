//! Relay Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Database
//! - Runtime specifics
//!
//! All types here represent the core business domain of Relay: jobs,
//! routing decisions, agent results, and the durable task record.

pub mod error;
pub mod ids;
pub mod record;
pub mod status;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::JobId;
pub use record::{AgentKind, AgentResult, RouteDecision, TaskRecord, TaskRequest};
pub use status::JobStatus;
