//! Relay Server
//!
//! The serving half of Relay: the axum HTTP surface, the dispatch queue,
//! the job store, the audit log, and the worker pool that drives jobs
//! through the routing/execution pipeline.

pub mod audit;
pub mod config;
pub mod http;
pub mod queue;
pub mod state;
pub mod worker;

pub use audit::{AuditError, AuditLog, JsonlAuditLog};
pub use config::Config;
pub use queue::{Dispatch, DispatchQueue, DispatchReceiver, QueueError};
pub use state::{AppState, JobStore};
pub use worker::Pipeline;
