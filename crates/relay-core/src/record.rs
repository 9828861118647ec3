//! Task request, routing decision, and durable record types.

use crate::{CoreError, JobId, JobStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A task submitted by a caller.
///
/// The description is immutable once submitted and must be non-empty
/// after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Free-form description of what the caller wants done.
    pub description: String,
}

impl TaskRequest {
    /// Create a new TaskRequest, validating the description.
    pub fn new(description: impl Into<String>) -> Result<Self, CoreError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(CoreError::EmptyTask);
        }
        Ok(Self { description })
    }
}

/// The closed set of agent variants a job can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Software development: coding, scripting, file creation.
    #[serde(rename = "dev_agent")]
    Developer,
    /// Research, general questions, creative writing.
    #[serde(rename = "content_agent")]
    Content,
}

impl AgentKind {
    /// Wire/persistence name of this agent variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "dev_agent",
            Self::Content => "content_agent",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the routing step. Produced once per job, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    /// The agent variant that will execute the job.
    pub agent: AgentKind,

    /// Why the router picked that agent.
    pub reasoning: String,
}

/// Outcome of a single agent invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Human-readable result text.
    pub text: String,

    /// Path of a generated artifact, if the agent produced one.
    pub artifact_path: Option<String>,
}

impl AgentResult {
    /// A result with text only, no artifact.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            artifact_path: None,
        }
    }
}

/// The durable, observable state of a job.
///
/// Created as `queued` at submission. A worker writes the terminal form
/// exactly once; under at-least-once delivery a redelivery may overwrite
/// it with an equivalent terminal record (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Correlation key across queue, store, and audit log.
    pub job_id: JobId,

    /// Current lifecycle status.
    pub status: JobStatus,

    /// The agent that handled the job, once routed.
    pub agent: Option<AgentKind>,

    /// Result text for completed jobs.
    pub result: Option<String>,

    /// Routing rationale.
    pub reasoning: Option<String>,

    /// Path of a generated artifact, if any.
    pub artifact_path: Option<String>,

    /// Error text for failed jobs.
    pub error: Option<String>,

    /// When the job reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// A freshly submitted job, not yet picked up.
    pub fn queued(job_id: JobId) -> Self {
        Self {
            job_id,
            status: JobStatus::Queued,
            agent: None,
            result: None,
            reasoning: None,
            artifact_path: None,
            error: None,
            finished_at: None,
        }
    }

    /// Terminal record for a successfully executed job.
    pub fn completed(job_id: JobId, decision: RouteDecision, result: AgentResult) -> Self {
        Self {
            job_id,
            status: JobStatus::Completed,
            agent: Some(decision.agent),
            result: Some(result.text),
            reasoning: Some(decision.reasoning),
            artifact_path: result.artifact_path,
            error: None,
            finished_at: Some(Utc::now()),
        }
    }

    /// Terminal record for a job whose agent invocation failed.
    pub fn failed(job_id: JobId, error: impl Into<String>) -> Self {
        Self {
            job_id,
            status: JobStatus::Failed,
            agent: None,
            result: None,
            reasoning: None,
            artifact_path: None,
            error: Some(error.into()),
            finished_at: Some(Utc::now()),
        }
    }

    /// Check if the record is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_whitespace() {
        assert!(TaskRequest::new("   ").is_err());
        assert!(TaskRequest::new("").is_err());
        assert!(TaskRequest::new("do something").is_ok());
    }

    #[test]
    fn test_agent_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&AgentKind::Developer).unwrap(),
            "\"dev_agent\""
        );
        assert_eq!(
            serde_json::to_string(&AgentKind::Content).unwrap(),
            "\"content_agent\""
        );
    }

    #[test]
    fn test_completed_record_is_terminal() {
        let decision = RouteDecision {
            agent: AgentKind::Content,
            reasoning: "default".to_string(),
        };
        let record = TaskRecord::completed(
            JobId::generate(),
            decision,
            AgentResult::text_only("answer"),
        );
        assert!(record.is_terminal());
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.agent, Some(AgentKind::Content));
        assert!(record.error.is_none());
        assert!(record.finished_at.is_some());
    }

    #[test]
    fn test_failed_record_preserves_error() {
        let record = TaskRecord::failed(JobId::generate(), "backend unavailable");
        assert!(record.is_terminal());
        assert_eq!(record.error.as_deref(), Some("backend unavailable"));
        assert!(record.result.is_none());
    }
}
