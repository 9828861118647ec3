//! HTTP request and response types.

use relay_core::{AgentKind, JobStatus, TaskRecord};
use serde::{Deserialize, Serialize};

/// Body of the execute endpoints.
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    /// The task description provided by the user.
    pub task: String,
}

/// Response for an accepted async submission.
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub task_id: String,
    pub status: JobStatus,
    pub message: String,
}

/// Full task result, returned by the synchronous endpoint.
#[derive(Debug, Serialize)]
pub struct TaskResultResponse {
    pub task_id: String,
    pub status: JobStatus,
    pub result: Option<String>,
    pub agent: Option<AgentKind>,
    pub reasoning: Option<String>,
    pub file_path: Option<String>,
    pub error: Option<String>,
}

impl From<TaskRecord> for TaskResultResponse {
    fn from(record: TaskRecord) -> Self {
        Self {
            task_id: record.job_id.into_inner(),
            status: record.status,
            result: record.result,
            agent: record.agent,
            reasoning: record.reasoning,
            file_path: record.artifact_path,
            error: record.error,
        }
    }
}

/// Response of the status endpoint. `status` is a plain string so unknown
/// ids can report an explicit `not_found` instead of crashing.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub task_id: String,
    pub status: String,
    pub result: Option<String>,
    pub agent: Option<AgentKind>,
    pub file_path: Option<String>,
    pub error: Option<String>,
}

impl StatusResponse {
    /// Status view of a known job. Result text is only exposed for
    /// completed jobs and error text only for failed ones.
    pub fn known(record: TaskRecord) -> Self {
        let result = match record.status {
            JobStatus::Completed => record.result,
            _ => None,
        };
        let error = match record.status {
            JobStatus::Failed => record.error,
            _ => None,
        };
        Self {
            task_id: record.job_id.into_inner(),
            status: record.status.as_str().to_string(),
            result,
            agent: record.agent,
            file_path: record.artifact_path,
            error,
        }
    }

    /// Status view of a job id the store has never seen.
    pub fn not_found(task_id: String) -> Self {
        Self {
            task_id,
            status: "not_found".to_string(),
            result: None,
            agent: None,
            file_path: None,
            error: None,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
