//! HTTP handlers for submission and status polling.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use relay_core::{JobId, TaskRequest};
use tracing::{error, info};

use crate::http::responses::{
    ErrorResponse, ExecuteRequest, QueuedResponse, StatusResponse, TaskResultResponse,
};
use crate::state::AppState;

/// Service banner.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Relay backend is running" }))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Submit a task for async processing. Fire-and-forget: returns the job id
/// immediately; progress is observable via the status endpoint.
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExecuteRequest>,
) -> impl IntoResponse {
    let request = match TaskRequest::new(body.task) {
        Ok(request) => request,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    let job_id = JobId::generate();
    state.store.mark_queued(&job_id).await;

    if let Err(err) = state.queue.submit(job_id.clone(), request) {
        error!(job_id = %job_id, error = %err, "failed to queue task");
        state.store.remove(&job_id).await;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to queue task".to_string(),
            }),
        )
            .into_response();
    }

    info!(job_id = %job_id, "task queued");
    Json(QueuedResponse {
        task_id: job_id.into_inner(),
        status: relay_core::JobStatus::Queued,
        message: "Task queued. Check status via GET /status/{task_id}".to_string(),
    })
    .into_response()
}

/// Execute a task synchronously through the same pipeline the workers use.
/// Intended for testing and debugging, not production load.
pub async fn execute_sync(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExecuteRequest>,
) -> impl IntoResponse {
    let request = match TaskRequest::new(body.task) {
        Ok(request) => request,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    let job_id = JobId::generate();
    state.store.mark_queued(&job_id).await;
    let record = state
        .pipeline
        .process(job_id, &request.description)
        .await;

    Json(TaskResultResponse::from(record)).into_response()
}

/// Get status and result of a submitted task. Unknown ids report an
/// explicit `not_found` status.
pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    let job_id = JobId::from(task_id.clone());
    match state.store.get(&job_id).await {
        Some(record) => Json(StatusResponse::known(record)),
        None => Json(StatusResponse::not_found(task_id)),
    }
}
