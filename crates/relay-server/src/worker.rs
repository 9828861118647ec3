//! Worker loop and the routing/execution pipeline.

use std::sync::Arc;

use relay_agents::{Agent, Router};
use relay_core::{AgentKind, JobId, TaskRecord};
use tracing::{error, info, warn};

use crate::audit::AuditLog;
use crate::queue::DispatchReceiver;
use crate::state::JobStore;

/// The full per-job pipeline: route, execute, persist, audit.
///
/// Constructed once at process start with explicit collaborators and shared
/// by every worker and the synchronous endpoint. Safe to re-run for the same
/// job id: the store write is an idempotent overwrite.
pub struct Pipeline {
    router: Router,
    developer: Arc<dyn Agent>,
    content: Arc<dyn Agent>,
    store: Arc<JobStore>,
    audit: Arc<dyn AuditLog>,
}

impl Pipeline {
    pub fn new(
        router: Router,
        developer: Arc<dyn Agent>,
        content: Arc<dyn Agent>,
        store: Arc<JobStore>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            router,
            developer,
            content,
            store,
            audit,
        }
    }

    /// Drive one job to a terminal record.
    ///
    /// Agent failures become a `failed` record rather than propagating. The
    /// store write is the one step that must land; the audit append is
    /// strictly fire-and-forget and cannot influence the returned record.
    pub async fn process(&self, job_id: JobId, task: &str) -> TaskRecord {
        self.store.mark_running(&job_id).await;

        let decision = self.router.route(task).await;
        let agent = match decision.agent {
            AgentKind::Developer => &self.developer,
            AgentKind::Content => &self.content,
        };

        let record = match agent.execute(task).await {
            Ok(result) => TaskRecord::completed(job_id, decision, result),
            Err(err) => {
                error!(error = %err, "agent execution failed");
                TaskRecord::failed(job_id, err.to_string())
            }
        };

        self.store.upsert(record.clone()).await;

        if let Err(err) = self.audit.append(&record).await {
            warn!(job_id = %record.job_id, error = %err, "audit append failed");
        }

        record
    }
}

/// One worker of the pool: pulls dispatch units until the queue closes.
///
/// Each worker processes one job at a time; a slow agent call only occupies
/// this worker, never the pool.
pub async fn run_worker(worker_id: usize, receiver: DispatchReceiver, pipeline: Arc<Pipeline>) {
    info!(worker_id, "worker started");
    while let Some(dispatch) = receiver.dequeue().await {
        info!(worker_id, job_id = %dispatch.job_id, "picked up job");
        let record = pipeline
            .process(dispatch.job_id, &dispatch.request.description)
            .await;
        info!(
            worker_id,
            job_id = %record.job_id,
            status = record.status.as_str(),
            "job finished"
        );
    }
    info!(worker_id, "queue closed, worker exiting");
}
