//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use relay_core::{JobId, JobStatus, TaskRecord};
use tokio::sync::RwLock;

use crate::queue::DispatchQueue;
use crate::worker::Pipeline;

/// Authoritative current-status index, keyed by job id.
///
/// Concurrent writes from multiple workers land on independent keys; under
/// at-least-once redelivery two terminal writes for the same id may race and
/// last write wins.
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, TaskRecord>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Record a freshly submitted job as queued.
    pub async fn mark_queued(&self, job_id: &JobId) {
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), TaskRecord::queued(job_id.clone()));
    }

    /// Mark a dequeued job as running. Terminal records are left alone so a
    /// redelivery cannot resurrect a finished job.
    pub async fn mark_running(&self, job_id: &JobId) {
        let mut jobs = self.jobs.write().await;
        let record = jobs
            .entry(job_id.clone())
            .or_insert_with(|| TaskRecord::queued(job_id.clone()));
        if !record.is_terminal() {
            record.status = JobStatus::Running;
        }
    }

    /// Write a record, replacing any previous state (last write wins).
    pub async fn upsert(&self, record: TaskRecord) {
        self.jobs.write().await.insert(record.job_id.clone(), record);
    }

    /// Point read of the current record.
    pub async fn get(&self, job_id: &JobId) -> Option<TaskRecord> {
        self.jobs.read().await.get(job_id).cloned()
    }

    /// Drop a record (submission rollback when enqueueing fails).
    pub async fn remove(&self, job_id: &JobId) {
        self.jobs.write().await.remove(job_id);
    }

    /// True when no jobs have been recorded.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state handed to the HTTP layer.
pub struct AppState {
    /// Authoritative job status index.
    pub store: Arc<JobStore>,

    /// Submission handle into the dispatch queue.
    pub queue: DispatchQueue,

    /// The routing/execution pipeline, shared with the worker pool so the
    /// sync endpoint produces records identical to queued execution.
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(store: Arc<JobStore>, queue: DispatchQueue, pipeline: Arc<Pipeline>) -> Arc<Self> {
        Arc::new(Self {
            store,
            queue,
            pipeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{AgentKind, AgentResult, RouteDecision};

    #[tokio::test]
    async fn test_unknown_job_is_absent() {
        let store = JobStore::new();
        assert!(store.is_empty().await);
        assert!(store.get(&JobId::generate()).await.is_none());
    }

    #[tokio::test]
    async fn test_queued_then_running_then_terminal() {
        let store = JobStore::new();
        let job_id = JobId::generate();

        store.mark_queued(&job_id).await;
        assert_eq!(store.get(&job_id).await.unwrap().status, JobStatus::Queued);

        store.mark_running(&job_id).await;
        assert_eq!(store.get(&job_id).await.unwrap().status, JobStatus::Running);

        let decision = RouteDecision {
            agent: AgentKind::Content,
            reasoning: "default".to_string(),
        };
        store
            .upsert(TaskRecord::completed(
                job_id.clone(),
                decision,
                AgentResult::text_only("done"),
            ))
            .await;
        assert_eq!(store.get(&job_id).await.unwrap().status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn test_mark_running_does_not_resurrect_terminal_record() {
        let store = JobStore::new();
        let job_id = JobId::generate();
        store
            .upsert(TaskRecord::failed(job_id.clone(), "boom"))
            .await;

        store.mark_running(&job_id).await;
        assert_eq!(store.get(&job_id).await.unwrap().status, JobStatus::Failed);
    }
}
