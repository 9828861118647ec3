//! Dispatch queue between submission and the worker pool.
//!
//! Delivery is at-least-once at the contract level: the downstream worker
//! path is an idempotent overwrite keyed by job id, so a redelivered unit
//! replaces rather than corrupts the terminal record. The in-process
//! channel itself never redelivers, but a durable broker behind the same
//! interface may.

use std::sync::Arc;

use relay_core::{JobId, TaskRequest};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

/// One unit of work flowing from submission to a worker.
#[derive(Debug)]
pub struct Dispatch {
    pub job_id: JobId,
    pub request: TaskRequest,
}

/// Queue submission errors.
#[derive(Debug, Error)]
pub enum QueueError {
    /// All receivers are gone; the process is shutting down.
    #[error("dispatch queue is closed")]
    Closed,
}

/// Submission handle. Cheap to clone; never blocks on execution.
#[derive(Clone)]
pub struct DispatchQueue {
    tx: mpsc::UnboundedSender<Dispatch>,
}

impl DispatchQueue {
    /// Enqueue a job. Returns immediately.
    pub fn submit(&self, job_id: JobId, request: TaskRequest) -> Result<(), QueueError> {
        self.tx
            .send(Dispatch { job_id, request })
            .map_err(|_| QueueError::Closed)
    }
}

/// Consumption handle, shared across the worker pool. Each dispatch unit is
/// delivered to exactly one of the competing workers.
#[derive(Clone)]
pub struct DispatchReceiver {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Dispatch>>>,
}

impl DispatchReceiver {
    /// Await the next unit. `None` once the queue is closed and drained.
    pub async fn dequeue(&self) -> Option<Dispatch> {
        self.rx.lock().await.recv().await
    }
}

/// Create a connected queue/receiver pair.
pub fn channel() -> (DispatchQueue, DispatchReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        DispatchQueue { tx },
        DispatchReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_then_dequeue() {
        let (queue, receiver) = channel();
        let job_id = JobId::generate();
        let request = TaskRequest::new("do something").unwrap();
        queue.submit(job_id.clone(), request).unwrap();

        let dispatch = receiver.dequeue().await.unwrap();
        assert_eq!(dispatch.job_id, job_id);
        assert_eq!(dispatch.request.description, "do something");
    }

    #[tokio::test]
    async fn test_each_unit_goes_to_one_consumer() {
        let (queue, receiver) = channel();
        for i in 0..4 {
            queue
                .submit(JobId::generate(), TaskRequest::new(format!("task {i}")).unwrap())
                .unwrap();
        }
        drop(queue);

        let a = receiver.clone();
        let b = receiver.clone();
        let (got_a, got_b) = tokio::join!(
            async {
                let mut n = 0;
                while a.dequeue().await.is_some() {
                    n += 1;
                }
                n
            },
            async {
                let mut n = 0;
                while b.dequeue().await.is_some() {
                    n += 1;
                }
                n
            }
        );
        assert_eq!(got_a + got_b, 4);
    }

    #[tokio::test]
    async fn test_submit_after_close_errors() {
        let (queue, receiver) = channel();
        drop(receiver);
        let err = queue
            .submit(JobId::generate(), TaskRequest::new("late").unwrap())
            .unwrap_err();
        assert!(matches!(err, QueueError::Closed));
    }
}
