//! Async request worker.
//!
//! The worker owns a [`GroupAssigner`] and answers [`GroupingRequest`]s
//! arriving over a bounded channel. Each request carries its own reply
//! channel and gets exactly one [`GroupingResponse`] on it.
//!
//! Requests are handled one at a time, each to completion. The computation
//! itself runs on tokio's blocking pool so it never stalls the runtime.
//!
//! # Example
//!
//! ```
//! use elephant_groups::protocol::GroupingRequest;
//! use elephant_groups::worker::GroupingWorker;
//! use elephant_groups::GroupingConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let worker = GroupingWorker::spawn(GroupingConfig::default());
//! let response = worker.submit(GroupingRequest::new(4)).await?;
//! assert_eq!(response.result().unwrap().min_groups, 4);
//! worker.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::GroupingConfig;
use crate::grouping::GroupAssigner;
use crate::protocol::{respond, GroupingRequest, GroupingResponse};

/// Errors talking to a [`GroupingWorker`].
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The worker has stopped accepting requests.
    #[error("grouping worker is closed")]
    Closed,

    /// The worker went away without replying.
    #[error("grouping worker dropped the request")]
    Dropped,

    /// The worker task panicked or was cancelled.
    #[error("grouping worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

struct Envelope {
    request: GroupingRequest,
    reply: oneshot::Sender<GroupingResponse>,
}

// ============================================================================
// HANDLE
// ============================================================================

/// Cloneable submission side of a [`GroupingWorker`].
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WorkerHandle {
    /// Submit a request and wait for its response.
    ///
    /// Waits for queue space if the queue is full.
    pub async fn submit(&self, request: GroupingRequest) -> Result<GroupingResponse, WorkerError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| WorkerError::Closed)?;
        response.await.map_err(|_| WorkerError::Dropped)
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// WORKER
// ============================================================================

/// A spawned worker task with its request queue.
#[derive(Debug)]
pub struct GroupingWorker {
    handle: WorkerHandle,
    task: JoinHandle<()>,
}

impl GroupingWorker {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(config: GroupingConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let assigner = Arc::new(GroupAssigner::new(config));
        let task = tokio::spawn(worker_loop(assigner, rx));
        Self {
            handle: WorkerHandle { tx },
            task,
        }
    }

    /// A cloneable handle for submitting from other tasks.
    pub fn handle(&self) -> WorkerHandle {
        self.handle.clone()
    }

    /// Submit a request and wait for its response.
    pub async fn submit(&self, request: GroupingRequest) -> Result<GroupingResponse, WorkerError> {
        self.handle.submit(request).await
    }

    /// Stop accepting requests and wait for the queue to drain.
    ///
    /// The worker keeps serving until every [`WorkerHandle`] obtained from
    /// [`handle`](Self::handle) has been dropped as well.
    pub async fn shutdown(self) -> Result<(), WorkerError> {
        let Self { handle, task } = self;
        drop(handle);
        task.await?;
        Ok(())
    }
}

// ============================================================================
// WORKER LOOP
// ============================================================================

async fn worker_loop(assigner: Arc<GroupAssigner>, mut rx: mpsc::Receiver<Envelope>) {
    info!(
        max_groups = assigner.config().max_groups,
        "grouping worker started"
    );
    let mut handled: u64 = 0;

    while let Some(Envelope { request, reply }) = rx.recv().await {
        let job = Arc::clone(&assigner);
        let response = match tokio::task::spawn_blocking(move || respond(&job, &request)).await {
            Ok(response) => response,
            Err(err) => GroupingResponse::failure(format!("grouping task failed: {err}")),
        };

        if reply.send(response).is_err() {
            debug!("requester went away before the reply");
        }
        handled += 1;
    }

    info!(handled, "grouping worker stopped");
}
