//! The worker pool.
//!
//! Workers share one unbounded FIFO receiver behind a fair mutex. The
//! worker holding the mutex is the one parked on `recv`; the rest queue
//! on the mutex in order. A submit therefore wakes exactly one idle
//! worker, and a task submitted while every worker is busy waits in the
//! queue until one frees up. Nothing is dropped, reordered, or cancelled.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::{mpsc, Mutex};

use crate::DispatchError;

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 8;

/// A unit of work: a boxed future run to completion by one worker.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

type SharedQueue = Arc<Mutex<mpsc::UnboundedReceiver<Task>>>;

/// A fixed set of workers draining a FIFO task queue.
pub struct WorkerPool {
    sender: mpsc::UnboundedSender<Task>,
    size: usize,
}

impl WorkerPool {
    /// Spawns `size` workers on the current Tokio runtime. A size of 0
    /// is raised to 1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue: SharedQueue = Arc::new(Mutex::new(receiver));

        for worker in 0..size {
            tokio::spawn(run_worker(worker, Arc::clone(&queue)));
        }
        tracing::info!(workers = size, "worker pool started");

        Self { sender, size }
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Appends a task to the tail of the queue.
    pub fn submit<F>(&self, task: F) -> Result<(), DispatchError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.sender
            .send(Box::pin(task))
            .map_err(|_| DispatchError::Closed)
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

/// Worker loop: take the head of the queue, run it, repeat. Exits only
/// once the pool (and so the sender) is dropped.
async fn run_worker(worker: usize, queue: SharedQueue) {
    tracing::debug!(worker, "worker started");
    loop {
        // The guard is released as soon as a task is taken, before it runs.
        let task = queue.lock().await.recv().await;
        let Some(task) = task else {
            break;
        };

        // A panicking task must not take the worker down with it.
        if let Err(panic) = AssertUnwindSafe(task).catch_unwind().await {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(worker, %reason, "task panicked");
        }
    }
    tracing::debug!(worker, "worker stopped");
}
