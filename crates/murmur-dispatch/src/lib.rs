//! Fixed-size worker pool for Murmur.
//!
//! The accept loop only enqueues; a fixed set of workers drains the
//! queue in arrival order and runs each task to completion. This bounds
//! how many requests are handled at once no matter how many connections
//! are pending. A long-poll holds its worker for the whole wait, so a
//! burst of pollers can occupy every worker.

mod error;
mod pool;

pub use error::DispatchError;
pub use pool::{Task, WorkerPool, DEFAULT_WORKERS};
