//! Error types for the dispatch layer.

/// Errors that can occur when submitting work.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Every worker has stopped, so the queue no longer has a consumer.
    #[error("worker pool is closed")]
    Closed,
}
