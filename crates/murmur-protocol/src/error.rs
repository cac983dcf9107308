//! Error types for the protocol layer.

/// Errors that can occur while classifying a request line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The request line matches none of the known routes.
    #[error("unrecognized request: {0}")]
    Unrecognized(String),

    /// The `last` cursor of a pull is not a valid `u64`.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),
}
