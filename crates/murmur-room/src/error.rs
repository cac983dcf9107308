//! Error types for the room layer.

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Room names must be non-empty and contain no `/` or space.
    #[error("invalid room name: {0:?}")]
    InvalidName(String),
}
