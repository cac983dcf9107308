//! Unified error type for Murmur.

use murmur_dispatch::DispatchError;
use murmur_protocol::ProtocolError;
use murmur_room::RoomError;
use murmur_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// A transport-level error (bind, accept, read, write).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request line matched no route.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The worker pool stopped accepting tasks.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
