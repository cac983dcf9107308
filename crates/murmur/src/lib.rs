//! # Murmur
//!
//! Multi-room long-polling chat server.
//!
//! Clients post messages to a named room and long-poll for anything
//! newer than the last id they saw. The reserved `all` room mirrors every
//! push to every room in one global order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use murmur::prelude::*;
//!
//! # async fn start() -> Result<(), ChatError> {
//! let server = ChatServer::builder().bind("0.0.0.0:8080").build().await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod router;
mod server;

pub use error::ChatError;
pub use router::{RequestRouter, CHAT_HTML};
pub use server::{ChatServer, ChatServerBuilder, DEFAULT_PORT};

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::{ChatError, ChatServer, ChatServerBuilder, RequestRouter};
    pub use murmur_dispatch::{WorkerPool, DEFAULT_WORKERS};
    pub use murmur_protocol::{Request, Response};
    pub use murmur_room::{Message, MessageId, RoomConfig, RoomRegistry, RoomState, AGGREGATE_ROOM};
}
