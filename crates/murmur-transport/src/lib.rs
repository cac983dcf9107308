//! Transport abstraction layer for Murmur.
//!
//! Provides the [`Transport`] and [`Connection`] traits that the server
//! accept loop and request handler are written against, plus the TCP
//! implementation ([`TcpTransport`], [`TcpConnection`]).
//!
//! The protocol is one request per connection: read the request line,
//! write one fully buffered response, close.

#![allow(async_fn_in_trait)]

mod error;
mod tcp;

pub use error::TransportError;
pub use tcp::{TcpConnection, TcpTransport, HEADER_DRAIN_TIMEOUT, MAX_LINE_BYTES, READ_TIMEOUT};

use std::fmt;
use std::net::SocketAddr;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// Returns the address this transport is listening on.
    fn local_addr(&self) -> std::io::Result<SocketAddr>;
}

/// A single request/response exchange with a peer.
pub trait Connection: Send + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Reads the request line, then makes a best-effort pass discarding
    /// the remaining header lines up to the blank line. A slow or
    /// oversized header section doesn't fail the request.
    ///
    /// Returns `Ok(None)` when the peer closed without sending anything.
    async fn read_request(&mut self) -> Result<Option<String>, Self::Error>;

    /// Writes a complete response and flushes it.
    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Shuts down the write side of the connection.
    async fn close(&mut self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "conn-7");
    }
}
