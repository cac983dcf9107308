//! TCP transport implementation.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Longest request or header line accepted, in bytes.
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// How long a peer has to deliver its request line.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to keep draining header lines once the request line is in.
pub const HEADER_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Upper bound on header lines drained after the request line.
const MAX_HEADER_LINES: usize = 100;

/// A TCP [`Transport`] that listens for incoming connections.
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Binds a new TCP transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "TCP transport listening");
        Ok(Self { listener })
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %addr, "accepted TCP connection");

        Ok(TcpConnection {
            id,
            peer: addr,
            stream: BufReader::new(stream),
        })
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// A single accepted TCP connection.
pub struct TcpConnection {
    id: ConnectionId,
    peer: SocketAddr,
    stream: BufReader<TcpStream>,
}

impl TcpConnection {
    /// The remote peer's address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Reads one line, refusing lines over [`MAX_LINE_BYTES`].
    /// Returns an empty string at end of stream.
    async fn read_line(&mut self) -> Result<String, TransportError> {
        let mut buf = Vec::new();
        let limit = MAX_LINE_BYTES as u64 + 1;
        (&mut self.stream)
            .take(limit)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if buf.len() > MAX_LINE_BYTES {
            return Err(TransportError::RequestTooLarge(MAX_LINE_BYTES));
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Discards header lines up to the blank line.
    async fn drain_headers(&mut self) -> Result<(), TransportError> {
        for _ in 0..MAX_HEADER_LINES {
            let header = self.read_line().await?;
            if header.trim_end_matches(['\r', '\n']).is_empty() {
                break;
            }
        }
        Ok(())
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn read_request(&mut self) -> Result<Option<String>, Self::Error> {
        let request_line = tokio::time::timeout(READ_TIMEOUT, self.read_line())
            .await
            .map_err(|_| TransportError::Timeout)??;
        if request_line.is_empty() {
            return Ok(None);
        }

        // The request line alone decides the route; headers are skipped
        // only so the close doesn't reset a peer with unread data.
        match tokio::time::timeout(HEADER_DRAIN_TIMEOUT, self.drain_headers()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!(id = %self.id, error = %e, "header drain failed"),
            Err(_) => tracing::debug!(id = %self.id, "header drain timed out"),
        }

        Ok(Some(request_line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let stream = self.stream.get_mut();
        stream
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        stream.flush().await.map_err(TransportError::SendFailed)
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        self.stream
            .get_mut()
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
