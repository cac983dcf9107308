//! `ChatServer` builder and accept loop.
//!
//! This is the entry point for running a Murmur server. It ties the
//! layers together: transport → worker pool → router → rooms.

use std::sync::Arc;

use murmur_dispatch::{WorkerPool, DEFAULT_WORKERS};
use murmur_room::{RoomConfig, RoomRegistry};
use murmur_transport::{Connection, TcpTransport, Transport};

use crate::handler::handle_connection;
use crate::{ChatError, RequestRouter};

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 8080;

/// Builder for configuring and starting a Murmur server.
///
/// # Example
///
/// ```rust,ignore
/// use murmur::prelude::*;
///
/// let server = ChatServer::builder()
///     .bind("0.0.0.0:8080")
///     .workers(8)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct ChatServerBuilder {
    bind_addr: String,
    workers: usize,
    room_config: RoomConfig,
}

impl ChatServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            workers: DEFAULT_WORKERS,
            room_config: RoomConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the number of request-handling workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the history capacity and poll timeout for every room.
    pub fn room_config(mut self, config: RoomConfig) -> Self {
        self.room_config = config;
        self
    }

    /// Binds the listener and starts the worker pool.
    ///
    /// Fails only if the address can't be bound.
    pub async fn build(self) -> Result<ChatServer, ChatError> {
        let transport = TcpTransport::bind(&self.bind_addr).await?;
        let registry = Arc::new(RoomRegistry::new(self.room_config));
        let router = Arc::new(RequestRouter::new(registry));
        let pool = WorkerPool::new(self.workers);

        Ok(ChatServer {
            transport,
            router,
            pool,
        })
    }
}

impl Default for ChatServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Murmur server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct ChatServer {
    transport: TcpTransport,
    router: Arc<RequestRouter>,
    pool: WorkerPool,
}

impl ChatServer {
    /// Creates a new builder.
    pub fn builder() -> ChatServerBuilder {
        ChatServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// The registry holding every room.
    pub fn registry(&self) -> Arc<RoomRegistry> {
        Arc::clone(self.router.registry())
    }

    /// Number of request-handling workers.
    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Runs the accept loop.
    ///
    /// Each accepted connection is queued for the worker pool. A failed
    /// accept or a failed connection is logged and the loop continues.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), ChatError> {
        tracing::info!(workers = self.pool.size(), "Murmur server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let router = Arc::clone(&self.router);
                    self.pool.submit(async move {
                        let conn_id = conn.id();
                        if let Err(e) = handle_connection(conn, router).await {
                            tracing::warn!(%conn_id, error = %e, "connection dropped");
                        }
                    })?;
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
