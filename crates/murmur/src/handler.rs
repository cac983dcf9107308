//! Per-connection handler: read one request, route it, reply, close.

use std::sync::Arc;

use murmur_transport::{Connection, TcpConnection};

use crate::{ChatError, RequestRouter};

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    mut conn: TcpConnection,
    router: Arc<RequestRouter>,
) -> Result<(), ChatError> {
    let conn_id = conn.id();
    let peer = conn.peer_addr();

    let Some(line) = conn.read_request().await? else {
        tracing::debug!(%conn_id, "connection closed before request");
        return Ok(());
    };
    tracing::debug!(%conn_id, %peer, request = %line, "request received");

    let response = router.route_line(&line).await;
    let bytes = response.encode();
    conn.send(&bytes).await?;
    tracing::debug!(%conn_id, bytes = bytes.len(), "replied");

    if let Err(e) = conn.close().await {
        tracing::trace!(%conn_id, error = %e, "close failed");
    }
    Ok(())
}
