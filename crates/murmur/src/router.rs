//! Request routing: classified request → room operation → response.

use std::sync::Arc;

use murmur_protocol::{Request, Response};
use murmur_room::RoomRegistry;

use crate::ChatError;

/// The chat page served for every room.
pub const CHAT_HTML: &str = include_str!("../assets/chat.html");

/// Routes requests to the registry it holds.
pub struct RequestRouter {
    registry: Arc<RoomRegistry>,
}

impl RequestRouter {
    /// Creates a router over `registry`.
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// The registry requests are routed to.
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Classifies a raw request line and routes it. Anything that can't
    /// be routed becomes the fixed not-found response.
    pub async fn route_line(&self, line: &str) -> Response {
        let result = match Request::parse(line) {
            Ok(request) => self.route(request).await,
            Err(e) => Err(ChatError::Protocol(e)),
        };
        result.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "request not routed");
            Response::not_found()
        })
    }

    /// Runs a classified request against the registry.
    ///
    /// A pull may wait up to the registry's poll timeout.
    pub async fn route(&self, request: Request) -> Result<Response, ChatError> {
        match request {
            Request::Page { .. } => Ok(Response::html(CHAT_HTML)),
            Request::Pull { room, last } => {
                let room = self.registry.get_or_create(&room).await?;
                Ok(Response::text(room.pull(last).await))
            }
            Request::Push { room, msg } => {
                self.registry.broadcast_push(&room, &msg).await?;
                Ok(Response::text("ack"))
            }
        }
    }
}
