//! Response framing.
//!
//! Every response is fully buffered: status line, content type, declared
//! length, blank line, body. No chunked transfer.

use std::fmt;

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "200 OK"),
            Self::NotFound => write!(f, "404 Not Found"),
        }
    }
}

/// Body media type. Always sent with `charset=utf-8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Text,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "text/html"),
            Self::Text => write!(f, "text/plain"),
        }
    }
}

/// A complete response, ready to be encoded onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: ContentType,
    pub body: String,
}

impl Response {
    /// Body shown for any request that matches no route.
    pub const NOT_FOUND_BODY: &'static str = "Nobody here with that name.";

    /// A `200 OK` plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            content_type: ContentType::Text,
            body: body.into(),
        }
    }

    /// A `200 OK` HTML response.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            content_type: ContentType::Html,
            body: body.into(),
        }
    }

    /// The fixed `404` response.
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            content_type: ContentType::Text,
            body: Self::NOT_FOUND_BODY.to_string(),
        }
    }

    /// Encodes headers and body into a single buffer.
    pub fn encode(&self) -> Vec<u8> {
        let body = self.body.as_bytes();
        let head = format!(
            "HTTP/1.0 {}\r\nContent-Type: {}; charset=utf-8\r\nContent-Length: {}\r\n\r\n",
            self.status,
            self.content_type,
            body.len()
        );
        let mut out = Vec::with_capacity(head.len() + body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(body);
        out
    }
}
