//! Wire protocol for Murmur.
//!
//! This crate defines the text protocol clients and the server speak:
//!
//! - **Requests** ([`Request`]): classification of an HTTP-style
//!   request line into a page fetch, a pull, or a push.
//! - **Responses** ([`Response`], [`Status`], [`ContentType`]): fully
//!   buffered replies with a declared `Content-Length`.
//! - **Errors** ([`ProtocolError`]): request lines that match no route.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw lines and bytes) and
//! the router. It doesn't know about sockets or rooms.
//!
//! ```text
//! Transport (line) → Protocol (Request) → Router → Protocol (Response) → Transport (bytes)
//! ```

mod error;
mod request;
mod response;

pub use error::ProtocolError;
pub use request::Request;
pub use response::{ContentType, Response, Status};
