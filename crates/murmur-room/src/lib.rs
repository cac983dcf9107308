//! Room histories for Murmur.
//!
//! Each room keeps a bounded log of recent messages and lets readers
//! long-poll for anything newer than a cursor. The registry owns every
//! room plus the aggregate `all` room that mirrors every push.
//!
//! # Key types
//!
//! - [`RoomState`]: one room's bounded history and long-poll wakeups
//! - [`RoomRegistry`]: name → room lookup and ordered fan-out
//! - [`Message`], [`MessageId`]: history entries
//! - [`RoomConfig`]: history capacity and poll timeout

mod config;
mod error;
mod message;
mod registry;
mod room;

pub use config::RoomConfig;
pub use error::RoomError;
pub use message::{Message, MessageId};
pub use registry::{RoomRegistry, AGGREGATE_ROOM};
pub use room::RoomState;
