//! Request-line classification.
//!
//! Only the first line of a request matters. Three shapes are routed:
//!
//! ```text
//! GET  /<room>/chat.html        HTTP/x.y
//! POST /<room>/pull?last=<u64>  HTTP/x.y
//! POST /<room>/push?msg=<text>  HTTP/x.y
//! ```
//!
//! `<room>` is any non-empty token without `/` or space. Everything else
//! is [`ProtocolError::Unrecognized`].

use crate::ProtocolError;

/// A classified request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the static chat page for a room.
    Page { room: String },
    /// Long-poll for messages newer than `last`.
    Pull { room: String, last: u64 },
    /// Post a message to a room. `msg` is kept exactly as it appeared
    /// in the query string.
    Push { room: String, msg: String },
}

impl Request {
    /// Classifies a single request line (without the trailing newline).
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let unrecognized = || ProtocolError::Unrecognized(line.to_string());

        let (method, rest) = line.split_once(' ').ok_or_else(unrecognized)?;
        let (target, version) = rest.split_once(' ').ok_or_else(unrecognized)?;
        if !version.starts_with("HTTP") {
            return Err(unrecognized());
        }

        let path = target.strip_prefix('/').ok_or_else(unrecognized)?;
        let (room, action) = path.split_once('/').ok_or_else(unrecognized)?;
        if room.is_empty() {
            return Err(unrecognized());
        }
        let room = room.to_string();

        match method {
            "GET" if action == "chat.html" => Ok(Self::Page { room }),
            "POST" => {
                if let Some(cursor) = action.strip_prefix("pull?last=") {
                    if cursor.is_empty() || !cursor.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(unrecognized());
                    }
                    let last = cursor
                        .parse()
                        .map_err(|_| ProtocolError::InvalidCursor(cursor.to_string()))?;
                    Ok(Self::Pull { room, last })
                } else if let Some(msg) = action.strip_prefix("push?msg=") {
                    Ok(Self::Push {
                        room,
                        msg: msg.to_string(),
                    })
                } else {
                    Err(unrecognized())
                }
            }
            _ => Err(unrecognized()),
        }
    }

    /// The room this request targets.
    pub fn room(&self) -> &str {
        match self {
            Self::Page { room } | Self::Pull { room, .. } | Self::Push { room, .. } => room,
        }
    }
}
