//! History entries.

use std::fmt;

/// Id assigned to a message by the room that stores it.
///
/// Strictly increasing within one room, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub body: String,
}

impl Message {
    /// Appends this message as one `"<id>: <body>\n"` line.
    pub(crate) fn write_line(&self, out: &mut String) {
        use fmt::Write;
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}: {}", self.id, self.body);
    }
}
