//! A single room: bounded history plus long-poll wakeups.
//!
//! All reads and writes of the history go through one mutex. A pull that
//! finds nothing newer than its cursor registers on the room's [`Notify`]
//! *before* releasing the lock, so a push that lands between the check
//! and the wait still wakes it. Every push wakes every registered waiter.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{Mutex, Notify};

use crate::{Message, MessageId, RoomConfig};

/// Bounded message log guarded by [`RoomState`].
struct History {
    messages: VecDeque<Message>,
    last_id: u64,
}

impl History {
    /// Renders every retained message with an id above `last`, oldest first.
    fn render_after(&self, last: u64) -> String {
        let mut out = String::new();
        // Ids are ascending, so skip the prefix that's already been seen.
        let start = self.messages.partition_point(|m| m.id.0 <= last);
        for msg in self.messages.range(start..) {
            msg.write_line(&mut out);
        }
        out
    }
}

/// One room's state.
///
/// Ids start at the wall-clock milliseconds of the room's creation, which
/// is also the id of the welcome message. Pushes take the next id.
pub struct RoomState {
    name: String,
    config: RoomConfig,
    history: Mutex<History>,
    pushed: Notify,
}

impl RoomState {
    /// Creates a room seeded with a `Hello, <name>!` message.
    pub fn new(name: impl Into<String>, config: RoomConfig) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self::with_seed(name, config, seed)
    }

    /// Creates a room whose welcome message carries id `seed`.
    pub fn with_seed(name: impl Into<String>, config: RoomConfig, seed: u64) -> Self {
        let name = name.into();
        let config = config.validated();
        let mut messages = VecDeque::with_capacity(config.max_history + 1);
        messages.push_back(Message {
            id: MessageId(seed),
            body: format!("Hello, {name}!"),
        });
        Self {
            name,
            config,
            history: Mutex::new(History {
                messages,
                last_id: seed,
            }),
            pushed: Notify::new(),
        }
    }

    /// The room's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a message, evicts the oldest beyond capacity, and wakes
    /// every pending pull. Returns the new id.
    pub async fn push(&self, body: impl Into<String>) -> MessageId {
        let id = {
            let mut history = self.history.lock().await;
            history.last_id += 1;
            let id = MessageId(history.last_id);
            history.messages.push_back(Message {
                id,
                body: body.into(),
            });
            while history.messages.len() > self.config.max_history {
                history.messages.pop_front();
            }
            self.pushed.notify_waiters();
            id
        };
        tracing::trace!(room = %self.name, %id, "message pushed");
        id
    }

    /// Returns every retained message newer than `last`, formatted as
    /// `"<id>: <body>\n"` lines.
    ///
    /// If there are none yet, waits up to the configured poll timeout for
    /// a push. A woken pull renders once more and returns that, even if
    /// the push didn't produce anything newer than `last`. Returns an
    /// empty string if the timeout passes with no push. A cursor that
    /// points at an evicted or unknown id just yields whatever is retained
    /// above it.
    pub async fn pull(&self, last: u64) -> String {
        let notified = self.pushed.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        {
            let history = self.history.lock().await;
            let out = history.render_after(last);
            if !out.is_empty() {
                return out;
            }
        }

        if tokio::time::timeout(self.config.poll_timeout, notified)
            .await
            .is_err()
        {
            tracing::trace!(room = %self.name, last, "pull timed out");
            return String::new();
        }
        self.history.lock().await.render_after(last)
    }

    /// The most recently assigned id.
    pub async fn last_id(&self) -> MessageId {
        MessageId(self.history.lock().await.last_id)
    }

    /// Number of retained messages.
    pub async fn len(&self) -> usize {
        self.history.lock().await.messages.len()
    }

    /// A snapshot of the retained messages, oldest first.
    pub async fn history(&self) -> Vec<Message> {
        self.history.lock().await.messages.iter().cloned().collect()
    }
}

impl std::fmt::Debug for RoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomState")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
