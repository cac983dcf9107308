//! Room configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings shared by every room in a registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomConfig {
    /// How many messages a room retains. Older ones are dropped.
    pub max_history: usize,

    /// How long a pull waits for a new message before returning empty.
    pub poll_timeout: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_history: 32,
            poll_timeout: Duration::from_secs(15),
        }
    }
}

impl RoomConfig {
    /// Fixes out-of-range values. A room always keeps at least one message.
    pub fn validated(mut self) -> Self {
        if self.max_history == 0 {
            tracing::warn!("max_history of 0 is not allowed, using 1");
            self.max_history = 1;
        }
        self
    }
}
