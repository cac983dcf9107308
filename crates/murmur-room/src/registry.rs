//! Room registry: name lookup and ordered fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{MessageId, RoomConfig, RoomError, RoomState};

/// Name of the reserved aggregate room.
pub const AGGREGATE_ROOM: &str = "all";

/// Owns every room, created lazily on first reference, plus the
/// aggregate room.
///
/// Locks, always taken in this order:
///
/// 1. `fanout`: serializes every push so that the aggregate room records
///    pushes in one global order. Never held across a pull.
/// 2. `rooms`: the name → room map. Held only for lookup-or-insert and
///    for the duration of an `all` fan-out.
/// 3. each room's own history lock.
pub struct RoomRegistry {
    config: RoomConfig,
    rooms: Mutex<HashMap<String, Arc<RoomState>>>,
    aggregate: Arc<RoomState>,
    fanout: Mutex<()>,
}

impl RoomRegistry {
    /// Creates a registry holding only the aggregate room.
    pub fn new(config: RoomConfig) -> Self {
        let config = config.validated();
        Self {
            aggregate: Arc::new(RoomState::new(AGGREGATE_ROOM, config.clone())),
            config,
            rooms: Mutex::new(HashMap::new()),
            fanout: Mutex::new(()),
        }
    }

    /// The configuration every room is created with.
    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// The aggregate room.
    pub fn aggregate(&self) -> Arc<RoomState> {
        Arc::clone(&self.aggregate)
    }

    /// Returns the named room, creating it (with its welcome message) on
    /// first reference. `all` always resolves to the aggregate room.
    pub async fn get_or_create(&self, name: &str) -> Result<Arc<RoomState>, RoomError> {
        validate_name(name)?;
        if name == AGGREGATE_ROOM {
            return Ok(self.aggregate());
        }
        let mut rooms = self.rooms.lock().await;
        Ok(Arc::clone(Self::entry(&mut rooms, name, &self.config)))
    }

    /// Pushes `body` to `name` and mirrors it into the aggregate room.
    ///
    /// Pushing to `all` instead delivers `body` to every existing room and
    /// then to the aggregate room. Either way the whole fan-out runs under
    /// one lock, so two pushes never interleave. Returns the id the
    /// aggregate room assigned.
    pub async fn broadcast_push(&self, name: &str, body: &str) -> Result<MessageId, RoomError> {
        validate_name(name)?;
        let _order = self.fanout.lock().await;

        if name == AGGREGATE_ROOM {
            let rooms = self.rooms.lock().await;
            for room in rooms.values() {
                room.push(body).await;
            }
            let id = self.aggregate.push(body).await;
            tracing::debug!(rooms = rooms.len(), %id, "broadcast to all rooms");
            Ok(id)
        } else {
            let room = {
                let mut rooms = self.rooms.lock().await;
                Arc::clone(Self::entry(&mut rooms, name, &self.config))
            };
            let room_id = room.push(body).await;
            let id = self.aggregate.push(body).await;
            tracing::debug!(room = name, %room_id, aggregate_id = %id, "message pushed");
            Ok(id)
        }
    }

    /// Number of regular rooms (the aggregate room isn't counted).
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Names of the regular rooms, sorted.
    pub async fn room_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rooms.lock().await.keys().cloned().collect();
        names.sort();
        names
    }

    fn entry<'a>(
        rooms: &'a mut HashMap<String, Arc<RoomState>>,
        name: &str,
        config: &RoomConfig,
    ) -> &'a Arc<RoomState> {
        rooms.entry(name.to_string()).or_insert_with(|| {
            tracing::info!(room = name, "room created");
            Arc::new(RoomState::new(name, config.clone()))
        })
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

fn validate_name(name: &str) -> Result<(), RoomError> {
    if name.is_empty() || name.contains(['/', ' ']) {
        return Err(RoomError::InvalidName(name.to_string()));
    }
    Ok(())
}
