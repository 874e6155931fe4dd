use std::time::Duration;

use game_types::Room;

/// Inactivity eviction policy for rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCleanup {
    pub inactivity_timeout: Duration, // 15 minutes without a mutation
    pub sweep_interval: Duration,     // how often the sweep runs
}

impl Default for RoomCleanup {
    fn default() -> Self {
        Self {
            inactivity_timeout: Duration::from_secs(15 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl RoomCleanup {
    pub fn new(inactivity_timeout: Duration, sweep_interval: Duration) -> Self {
        Self {
            inactivity_timeout,
            sweep_interval,
        }
    }

    /// A room is stale once its last activity is strictly older than the timeout.
    pub fn is_inactive(&self, room: &Room, now_millis: i64) -> bool {
        let idle_for = now_millis.saturating_sub(room.last_activity);
        idle_for > self.timeout_millis()
    }

    fn timeout_millis(&self) -> i64 {
        i64::try_from(self.inactivity_timeout.as_millis()).unwrap_or(i64::MAX)
    }
}
