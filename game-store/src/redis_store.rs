use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use game_types::{Room, RoomId};

use crate::error::StoreResult;
use crate::redis_pool::RedisPool;
use crate::RoomStore;

const ROOM_KEY_PREFIX: &str = "room:";
const PLAYER_ROOM_KEY_PREFIX: &str = "player:room:";

/// How long a failed call keeps the store marked unavailable.
const RETRY_AFTER: Duration = Duration::from_secs(5);

const HEALTHY: u64 = 0;

pub fn room_key(room_id: &str) -> String {
    format!("{ROOM_KEY_PREFIX}{room_id}")
}

pub fn player_room_key(player_id: &str) -> String {
    format!("{PLAYER_ROOM_KEY_PREFIX}{player_id}")
}

/// Redis-backed [`RoomStore`]. Rooms live under `room:<id>` as JSON and the
/// player index under `player:room:<playerId>`, both with a sliding TTL.
pub struct RedisRoomStore {
    pool: RedisPool,
    started: Instant,
    // millis since `started` of the last failure, offset by one; 0 when healthy
    last_failure: AtomicU64,
}

impl RedisRoomStore {
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            started: Instant::now(),
            last_failure: AtomicU64::new(HEALTHY),
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        let result = self.pool.ping().await;
        self.record(&result, "ping");
        result
    }

    fn record<T>(&self, result: &StoreResult<T>, operation: &str) {
        match result {
            Ok(_) => {
                if self.last_failure.swap(HEALTHY, Ordering::Relaxed) != HEALTHY {
                    info!("Redis store recovered after {}", operation);
                }
            }
            Err(e) => {
                error!("Redis {} failed: {}", operation, e);
                let elapsed = self.started.elapsed().as_millis() as u64;
                self.last_failure.store(elapsed + 1, Ordering::Relaxed);
            }
        }
    }
}

#[async_trait]
impl RoomStore for RedisRoomStore {
    fn is_available(&self) -> bool {
        match self.last_failure.load(Ordering::Relaxed) {
            HEALTHY => true,
            failed_at => {
                let now = self.started.elapsed().as_millis() as u64 + 1;
                now.saturating_sub(failed_at) >= RETRY_AFTER.as_millis() as u64
            }
        }
    }

    async fn put(&self, room_id: &str, room: &Room, ttl: Duration) {
        let result = self.pool.set_json(&room_key(room_id), room, ttl).await;
        self.record(&result, "room save");
    }

    async fn get(&self, room_id: &str) -> Option<Room> {
        let result = self.pool.get_json::<Room>(&room_key(room_id)).await;
        self.record(&result, "room load");
        result.ok().flatten()
    }

    async fn delete(&self, room_id: &str) {
        let result = self.pool.delete(&room_key(room_id)).await;
        self.record(&result, "room delete");
        if let Ok(true) = result {
            debug!("Deleted room {} from Redis", room_id);
        }
    }

    async fn index_player(&self, player_id: &str, room_id: &str, ttl: Duration) {
        let result = self
            .pool
            .set_string(&player_room_key(player_id), room_id, ttl)
            .await;
        self.record(&result, "player index");
    }

    async fn lookup_player_room(&self, player_id: &str) -> Option<RoomId> {
        let result = self.pool.get_string(&player_room_key(player_id)).await;
        self.record(&result, "player lookup");
        result.ok().flatten()
    }

    async fn list_all(&self) -> Vec<Room> {
        let keys = self.pool.scan_keys(&format!("{ROOM_KEY_PREFIX}*")).await;
        self.record(&keys, "room scan");
        let Ok(keys) = keys else {
            return Vec::new();
        };

        let mut rooms = Vec::with_capacity(keys.len());
        for key in keys {
            // A room may expire between SCAN and GET
            match self.pool.get_json::<Room>(&key).await {
                Ok(Some(room)) => rooms.push(room),
                Ok(None) => {}
                Err(e) => error!("Failed to read {} during scan: {}", key, e),
            }
        }
        rooms
    }
}
