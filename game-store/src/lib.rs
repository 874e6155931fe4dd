//! Room snapshot storage shared between coordinator instances.
//!
//! Every [`RoomStore`] call is infallible from the caller's point of view: a
//! backend that cannot reach its medium logs the failure and returns the
//! empty result, so the coordinator can keep serving from its local cache.

pub mod connection;
pub mod disabled;
pub mod error;
pub mod memory;
pub mod redis_pool;
pub mod redis_store;

use async_trait::async_trait;
use std::time::Duration;

use game_types::{Room, RoomId};

pub use connection::{StoreConfig, connect};
pub use disabled::DisabledRoomStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryRoomStore;
pub use redis_pool::RedisPool;
pub use redis_store::RedisRoomStore;

/// Default sliding expiry applied on every save.
pub const DEFAULT_ROOM_TTL: Duration = Duration::from_secs(3600);

#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Whether the backing medium is currently worth talking to.
    fn is_available(&self) -> bool;

    async fn put(&self, room_id: &str, room: &Room, ttl: Duration);

    async fn get(&self, room_id: &str) -> Option<Room>;

    async fn delete(&self, room_id: &str);

    /// Point `player_id` at the room it currently belongs to.
    async fn index_player(&self, player_id: &str, room_id: &str, ttl: Duration);

    async fn lookup_player_room(&self, player_id: &str) -> Option<RoomId>;

    async fn list_all(&self) -> Vec<Room>;
}
