use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use game_types::{Room, RoomId};

use crate::RoomStore;

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// In-process [`RoomStore`] with TTL semantics, shared between coordinators
/// in tests the way a Redis instance is shared between processes.
pub struct MemoryRoomStore {
    rooms: RwLock<HashMap<RoomId, Entry<Room>>>,
    player_rooms: RwLock<HashMap<String, Entry<RoomId>>>,
    available: AtomicBool,
}

impl Default for MemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            player_rooms: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage. While unavailable every call behaves like a failed backend.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.values().filter(|e| e.is_live()).count()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    async fn put(&self, room_id: &str, room: &Room, ttl: Duration) {
        if !self.is_available() {
            return;
        }
        self.rooms
            .write()
            .await
            .insert(room_id.to_string(), Entry::new(room.clone(), ttl));
    }

    async fn get(&self, room_id: &str) -> Option<Room> {
        if !self.is_available() {
            return None;
        }
        let rooms = self.rooms.read().await;
        rooms
            .get(room_id)
            .filter(|e| e.is_live())
            .map(|e| e.value.clone())
    }

    async fn delete(&self, room_id: &str) {
        if !self.is_available() {
            return;
        }
        self.rooms.write().await.remove(room_id);
    }

    async fn index_player(&self, player_id: &str, room_id: &str, ttl: Duration) {
        if !self.is_available() {
            return;
        }
        self.player_rooms
            .write()
            .await
            .insert(player_id.to_string(), Entry::new(room_id.to_string(), ttl));
    }

    async fn lookup_player_room(&self, player_id: &str) -> Option<RoomId> {
        if !self.is_available() {
            return None;
        }
        let index = self.player_rooms.read().await;
        index
            .get(player_id)
            .filter(|e| e.is_live())
            .map(|e| e.value.clone())
    }

    async fn list_all(&self) -> Vec<Room> {
        if !self.is_available() {
            return Vec::new();
        }
        let rooms = self.rooms.read().await;
        rooms
            .values()
            .filter(|e| e.is_live())
            .map(|e| e.value.clone())
            .collect()
    }
}
