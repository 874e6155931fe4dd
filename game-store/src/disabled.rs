use async_trait::async_trait;
use std::time::Duration;

use game_types::{Room, RoomId};

use crate::RoomStore;

/// Used when no store is configured; the coordinator then runs from its cache alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRoomStore;

#[async_trait]
impl RoomStore for DisabledRoomStore {
    fn is_available(&self) -> bool {
        false
    }

    async fn put(&self, _room_id: &str, _room: &Room, _ttl: Duration) {}

    async fn get(&self, _room_id: &str) -> Option<Room> {
        None
    }

    async fn delete(&self, _room_id: &str) {}

    async fn index_player(&self, _player_id: &str, _room_id: &str, _ttl: Duration) {}

    async fn lookup_player_room(&self, _player_id: &str) -> Option<RoomId> {
        None
    }

    async fn list_all(&self) -> Vec<Room> {
        Vec::new()
    }
}
