use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Language, Player, Room};

/// Inbound events. On the wire: `{"event": "joinRoom", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[ts(export)]
pub enum ClientMessage {
    CreateRoom {
        player_name: String,
        #[serde(default)]
        language: Language,
        #[serde(default)]
        player_id: Option<String>,
    },
    JoinRoom {
        room_id: String,
        player_name: String,
        #[serde(default)]
        player_id: Option<String>,
    },
    Reconnect {
        player_id: String,
    },
    CheckRoom {
        room_id: String,
    },
    KickPlayer {
        room_id: String,
        player_id: String,
        target_id: String,
    },
    StartGame {
        room_id: String,
        player_id: String,
    },
    SubmitAnswer {
        room_id: String,
        player_id: String,
        answer: String,
    },
    NextRound {
        room_id: String,
        player_id: String,
    },
    LeaveRoom {
        room_id: String,
        player_id: String,
    },
    PlayerReady {
        room_id: String,
        player_id: String,
    },
}

/// Outbound events, same envelope as [`ClientMessage`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[ts(export)]
pub enum ServerMessage {
    RoomCreated { room: Room, player: Player },
    RoomJoined { room: Room, player: Player },
    Reconnected { room: Room, player: Player },
    RoomChecked { exists: bool },
    RoomUpdate(Room),
    PlayerKicked { player_id: String },
    GameStarted(Room),
    RoundResult {
        room: Room,
        is_match: bool,
        word: Option<String>,
    },
    NextRound(Room),
    GameOver(Room),
    RoomDestroyed,
    Error { message: String },
}
