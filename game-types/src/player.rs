use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// Client-generated identity that survives transport reconnects.
pub type PlayerId = String;

/// Transport connection handle. Stale once the player disconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a player stands relative to the room's game cycle.
///
/// `Idle` is the only "ready" status: available to start in the lobby,
/// or done looking at results once a game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PlayerStatus {
    Idle,
    InGame,
    AwaitingLobbyReturn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub connection_ref: ConnectionId,
    pub name: String,
    pub is_creator: bool,
    pub score: u32,
    pub is_connected: bool,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(id: PlayerId, name: String, connection_ref: ConnectionId, is_creator: bool) -> Self {
        Self {
            id,
            connection_ref,
            name,
            is_creator,
            score: 0,
            is_connected: true,
            status: PlayerStatus::Idle,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == PlayerStatus::Idle
    }

    /// Bind the player to a fresh transport connection.
    pub fn attach(&mut self, connection_ref: ConnectionId) {
        self.connection_ref = connection_ref;
        self.is_connected = true;
    }
}
