use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::player::{Player, PlayerId};

/// Short human-typeable room code.
pub type RoomId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum RoomState {
    Lobby,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    #[default]
    En,
    Id,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Id];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Id => "id",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Full room snapshot. This is what gets persisted and broadcast to members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Room {
    pub id: RoomId,
    pub state: RoomState,
    pub language: Language,
    pub players: Vec<Player>,
    pub spectators: Vec<Player>,
    pub words: Vec<String>,
    pub current_word_index: usize,
    pub current_answers: HashMap<PlayerId, String>,
    /// Unix epoch milliseconds of the last mutating operation.
    #[ts(type = "number")]
    pub last_activity: i64,
}

impl Room {
    pub fn new(id: RoomId, language: Language, creator: Player, now_millis: i64) -> Self {
        Self {
            id,
            state: RoomState::Lobby,
            language,
            players: vec![creator],
            spectators: Vec::new(),
            words: Vec::new(),
            current_word_index: 0,
            current_answers: HashMap::new(),
            last_activity: now_millis,
        }
    }

    /// Active players first, then spectators.
    pub fn members(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().chain(self.spectators.iter())
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut().chain(self.spectators.iter_mut())
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn member(&self, player_id: &str) -> Option<&Player> {
        self.members().find(|p| p.id == player_id)
    }

    pub fn member_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.members_mut().find(|p| p.id == player_id)
    }

    pub fn has_member(&self, player_id: &str) -> bool {
        self.member(player_id).is_some()
    }

    pub fn is_creator(&self, player_id: &str) -> bool {
        self.player(player_id).is_some_and(|p| p.is_creator)
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_word_index).map(String::as_str)
    }
}
