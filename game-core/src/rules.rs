use serde::{Deserialize, Serialize};

/// Per-deployment game settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Number of words (rounds) drawn for each game.
    pub words_per_game: usize,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            words_per_game: 2,
            min_players: 2,
            max_players: 10,
        }
    }
}

impl GameRules {
    pub fn new(words_per_game: usize, min_players: usize, max_players: usize) -> Self {
        Self {
            words_per_game,
            min_players,
            max_players,
        }
    }
}
