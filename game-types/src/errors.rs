use thiserror::Error;

/// Failures of a single room operation. The `Display` text is what the
/// requesting client sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Room is full")]
    RoomFull,
    #[error("Only creator can {action}")]
    Forbidden { action: &'static str },
    #[error("Need at least {min} players to start")]
    NotEnoughPlayers { min: usize },
    #[error("Wait for all players to return to lobby")]
    PlayersNotReady,
    #[error("Game not in progress")]
    GameNotInProgress,
    #[error("No free room code available")]
    RoomCodeExhausted,
}

impl GameError {
    /// Message safe to hand to a client. Internal failures never leak detail.
    pub fn client_message(&self) -> String {
        match self {
            GameError::RoomCodeExhausted => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
