use game_types::{
    ConnectionId, GameError, Player, PlayerId, PlayerStatus, Room, RoomState,
};

use crate::{GameRules, ScoringEngine, WordPool};

/// Outcome of a member leaving a room.
#[derive(Debug, Clone, PartialEq)]
pub enum Departure {
    /// The creator left; the room has to be torn down.
    CreatorLeft,
    /// A regular player or spectator was removed.
    Left(Player),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundScore {
    pub is_match: bool,
    pub word: Option<String>,
}

/// Room state machine:
/// `Lobby --start_game--> Playing --advance_round (words exhausted)--> Ended --return_to_lobby--> Lobby`.
///
/// Every method mutates in place. Callers that need all-or-nothing behaviour
/// apply these to a copy and keep it only on `Ok`.
pub trait RoomTransitions {
    fn touch(&mut self, now_millis: i64);

    /// Add a new member, or refresh an existing one with the same id.
    fn join(
        &mut self,
        rules: &GameRules,
        player_id: PlayerId,
        name: String,
        connection_ref: ConnectionId,
    ) -> Result<Player, GameError>;

    fn reconnect(&mut self, player_id: &str, connection_ref: ConnectionId) -> Result<Player, GameError>;

    /// Flag whoever holds `connection_ref` as disconnected. Membership is untouched.
    fn disconnect(&mut self, connection_ref: ConnectionId) -> Option<PlayerId>;

    fn kick(&mut self, requester_id: &str, target_id: &str) -> Result<Option<Player>, GameError>;

    fn leave(&mut self, player_id: &str) -> Result<Departure, GameError>;

    fn mark_ready(&mut self, player_id: &str);

    fn start_game(&mut self, rules: &GameRules, requester_id: &str, pool: &WordPool) -> Result<(), GameError>;

    /// Record an answer; returns whether every connected player has now answered.
    fn record_answer(&mut self, player_id: &str, answer: String) -> Result<bool, GameError>;

    fn score_round(&mut self) -> RoundScore;

    /// Move to the next word; returns `true` once the game is over.
    fn advance_round(&mut self) -> Result<bool, GameError>;

    /// Flip an ended room back to the lobby once every player is ready.
    ///
    /// Spectators are merged into the players up to `max_players`, in the
    /// order they joined. Whoever does not fit keeps watching until the next
    /// lobby return.
    fn return_to_lobby(&mut self, rules: &GameRules) -> bool;
}

impl RoomTransitions for Room {
    fn touch(&mut self, now_millis: i64) {
        self.last_activity = now_millis;
    }

    fn join(
        &mut self,
        rules: &GameRules,
        player_id: PlayerId,
        name: String,
        connection_ref: ConnectionId,
    ) -> Result<Player, GameError> {
        if self.players.len() >= rules.max_players {
            return Err(GameError::RoomFull);
        }

        if let Some(existing) = self.member_mut(&player_id) {
            existing.attach(connection_ref);
            existing.name = name;
            return Ok(existing.clone());
        }

        let player = Player::new(player_id, name, connection_ref, false);
        if self.state == RoomState::Playing {
            self.spectators.push(player.clone());
        } else {
            self.players.push(player.clone());
        }

        Ok(player)
    }

    fn reconnect(&mut self, player_id: &str, connection_ref: ConnectionId) -> Result<Player, GameError> {
        let player = self.member_mut(player_id).ok_or(GameError::PlayerNotFound)?;
        player.attach(connection_ref);
        Ok(player.clone())
    }

    fn disconnect(&mut self, connection_ref: ConnectionId) -> Option<PlayerId> {
        let player = self
            .members_mut()
            .find(|p| p.connection_ref == connection_ref && p.is_connected)?;
        player.is_connected = false;
        Some(player.id.clone())
    }

    fn kick(&mut self, requester_id: &str, target_id: &str) -> Result<Option<Player>, GameError> {
        if !self.is_creator(requester_id) {
            return Err(GameError::Forbidden {
                action: "kick players",
            });
        }

        let kicked = self.member(target_id).cloned();
        self.players.retain(|p| p.id != target_id);
        self.spectators.retain(|p| p.id != target_id);
        self.current_answers.remove(target_id);
        Ok(kicked)
    }

    fn leave(&mut self, player_id: &str) -> Result<Departure, GameError> {
        if let Some(index) = self.players.iter().position(|p| p.id == player_id) {
            if self.players[index].is_creator {
                return Ok(Departure::CreatorLeft);
            }
            self.current_answers.remove(player_id);
            return Ok(Departure::Left(self.players.remove(index)));
        }

        if let Some(index) = self.spectators.iter().position(|p| p.id == player_id) {
            return Ok(Departure::Left(self.spectators.remove(index)));
        }

        Err(GameError::PlayerNotFound)
    }

    fn mark_ready(&mut self, player_id: &str) {
        // Spectators only watch; their status is reset when they get merged in
        if let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) {
            player.status = PlayerStatus::Idle;
        }
    }

    fn start_game(&mut self, rules: &GameRules, requester_id: &str, pool: &WordPool) -> Result<(), GameError> {
        if !self.is_creator(requester_id) {
            return Err(GameError::Forbidden {
                action: "start game",
            });
        }

        if self.players.len() < rules.min_players {
            return Err(GameError::NotEnoughPlayers {
                min: rules.min_players,
            });
        }

        if !self.players.iter().all(Player::is_ready) {
            return Err(GameError::PlayersNotReady);
        }

        self.words = pool.draw(self.language, rules.words_per_game);
        self.current_word_index = 0;
        self.current_answers.clear();
        for player in &mut self.players {
            player.score = 0;
            player.status = PlayerStatus::InGame;
        }
        self.state = RoomState::Playing;

        tracing::info!(
            room_id = %self.id,
            players = self.players.len(),
            words = self.words.len(),
            "Game started"
        );
        Ok(())
    }

    fn record_answer(&mut self, player_id: &str, answer: String) -> Result<bool, GameError> {
        if self.state != RoomState::Playing {
            return Err(GameError::GameNotInProgress);
        }

        if self.player(player_id).is_none() {
            return Err(GameError::PlayerNotFound);
        }

        self.current_answers.insert(player_id.to_string(), answer);

        // Disconnected players are skipped so a dropped connection can't stall the round
        let all_answered = self
            .players
            .iter()
            .filter(|p| p.is_connected)
            .all(|p| self.current_answers.contains_key(&p.id));
        Ok(all_answered)
    }

    fn score_round(&mut self) -> RoundScore {
        let (is_match, awards) = ScoringEngine::round_points(&self.current_answers);

        for (player_id, points) in awards {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) {
                player.score += points;
            }
        }

        RoundScore {
            is_match,
            word: self.current_word().map(str::to_string),
        }
    }

    fn advance_round(&mut self) -> Result<bool, GameError> {
        if self.state != RoomState::Playing {
            return Err(GameError::GameNotInProgress);
        }

        self.current_word_index += 1;
        self.current_answers.clear();

        if self.current_word_index >= self.words.len() {
            self.state = RoomState::Ended;
            // Everyone has to acknowledge the results before the lobby reopens
            for player in &mut self.players {
                player.status = PlayerStatus::AwaitingLobbyReturn;
            }
            tracing::info!(room_id = %self.id, "Game over");
            return Ok(true);
        }

        Ok(false)
    }

    fn return_to_lobby(&mut self, rules: &GameRules) -> bool {
        if self.state != RoomState::Ended || !self.players.iter().all(Player::is_ready) {
            return false;
        }

        self.state = RoomState::Lobby;
        self.words.clear();
        self.current_word_index = 0;
        self.current_answers.clear();

        let seats = rules.max_players.saturating_sub(self.players.len());
        let merged = self.spectators.len().min(seats);
        self.players.extend(self.spectators.drain(..merged));
        if !self.spectators.is_empty() {
            tracing::debug!(
                room_id = %self.id,
                waiting = self.spectators.len(),
                "Room is full, spectators keep watching"
            );
        }
        for player in &mut self.players {
            player.status = PlayerStatus::Idle;
        }

        tracing::info!(room_id = %self.id, players = self.players.len(), "Room returned to lobby");
        true
    }
}
