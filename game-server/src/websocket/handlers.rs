use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::coordinator::{LeaveOutcome, RoomCoordinator};
use crate::websocket::connection::ConnectionManager;
use crate::websocket::validation;
use game_types::{ClientMessage, ConnectionId, GameError, Language, ServerMessage};

/// Translates inbound events for one connection into coordinator calls and
/// fans the results out.
#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    coordinator: Arc<RoomCoordinator>,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        coordinator: Arc<RoomCoordinator>,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            coordinator,
        }
    }

    /// Errors from the game are reported to this connection only; the
    /// returned `Err` means the connection itself is gone.
    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), String> {
        if let Err(reason) = validation::validate(&message) {
            warn!("Rejected message from {}: {}", self.connection_id, reason);
            return self.send_error(reason).await;
        }

        match self.dispatch(message).await {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("Request from {} failed: {}", self.connection_id, e);
                self.send_error(&e.client_message()).await
            }
        }
    }

    pub async fn handle_disconnect(&self) {
        info!("Handling disconnect for connection {}", self.connection_id);

        if let Some(disconnection) = self.coordinator.disconnect_player(self.connection_id).await {
            self.connection_manager
                .send_to_room(
                    &disconnection.room_id,
                    ServerMessage::RoomUpdate(disconnection.room),
                )
                .await;
        }
    }

    async fn dispatch(&self, message: ClientMessage) -> Result<(), GameError> {
        match message {
            ClientMessage::CreateRoom {
                player_name,
                language,
                player_id,
            } => self.handle_create_room(player_name, language, player_id).await,
            ClientMessage::JoinRoom {
                room_id,
                player_name,
                player_id,
            } => self.handle_join_room(&room_id, player_name, player_id).await,
            ClientMessage::Reconnect { player_id } => self.handle_reconnect(&player_id).await,
            ClientMessage::CheckRoom { room_id } => self.handle_check_room(&room_id).await,
            ClientMessage::KickPlayer {
                room_id,
                player_id,
                target_id,
            } => self.handle_kick_player(&room_id, &player_id, &target_id).await,
            ClientMessage::StartGame { room_id, player_id } => {
                self.handle_start_game(&room_id, &player_id).await
            }
            ClientMessage::SubmitAnswer {
                room_id,
                player_id,
                answer,
            } => self.handle_submit_answer(&room_id, &player_id, answer).await,
            ClientMessage::NextRound { room_id, player_id } => {
                self.handle_next_round(&room_id, &player_id).await
            }
            ClientMessage::LeaveRoom { room_id, player_id } => {
                self.handle_leave_room(&room_id, &player_id).await
            }
            ClientMessage::PlayerReady { room_id, player_id } => {
                self.handle_player_ready(&room_id, &player_id).await
            }
        }
    }

    async fn handle_create_room(
        &self,
        player_name: String,
        language: Language,
        player_id: Option<String>,
    ) -> Result<(), GameError> {
        let created = self
            .coordinator
            .create_room(player_name, self.connection_id, language, player_id)
            .await?;

        self.connection_manager
            .join_room(self.connection_id, &created.room.id)
            .await;
        self.reply(ServerMessage::RoomCreated {
            room: created.room,
            player: created.player,
        })
        .await;
        Ok(())
    }

    async fn handle_join_room(
        &self,
        room_id: &str,
        player_name: String,
        player_id: Option<String>,
    ) -> Result<(), GameError> {
        let joined = self
            .coordinator
            .join_room(room_id, player_name, self.connection_id, player_id)
            .await?;

        self.connection_manager
            .join_room(self.connection_id, &joined.room.id)
            .await;
        self.reply(ServerMessage::RoomJoined {
            room: joined.room.clone(),
            player: joined.player,
        })
        .await;
        self.broadcast(&joined.room.id, ServerMessage::RoomUpdate(joined.room.clone()))
            .await;
        Ok(())
    }

    async fn handle_reconnect(&self, player_id: &str) -> Result<(), GameError> {
        let resumed = self
            .coordinator
            .reconnect_player(player_id, self.connection_id)
            .await?;

        self.connection_manager
            .join_room(self.connection_id, &resumed.room.id)
            .await;
        self.reply(ServerMessage::Reconnected {
            room: resumed.room.clone(),
            player: resumed.player,
        })
        .await;
        self.broadcast(&resumed.room.id, ServerMessage::RoomUpdate(resumed.room.clone()))
            .await;
        Ok(())
    }

    async fn handle_check_room(&self, room_id: &str) -> Result<(), GameError> {
        let exists = self.coordinator.room_exists(room_id).await;
        self.reply(ServerMessage::RoomChecked { exists }).await;
        Ok(())
    }

    async fn handle_kick_player(
        &self,
        room_id: &str,
        requester_id: &str,
        target_id: &str,
    ) -> Result<(), GameError> {
        let kick = self
            .coordinator
            .kick_player(room_id, requester_id, target_id)
            .await?;

        let kicked = ServerMessage::PlayerKicked {
            player_id: kick.kicked_player_id.clone(),
        };
        self.broadcast(room_id, ServerMessage::RoomUpdate(kick.room)).await;
        self.broadcast(room_id, kicked.clone()).await;

        // The kicked socket may already have been detached from the room
        if let Some(connection_ref) = kick.kicked_connection {
            if let Some(connection) = self.connection_manager.get_connection(connection_ref).await {
                if !connection.in_room(room_id) {
                    if let Err(e) = connection.send_message(kicked) {
                        debug!("Kick notice to {} dropped: {}", connection_ref, e);
                    }
                }
                self.connection_manager.leave_room(connection_ref, room_id).await;
            }
        }
        Ok(())
    }

    async fn handle_start_game(&self, room_id: &str, requester_id: &str) -> Result<(), GameError> {
        info!("Starting game for room {} requested by {}", room_id, requester_id);
        let room = self.coordinator.start_game(room_id, requester_id).await?;
        self.broadcast(room_id, ServerMessage::GameStarted(room)).await;
        Ok(())
    }

    async fn handle_submit_answer(
        &self,
        room_id: &str,
        player_id: &str,
        answer: String,
    ) -> Result<(), GameError> {
        let submitted = self
            .coordinator
            .submit_answer(room_id, player_id, answer)
            .await?;
        self.broadcast(room_id, ServerMessage::RoomUpdate(submitted.room))
            .await;

        if submitted.all_answered {
            let result = self.coordinator.calculate_round_results(room_id).await?;
            info!("Round result for room {}: match = {}", room_id, result.is_match);
            self.broadcast(
                room_id,
                ServerMessage::RoundResult {
                    room: result.room,
                    is_match: result.is_match,
                    word: result.word,
                },
            )
            .await;
        }
        Ok(())
    }

    async fn handle_next_round(&self, room_id: &str, requester_id: &str) -> Result<(), GameError> {
        let advance = self.coordinator.advance_round(room_id, requester_id).await?;
        let message = if advance.game_over {
            ServerMessage::GameOver(advance.room)
        } else {
            ServerMessage::NextRound(advance.room)
        };
        self.broadcast(room_id, message).await;
        Ok(())
    }

    async fn handle_leave_room(&self, room_id: &str, player_id: &str) -> Result<(), GameError> {
        let outcome = self.coordinator.leave_room(room_id, player_id).await?;
        self.connection_manager
            .leave_room(self.connection_id, room_id)
            .await;

        match outcome {
            LeaveOutcome::Destroyed => {
                self.broadcast(room_id, ServerMessage::RoomDestroyed).await;
                let closed = self.connection_manager.disconnect_room(room_id).await;
                info!("Room {} destroyed, closed {} connections", room_id, closed);
            }
            LeaveOutcome::Remaining(room) => {
                self.broadcast(room_id, ServerMessage::RoomUpdate(room)).await;
            }
        }
        Ok(())
    }

    async fn handle_player_ready(&self, room_id: &str, player_id: &str) -> Result<(), GameError> {
        self.coordinator.player_ready(room_id, player_id).await?;
        let room = self.coordinator.check_and_switch_to_lobby(room_id).await?;
        self.broadcast(room_id, ServerMessage::RoomUpdate(room)).await;
        Ok(())
    }

    async fn broadcast(&self, room_id: &str, message: ServerMessage) {
        self.connection_manager.send_to_room(room_id, message).await;
    }

    /// Best effort: a vanished caller has nobody left to tell.
    async fn reply(&self, message: ServerMessage) {
        if let Err(e) = self.send_message(message).await {
            debug!("Reply to {} dropped: {}", self.connection_id, e);
        }
    }

    async fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.connection_manager
            .send_to_connection(self.connection_id, message)
            .await
    }

    pub async fn send_error(&self, error_message: &str) -> Result<(), String> {
        self.send_message(ServerMessage::Error {
            message: error_message.to_string(),
        })
        .await
    }
}
