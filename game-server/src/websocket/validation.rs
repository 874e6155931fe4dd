//! Field checks applied to inbound events before they reach the coordinator.

use game_core::ROOM_CODE_LEN;
use game_types::ClientMessage;

pub const MAX_NAME_LEN: usize = 12;
pub const MAX_ANSWER_LEN: usize = 50;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn require(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}

fn player_name(name: &str) -> Result<(), &'static str> {
    match char_len(name) {
        1..=MAX_NAME_LEN => Ok(()),
        _ => Err("Player name must be between 1 and 12 characters"),
    }
}

fn room_id(room_id: &str) -> Result<(), &'static str> {
    if char_len(room_id) == ROOM_CODE_LEN {
        Ok(())
    } else {
        Err("Room ID must be exactly 4 characters")
    }
}

fn room_action(id: &str, player_id: &str) -> Result<(), &'static str> {
    require(id, "Room ID is required")?;
    room_id(id)?;
    require(player_id, "Player ID is required")
}

/// Returns the message to send back when a field is out of bounds.
pub fn validate(message: &ClientMessage) -> Result<(), &'static str> {
    match message {
        ClientMessage::CreateRoom { player_name: name, .. } => player_name(name),
        ClientMessage::JoinRoom {
            room_id: id,
            player_name: name,
            ..
        } => {
            room_id(id)?;
            player_name(name)
        }
        ClientMessage::Reconnect { player_id } => require(player_id, "Player ID is required"),
        ClientMessage::CheckRoom { .. } => Ok(()),
        ClientMessage::KickPlayer {
            room_id: id,
            player_id,
            target_id,
        } => {
            room_action(id, player_id)?;
            require(target_id, "Target player ID is required")
        }
        ClientMessage::SubmitAnswer {
            room_id: id,
            player_id,
            answer,
        } => {
            room_action(id, player_id)?;
            match char_len(answer) {
                1..=MAX_ANSWER_LEN => Ok(()),
                _ => Err("Answer must be between 1 and 50 characters"),
            }
        }
        ClientMessage::StartGame { room_id: id, player_id }
        | ClientMessage::NextRound { room_id: id, player_id }
        | ClientMessage::LeaveRoom { room_id: id, player_id }
        | ClientMessage::PlayerReady { room_id: id, player_id } => room_action(id, player_id),
    }
}
