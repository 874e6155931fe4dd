#![allow(dead_code)]

use game_core::{GameRules, RoomTransitions, WordPool};
use game_types::{ConnectionId, Language, Player, Room};

/// Creates a pool with a known set of English words for predictable testing
pub fn create_test_pool() -> WordPool {
    let words = WordPool::parse_word_list("apple\nbanana\ncherry\nhouse\nmouse\ntrain\nplane\nwater");
    WordPool::builtin().with_list(Language::En, words)
}

pub fn create_test_player(id: &str) -> Player {
    Player::new(id.to_string(), id.to_uppercase(), ConnectionId::new(), false)
}

/// Room in the lobby whose creator is `creator`, followed by the given players
pub fn create_lobby(creator: &str, others: &[&str]) -> Room {
    let mut owner = create_test_player(creator);
    owner.is_creator = true;
    let mut room = Room::new("TEST".to_string(), Language::En, owner, 0);

    for id in others {
        room.join(
            &GameRules::default(),
            id.to_string(),
            id.to_uppercase(),
            ConnectionId::new(),
        )
        .expect("join should succeed");
    }
    room
}

/// Room already in play with the given rules
pub fn create_running_game(rules: &GameRules, creator: &str, others: &[&str]) -> Room {
    let mut room = create_lobby(creator, others);
    room.start_game(rules, creator, &create_test_pool())
        .expect("start should succeed");
    room
}

/// Submit one answer per player and score the round
pub fn play_round(room: &mut Room, answers: &[(&str, &str)]) -> bool {
    for (player_id, answer) in answers {
        room.record_answer(player_id, answer.to_string())
            .expect("answer should be accepted");
    }
    room.score_round().is_match
}
