
use game_core::GameRules;
use game_server::coordinator::LeaveOutcome;
use game_store::RoomStore;
use game_types::{ConnectionId, GameError, Language, PlayerStatus, RoomState};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::*;

#[tokio::test]
async fn test_create_room_basic() {
    let setup = TestGameServerSetup::new();

    let created = setup.create_room("Alice").await;

    assert_eq!(created.room.id.len(), 4);
    assert_eq!(created.room.state, RoomState::Lobby);
    assert_eq!(created.room.players.len(), 1);
    assert!(created.player.is_creator);
    assert_eq!(created.player.status, PlayerStatus::Idle);
    assert!(setup.coordinator.room_exists(&created.room.id).await);
}

#[tokio::test]
async fn test_room_codes_are_unique() {
    let setup = TestGameServerSetup::new();
    let mut codes = HashSet::new();

    for i in 0..50 {
        let created = setup.create_room(&format!("P{}", i)).await;
        assert!(codes.insert(created.room.id));
    }
    assert_eq!(setup.coordinator.active_room_count().await, 50);
}

#[tokio::test]
async fn test_join_unknown_room() {
    let setup = TestGameServerSetup::new();

    let err = setup
        .coordinator
        .join_room("ZZZZ", "Bob".into(), ConnectionId::new(), None)
        .await
        .unwrap_err();
    assert_eq!(err, GameError::RoomNotFound);
}

#[tokio::test]
async fn test_room_full() {
    let setup = TestGameServerSetup::with_rules(GameRules::new(2, 2, 3));
    let room = setup.setup_lobby("Alice", &["Bob", "Carol"]).await;

    let err = setup
        .coordinator
        .join_room(&room.id, "Dave".into(), ConnectionId::new(), None)
        .await
        .unwrap_err();
    assert_eq!(err, GameError::RoomFull);
}

#[tokio::test]
async fn test_rejoin_with_same_id_resumes() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;
    let new_connection = ConnectionId::new();

    let rejoined = setup
        .coordinator
        .join_room(&room.id, "Bobby".into(), new_connection, Some("bob".into()))
        .await
        .unwrap();

    assert_eq!(rejoined.room.players.len(), 2);
    assert_eq!(rejoined.player.name, "Bobby");
    assert_eq!(rejoined.player.connection_ref, new_connection);
}

#[tokio::test]
async fn test_exactly_one_creator() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob", "Carol"]).await;

    let creators: Vec<_> = room.members().filter(|p| p.is_creator).collect();
    assert_eq!(creators.len(), 1);
    assert_eq!(creators[0].id, "alice");
}

#[tokio::test]
async fn test_start_game_resets_round_state() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    assert_eq!(room.state, RoomState::Playing);
    assert_eq!(room.words.len(), GameRules::default().words_per_game);
    assert_eq!(room.current_word_index, 0);
    assert!(room.current_answers.is_empty());
    assert!(room.players.iter().all(|p| p.score == 0));
    assert!(room.players.iter().all(|p| p.status == PlayerStatus::InGame));
    assert!(room.words.iter().all(|w| TEST_WORDS.contains(&w.as_str())));
}

#[tokio::test]
async fn test_start_game_needs_two_players() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &[]).await;

    let err = setup.coordinator.start_game(&room.id, "alice").await.unwrap_err();
    assert_eq!(err, GameError::NotEnoughPlayers { min: 2 });
    assert_eq!(err.to_string(), "Need at least 2 players to start");
}

#[tokio::test]
async fn test_only_creator_starts_game() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    let err = setup.coordinator.start_game(&room.id, "bob").await.unwrap_err();
    assert_eq!(err.to_string(), "Only creator can start game");
}

#[tokio::test]
async fn test_player_ready_is_idempotent() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    let once = setup.coordinator.player_ready(&room.id, "bob").await.unwrap();
    let twice = setup.coordinator.player_ready(&room.id, "bob").await.unwrap();

    assert_eq!(once.players, twice.players);
    assert_eq!(once.state, twice.state);
}

#[tokio::test]
async fn test_player_ready_unknown_room() {
    let setup = TestGameServerSetup::new();
    let err = setup.coordinator.player_ready("ZZZZ", "bob").await.unwrap_err();
    assert_eq!(err, GameError::RoomNotFound);
}

#[tokio::test]
async fn test_answers_match_ignoring_case_and_whitespace() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    let first = setup
        .coordinator
        .submit_answer(&room.id, "alice", "Apple".into())
        .await
        .unwrap();
    assert!(!first.all_answered);

    let second = setup
        .coordinator
        .submit_answer(&room.id, "bob", "  apple ".into())
        .await
        .unwrap();
    assert!(second.all_answered);
    // raw text is kept
    assert_eq!(second.room.current_answers["bob"], "  apple ");

    let result = setup.coordinator.calculate_round_results(&room.id).await.unwrap();
    assert!(result.is_match);
    assert_eq!(result.word.as_deref(), Some(room.words[0].as_str()));
    assert!(result.room.players.iter().all(|p| p.score == 1));
}

#[tokio::test]
async fn test_different_answers_do_not_match() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    setup
        .coordinator
        .submit_answer(&room.id, "alice", "Apple".into())
        .await
        .unwrap();
    setup
        .coordinator
        .submit_answer(&room.id, "bob", "Orange".into())
        .await
        .unwrap();

    let result = setup.coordinator.calculate_round_results(&room.id).await.unwrap();
    assert!(!result.is_match);
    assert!(result.room.players.iter().all(|p| p.score == 0));
}

#[tokio::test]
async fn test_no_answers_never_match() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    let result = setup.coordinator.calculate_round_results(&room.id).await.unwrap();
    assert!(!result.is_match);
}

#[tokio::test]
async fn test_disconnected_players_do_not_stall_round() {
    let setup = TestGameServerSetup::new();
    let created = setup.create_room("Alice").await;
    let bob_connection = ConnectionId::new();
    setup
        .coordinator
        .join_room(&created.room.id, "Bob".into(), bob_connection, Some("bob".into()))
        .await
        .unwrap();
    setup.coordinator.start_game(&created.room.id, "alice").await.unwrap();

    setup.coordinator.disconnect_player(bob_connection).await.unwrap();

    let outcome = setup
        .coordinator
        .submit_answer(&created.room.id, "alice", "tea".into())
        .await
        .unwrap();
    assert!(outcome.all_answered);
}

#[tokio::test]
async fn test_submit_answer_outside_game() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    let err = setup
        .coordinator
        .submit_answer(&room.id, "alice", "tea".into())
        .await
        .unwrap_err();
    assert_eq!(err, GameError::GameNotInProgress);
}

#[tokio::test]
async fn test_spectators_cannot_answer() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;
    setup.join(&room.id, "Carol").await;

    let err = setup
        .coordinator
        .submit_answer(&room.id, "carol", "tea".into())
        .await
        .unwrap_err();
    assert_eq!(err, GameError::PlayerNotFound);
}

#[tokio::test]
async fn test_last_round_ends_game() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    let first = setup.coordinator.next_round(&room.id).await.unwrap();
    assert!(!first.game_over);
    assert_eq!(first.room.current_word_index, 1);

    let last = setup.coordinator.next_round(&room.id).await.unwrap();
    assert!(last.game_over);
    assert_eq!(last.room.state, RoomState::Ended);
    assert!(last
        .room
        .players
        .iter()
        .all(|p| p.status == PlayerStatus::AwaitingLobbyReturn));

    let err = setup.coordinator.next_round(&room.id).await.unwrap_err();
    assert_eq!(err, GameError::GameNotInProgress);
}

#[tokio::test]
async fn test_advance_round_requires_creator() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    let err = setup.coordinator.advance_round(&room.id, "bob").await.unwrap_err();
    assert_eq!(err.to_string(), "Only creator can advance round");

    let advanced = setup.coordinator.advance_round(&room.id, "alice").await.unwrap();
    assert_eq!(advanced.room.current_word_index, 1);
}

#[tokio::test]
async fn test_late_joiner_spectates() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    let joined = setup.join(&room.id, "Carol").await;

    assert_eq!(joined.room.players.len(), 2);
    assert_eq!(joined.room.spectators.len(), 1);
    assert_eq!(joined.room.spectators[0].id, "carol");
}

#[tokio::test]
async fn test_lobby_switch_waits_for_everyone() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;
    setup.join(&room.id, "Carol").await;

    // No-op while the game is still running
    let unchanged = setup.coordinator.check_and_switch_to_lobby(&room.id).await.unwrap();
    assert_eq!(unchanged.state, RoomState::Playing);

    assert!(setup.play_round(&room.id, &[("alice", "sun"), ("bob", "sun")]).await);
    assert!(!setup.play_round(&room.id, &[("alice", "sun"), ("bob", "moon")]).await);

    setup.coordinator.player_ready(&room.id, "alice").await.unwrap();
    let waiting = setup.coordinator.check_and_switch_to_lobby(&room.id).await.unwrap();
    assert_eq!(waiting.state, RoomState::Ended);
    assert_eq!(waiting.spectators.len(), 1);

    setup.coordinator.player_ready(&room.id, "bob").await.unwrap();
    let lobby = setup.coordinator.check_and_switch_to_lobby(&room.id).await.unwrap();
    assert_eq!(lobby.state, RoomState::Lobby);
    assert!(lobby.spectators.is_empty());
    assert_eq!(lobby.players.len(), 3);
    assert!(lobby.players.iter().all(|p| p.status == PlayerStatus::Idle));
    assert!(lobby.words.is_empty());
    // scores survive until the next game starts
    assert!(lobby.player("alice").is_some_and(|p| p.score == 1));
}

#[tokio::test]
async fn test_new_game_after_lobby_return() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;
    setup.play_round(&room.id, &[("alice", "x"), ("bob", "x")]).await;
    setup.play_round(&room.id, &[("alice", "y"), ("bob", "y")]).await;

    let err = setup.coordinator.start_game(&room.id, "alice").await.unwrap_err();
    assert_eq!(err, GameError::PlayersNotReady);

    setup.coordinator.player_ready(&room.id, "alice").await.unwrap();
    setup.coordinator.player_ready(&room.id, "bob").await.unwrap();
    setup.coordinator.check_and_switch_to_lobby(&room.id).await.unwrap();

    let restarted = setup.coordinator.start_game(&room.id, "alice").await.unwrap();
    assert!(restarted.players.iter().all(|p| p.score == 0));
}

#[tokio::test]
async fn test_kick_requires_creator() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    let err = setup
        .coordinator
        .kick_player(&room.id, "bob", "alice")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Only creator can kick players");

    let kick = setup
        .coordinator
        .kick_player(&room.id, "alice", "bob")
        .await
        .unwrap();
    assert_eq!(kick.kicked_player_id, "bob");
    assert!(kick.kicked_connection.is_some());
    assert!(kick.room.member("bob").is_none());
}

#[tokio::test]
async fn test_kick_removes_spectator() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_running_game("Alice", &["Bob"]).await;
    setup.join(&room.id, "Carol").await;

    let kick = setup
        .coordinator
        .kick_player(&room.id, "alice", "carol")
        .await
        .unwrap();
    assert!(kick.room.spectators.is_empty());
    assert_eq!(kick.room.players.len(), 2);
}

#[tokio::test]
async fn test_kick_absent_target_is_noop() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    let kick = setup
        .coordinator
        .kick_player(&room.id, "alice", "nobody")
        .await
        .unwrap();
    assert_eq!(kick.kicked_player_id, "nobody");
    assert!(kick.kicked_connection.is_none());
    assert_eq!(kick.room.players.len(), 2);
}

#[tokio::test]
async fn test_creator_leaving_destroys_room() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    let outcome = setup.coordinator.leave_room(&room.id, "alice").await.unwrap();

    assert!(matches!(outcome, LeaveOutcome::Destroyed));
    assert!(setup.coordinator.get_room_public(&room.id).await.is_none());
    assert_eq!(setup.store.room_count().await, 0);
}

#[tokio::test]
async fn test_player_leaving_keeps_room() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    match setup.coordinator.leave_room(&room.id, "bob").await.unwrap() {
        LeaveOutcome::Remaining(room) => {
            assert_eq!(room.players.len(), 1);
            assert!(room.member("bob").is_none());
        }
        LeaveOutcome::Destroyed => panic!("room should survive"),
    }

    let err = setup.coordinator.leave_room(&room.id, "bob").await.unwrap_err();
    assert_eq!(err, GameError::PlayerNotFound);
}

#[tokio::test]
async fn test_disconnect_keeps_membership() {
    let setup = TestGameServerSetup::new();
    let connection = ConnectionId::new();
    let created = setup
        .coordinator
        .create_room("Alice".into(), connection, Language::En, Some("alice".into()))
        .await
        .unwrap();

    let disconnection = setup.coordinator.disconnect_player(connection).await.unwrap();
    assert_eq!(disconnection.room_id, created.room.id);
    assert_eq!(disconnection.player_id, "alice");
    let alice = disconnection.room.player("alice").unwrap();
    assert!(!alice.is_connected);

    // A second drop of the same connection is not an error
    assert!(setup.coordinator.disconnect_player(connection).await.is_none());
    assert!(setup.coordinator.disconnect_player(ConnectionId::new()).await.is_none());
}

#[tokio::test]
async fn test_reconnect_updates_connection() {
    let setup = TestGameServerSetup::new();
    let old_connection = ConnectionId::new();
    let created = setup
        .coordinator
        .create_room("Alice".into(), old_connection, Language::En, Some("alice".into()))
        .await
        .unwrap();
    setup.coordinator.disconnect_player(old_connection).await;

    let new_connection = ConnectionId::new();
    let resumed = setup
        .coordinator
        .reconnect_player("alice", new_connection)
        .await
        .unwrap();

    assert_eq!(resumed.room.id, created.room.id);
    assert!(resumed.player.is_connected);
    assert_eq!(resumed.player.connection_ref, new_connection);
}

#[tokio::test]
async fn test_reconnect_unknown_player() {
    let setup = TestGameServerSetup::new();
    setup.setup_lobby("Alice", &[]).await;

    let err = setup
        .coordinator
        .reconnect_player("ghost", ConnectionId::new())
        .await
        .unwrap_err();
    assert_eq!(err, GameError::PlayerNotFound);
}

#[tokio::test]
async fn test_reconnect_after_kick_fails() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;
    setup.coordinator.kick_player(&room.id, "alice", "bob").await.unwrap();

    // The stale index entry must not resurrect the membership
    let err = setup
        .coordinator
        .reconnect_player("bob", ConnectionId::new())
        .await
        .unwrap_err();
    assert_eq!(err, GameError::PlayerNotFound);
}

#[tokio::test]
async fn test_reconnect_without_store_scans_cache() {
    let coordinator = without_store(GameRules::default());
    let created = coordinator
        .create_room("Alice".into(), ConnectionId::new(), Language::En, Some("alice".into()))
        .await
        .unwrap();

    let resumed = coordinator
        .reconnect_player("alice", ConnectionId::new())
        .await
        .unwrap();
    assert_eq!(resumed.room.id, created.room.id);
    assert!(!coordinator.store_available());
}

#[tokio::test]
async fn test_reconnect_through_peer_instance() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;
    let peer = setup.peer();

    // The peer has never seen this room; only the shared index knows about it
    let resumed = peer.reconnect_player("bob", ConnectionId::new()).await.unwrap();
    assert_eq!(resumed.room.id, room.id);

    // and the write is visible back on the first instance
    let seen = setup.coordinator.get_room_public(&room.id).await.unwrap();
    assert_eq!(
        seen.player("bob").map(|p| p.connection_ref),
        Some(resumed.player.connection_ref)
    );
}

#[tokio::test]
async fn test_store_outage_falls_back_to_cache() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;

    setup.store.set_available(false);

    let started = setup.coordinator.start_game(&room.id, "alice").await.unwrap();
    assert_eq!(started.state, RoomState::Playing);
    assert!(setup.coordinator.room_exists(&room.id).await);
}

#[tokio::test]
async fn test_changes_made_during_outage_survive_recovery() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &[]).await;

    setup.store.set_available(false);
    let joined = setup.join(&room.id, "Bob").await;
    assert_eq!(joined.room.players.len(), 2);

    setup.store.set_available(true);
    let recovered = setup.coordinator.get_room_public(&room.id).await.unwrap();
    assert_eq!(recovered.players.len(), 2);

    // Pushed back to the store, so other instances see it too
    let stored = setup.store.get(&room.id).await.unwrap();
    assert_eq!(stored.players.len(), 2);
    let peer = setup.peer();
    let reconnected = peer
        .reconnect_player("bob", ConnectionId::new())
        .await
        .unwrap();
    assert_eq!(reconnected.room.id, room.id);
}

#[tokio::test]
async fn test_room_created_during_outage_is_stored_on_recovery() {
    let setup = TestGameServerSetup::new();
    setup.store.set_available(false);
    let created = setup.create_room("Alice").await;

    setup.store.set_available(true);
    assert!(setup.coordinator.room_exists(&created.room.id).await);
    assert!(setup.store.get(&created.room.id).await.is_some());
}

#[tokio::test]
async fn test_newer_store_copy_wins_over_outage_write() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;
    let peer = setup.peer();

    setup.store.set_available(false);
    setup
        .coordinator
        .player_ready(&room.id, "bob")
        .await
        .unwrap();
    setup.store.set_available(true);

    tokio::time::sleep(Duration::from_millis(5)).await;
    peer.join_room(&room.id, "Carol".into(), ConnectionId::new(), Some("carol".into()))
        .await
        .unwrap();

    let current = setup.coordinator.get_room_public(&room.id).await.unwrap();
    assert!(current.has_member("carol"));
}

#[tokio::test]
async fn test_room_destroyed_on_peer_instance_stays_destroyed() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &["Bob"]).await;
    let peer = setup.peer();

    let outcome = peer.leave_room(&room.id, "alice").await.unwrap();
    assert!(matches!(outcome, LeaveOutcome::Destroyed));

    assert!(setup.coordinator.get_room_public(&room.id).await.is_none());
    assert!(!peer.room_exists(&room.id).await);

    let err = setup
        .coordinator
        .player_ready(&room.id, "bob")
        .await
        .unwrap_err();
    assert_eq!(err, GameError::RoomNotFound);
    assert!(setup.store.get(&room.id).await.is_none());
    assert_eq!(setup.coordinator.active_room_count().await, 0);
}

#[tokio::test]
async fn test_spectators_do_not_fill_the_room() {
    let setup = TestGameServerSetup::with_rules(GameRules::new(1, 2, 3));
    let room = setup.setup_running_game("Alice", &["Bob"]).await;

    let eve = setup.join(&room.id, "Eve").await;
    assert_eq!(eve.room.spectators.len(), 1);
    let finn = setup.join(&room.id, "Finn").await;
    assert_eq!(finn.room.players.len(), 2);
    assert_eq!(finn.room.spectators.len(), 2);

    setup.play_round(&room.id, &[("alice", "x"), ("bob", "x")]).await;
    setup.coordinator.player_ready(&room.id, "alice").await.unwrap();
    setup.coordinator.player_ready(&room.id, "bob").await.unwrap();
    let lobby = setup
        .coordinator
        .check_and_switch_to_lobby(&room.id)
        .await
        .unwrap();

    assert_eq!(lobby.state, RoomState::Lobby);
    assert_eq!(lobby.players.len(), 3);
    assert_eq!(lobby.spectators.len(), 1);
    assert_eq!(lobby.spectators[0].id, "finn");
}

#[tokio::test]
async fn test_concurrent_answers_are_all_recorded() {
    let setup = TestGameServerSetup::with_rules(GameRules::new(2, 2, 10));
    let names = ["Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi"];
    let room = setup.setup_running_game("Alice", &names).await;

    let mut handles = Vec::new();
    for name in names {
        let coordinator = setup.coordinator.clone();
        let room_id = room.id.clone();
        handles.push(tokio::spawn(async move {
            coordinator
                .submit_answer(&room_id, &name.to_lowercase(), "same".into())
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let current = setup.coordinator.get_room_public(&room.id).await.unwrap();
    assert_eq!(current.current_answers.len(), names.len());
}

#[tokio::test]
async fn test_cleanup_removes_only_inactive_rooms() {
    let store = Arc::new(game_store::MemoryRoomStore::new());
    let stale = game_server::coordinator::RoomCoordinator::new(
        store.clone(),
        test_word_pool(),
        GameRules::default(),
    )
    .with_cleanup(game_core::RoomCleanup::new(
        Duration::from_millis(50),
        Duration::from_secs(60),
    ));

    let old = stale
        .create_room("Alice".into(), ConnectionId::new(), Language::En, None)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    let fresh = stale
        .create_room("Bob".into(), ConnectionId::new(), Language::En, None)
        .await
        .unwrap();

    assert_eq!(stale.cleanup_inactive_rooms().await, 1);
    assert!(!stale.room_exists(&old.room.id).await);
    assert!(stale.room_exists(&fresh.room.id).await);
    assert_eq!(store.room_count().await, 1);
}

#[tokio::test]
async fn test_cleanup_sees_rooms_from_other_instances() {
    let setup = TestGameServerSetup::new();
    let room = setup.setup_lobby("Alice", &[]).await;

    let sweeper = game_server::coordinator::RoomCoordinator::new(
        setup.store.clone(),
        test_word_pool(),
        GameRules::default(),
    )
    .with_cleanup(game_core::RoomCleanup::new(Duration::ZERO, Duration::from_secs(60)));

    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(sweeper.cleanup_inactive_rooms().await, 1);
    assert!(setup.store.room_count().await == 0);
    assert!(!sweeper.room_exists(&room.id).await);
    assert!(!setup.coordinator.room_exists(&room.id).await);
}
