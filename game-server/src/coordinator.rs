use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use game_core::{
    Departure, GameRules, ROOM_CODE_MAX_ATTEMPTS, RoomCleanup, RoomTransitions, WordPool,
    generate_room_code, now_millis,
};
use game_store::{DEFAULT_ROOM_TTL, RoomStore};
use game_types::{ConnectionId, GameError, Language, Player, PlayerId, Room, RoomId};

/// A room together with the member an operation was performed for.
#[derive(Debug, Clone)]
pub struct Membership {
    pub room: Room,
    pub player: Player,
}

#[derive(Debug, Clone)]
pub struct Disconnection {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub room: Room,
}

#[derive(Debug, Clone)]
pub struct KickOutcome {
    pub room: Room,
    pub kicked_player_id: PlayerId,
    /// Connection the kicked member was last seen on, if they were still in the room.
    pub kicked_connection: Option<ConnectionId>,
}

#[derive(Debug, Clone)]
pub enum LeaveOutcome {
    Destroyed,
    Remaining(Room),
}

#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub room: Room,
    pub all_answered: bool,
}

#[derive(Debug, Clone)]
pub struct RoundResult {
    pub room: Room,
    pub is_match: bool,
    pub word: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RoundAdvance {
    pub room: Room,
    pub game_over: bool,
}

/// Local copy of a room, with what the store has seen of it.
#[derive(Debug, Clone)]
struct CachedRoom {
    room: Room,
    /// The store accepted this room at least once.
    persisted: bool,
    /// The latest local write never reached the store.
    dirty: bool,
}

/// Authoritative owner of room state.
///
/// Rooms live in a local cache mirrored into the [`RoomStore`]. Each public
/// operation holds the room's lock across load, mutate and persist, and
/// mutates a copy so a failed operation leaves nothing behind.
///
/// Writes made while the store is unreachable stay in the cache and are pushed
/// back once it answers again, unless the store holds a newer copy. A room the
/// store has seen and no longer has was destroyed elsewhere and is dropped.
pub struct RoomCoordinator {
    rooms: RwLock<HashMap<RoomId, CachedRoom>>,
    room_locks: DashMap<RoomId, Arc<Mutex<()>>>,
    store: Arc<dyn RoomStore>,
    word_pool: Arc<WordPool>,
    rules: GameRules,
    cleanup: RoomCleanup,
    room_ttl: Duration,
}

impl RoomCoordinator {
    pub fn new(store: Arc<dyn RoomStore>, word_pool: Arc<WordPool>, rules: GameRules) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            room_locks: DashMap::new(),
            store,
            word_pool,
            rules,
            cleanup: RoomCleanup::default(),
            room_ttl: DEFAULT_ROOM_TTL,
        }
    }

    pub fn with_cleanup(mut self, cleanup: RoomCleanup) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn with_room_ttl(mut self, room_ttl: Duration) -> Self {
        self.room_ttl = room_ttl;
        self
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn store_available(&self) -> bool {
        self.store.is_available()
    }

    pub async fn create_room(
        &self,
        creator_name: String,
        connection_ref: ConnectionId,
        language: Language,
        player_id: Option<PlayerId>,
    ) -> Result<Membership, GameError> {
        let player_id = player_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        for _ in 0..ROOM_CODE_MAX_ATTEMPTS {
            let room_id = generate_room_code();
            let lock = self.lock_for(&room_id);
            let _guard = lock.lock().await;

            if self.load(&room_id).await.is_some() {
                debug!("Room code {} already taken, retrying", room_id);
                continue;
            }

            let creator = Player::new(player_id.clone(), creator_name.clone(), connection_ref, true);
            let room = Room::new(room_id, language, creator.clone(), now_millis());
            self.save(&room).await;

            info!(room_id = %room.id, %language, "Room created");
            return Ok(Membership {
                room,
                player: creator,
            });
        }

        warn!(
            "Gave up generating a room code after {} attempts",
            ROOM_CODE_MAX_ATTEMPTS
        );
        Err(GameError::RoomCodeExhausted)
    }

    pub async fn join_room(
        &self,
        room_id: &str,
        player_name: String,
        connection_ref: ConnectionId,
        player_id: Option<PlayerId>,
    ) -> Result<Membership, GameError> {
        let player_id = player_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let rules = &self.rules;

        let (room, player) = self
            .transact(room_id, |room| {
                room.join(rules, player_id, player_name, connection_ref)
            })
            .await?;

        debug!(room_id = %room.id, player_id = %player.id, "Player joined");
        Ok(Membership { room, player })
    }

    pub async fn reconnect_player(
        &self,
        player_id: &str,
        connection_ref: ConnectionId,
    ) -> Result<Membership, GameError> {
        let room_id = self
            .locate_player(player_id)
            .await
            .ok_or(GameError::PlayerNotFound)?;

        // The room may vanish between locating and locking
        let (room, player) = self
            .transact(&room_id, |room| room.reconnect(player_id, connection_ref))
            .await
            .map_err(|e| match e {
                GameError::RoomNotFound => GameError::PlayerNotFound,
                other => other,
            })?;

        info!(room_id = %room.id, %player_id, "Player reconnected");
        Ok(Membership { room, player })
    }

    /// Flag whoever holds `connection_ref` as disconnected. Unknown or
    /// already-disconnected connections are not an error.
    pub async fn disconnect_player(&self, connection_ref: ConnectionId) -> Option<Disconnection> {
        let candidates: Vec<RoomId> = {
            let rooms = self.rooms.read().await;
            rooms
                .values()
                .map(|cached| &cached.room)
                .filter(|room| {
                    room.members()
                        .any(|p| p.connection_ref == connection_ref && p.is_connected)
                })
                .map(|room| room.id.clone())
                .collect()
        };

        for room_id in candidates {
            let lock = self.lock_for(&room_id);
            let _guard = lock.lock().await;

            let Some(mut room) = self.load(&room_id).await else {
                self.release_lock(&room_id, &lock);
                continue;
            };
            let Some(player_id) = room.disconnect(connection_ref) else {
                continue;
            };
            room.touch(now_millis());
            self.save(&room).await;

            debug!(%room_id, %player_id, "Player disconnected");
            return Some(Disconnection {
                room_id,
                player_id,
                room,
            });
        }

        None
    }

    pub async fn kick_player(
        &self,
        room_id: &str,
        requester_id: &str,
        target_id: &str,
    ) -> Result<KickOutcome, GameError> {
        let (room, kicked) = self
            .transact(room_id, |room| room.kick(requester_id, target_id))
            .await?;

        info!(room_id = %room.id, %target_id, "Player kicked");
        Ok(KickOutcome {
            room,
            kicked_player_id: target_id.to_string(),
            kicked_connection: kicked.map(|p| p.connection_ref),
        })
    }

    pub async fn leave_room(&self, room_id: &str, player_id: &str) -> Result<LeaveOutcome, GameError> {
        let lock = self.lock_for(room_id);
        let _guard = lock.lock().await;

        let Some(mut room) = self.load(room_id).await else {
            self.release_lock(room_id, &lock);
            return Err(GameError::RoomNotFound);
        };
        match room.leave(player_id)? {
            Departure::CreatorLeft => {
                self.remove(room_id, &lock).await;
                info!(%room_id, "Creator left, room destroyed");
                Ok(LeaveOutcome::Destroyed)
            }
            Departure::Left(player) => {
                room.touch(now_millis());
                self.save(&room).await;
                debug!(%room_id, player_id = %player.id, "Player left");
                Ok(LeaveOutcome::Remaining(room))
            }
        }
    }

    pub async fn player_ready(&self, room_id: &str, player_id: &str) -> Result<Room, GameError> {
        let (room, ()) = self
            .transact(room_id, |room| {
                room.mark_ready(player_id);
                Ok(())
            })
            .await?;
        Ok(room)
    }

    pub async fn start_game(&self, room_id: &str, requester_id: &str) -> Result<Room, GameError> {
        let rules = &self.rules;
        let pool = self.word_pool.as_ref();

        let (room, ()) = self
            .transact(room_id, |room| room.start_game(rules, requester_id, pool))
            .await?;
        Ok(room)
    }

    pub async fn submit_answer(
        &self,
        room_id: &str,
        player_id: &str,
        answer: String,
    ) -> Result<AnswerOutcome, GameError> {
        let (room, all_answered) = self
            .transact(room_id, |room| room.record_answer(player_id, answer))
            .await?;
        Ok(AnswerOutcome { room, all_answered })
    }

    /// Score the current round. Calling this twice for the same round scores it twice.
    pub async fn calculate_round_results(&self, room_id: &str) -> Result<RoundResult, GameError> {
        let (room, score) = self
            .transact(room_id, |room| Ok(room.score_round()))
            .await?;

        debug!(%room_id, is_match = score.is_match, "Round scored");
        Ok(RoundResult {
            room,
            is_match: score.is_match,
            word: score.word,
        })
    }

    pub async fn next_round(&self, room_id: &str) -> Result<RoundAdvance, GameError> {
        let (room, game_over) = self
            .transact(room_id, |room| room.advance_round())
            .await?;
        Ok(RoundAdvance { room, game_over })
    }

    /// [`Self::next_round`] restricted to the room's creator.
    pub async fn advance_round(&self, room_id: &str, requester_id: &str) -> Result<RoundAdvance, GameError> {
        let (room, game_over) = self
            .transact(room_id, |room| {
                if !room.is_creator(requester_id) {
                    return Err(GameError::Forbidden {
                        action: "advance round",
                    });
                }
                room.advance_round()
            })
            .await?;
        Ok(RoundAdvance { room, game_over })
    }

    pub async fn check_and_switch_to_lobby(&self, room_id: &str) -> Result<Room, GameError> {
        let rules = &self.rules;
        let (room, _switched) = self
            .transact(room_id, |room| Ok(room.return_to_lobby(rules)))
            .await?;
        Ok(room)
    }

    pub async fn get_room_public(&self, room_id: &str) -> Option<Room> {
        self.read(room_id).await
    }

    pub async fn room_exists(&self, room_id: &str) -> bool {
        self.read(room_id).await.is_some()
    }

    /// Drop every room idle for longer than the inactivity timeout. Returns how many went.
    pub async fn cleanup_inactive_rooms(&self) -> usize {
        let mut candidates: HashSet<RoomId> = self.rooms.read().await.keys().cloned().collect();
        if self.store.is_available() {
            candidates.extend(self.store.list_all().await.into_iter().map(|room| room.id));
        }

        let mut removed = 0;
        for room_id in candidates {
            let lock = self.lock_for(&room_id);
            let _guard = lock.lock().await;

            let Some(room) = self.load(&room_id).await else {
                self.release_lock(&room_id, &lock);
                continue;
            };

            if self.cleanup.is_inactive(&room, now_millis()) {
                self.remove(&room_id, &lock).await;
                info!(%room_id, "Room removed due to inactivity");
                removed += 1;
            }
        }

        removed
    }

    pub async fn active_room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Run one operation as a transaction on `room_id`.
    async fn transact<T, F>(&self, room_id: &str, mutate: F) -> Result<(Room, T), GameError>
    where
        F: FnOnce(&mut Room) -> Result<T, GameError>,
    {
        let lock = self.lock_for(room_id);
        let _guard = lock.lock().await;

        let Some(mut room) = self.load(room_id).await else {
            self.release_lock(room_id, &lock);
            return Err(GameError::RoomNotFound);
        };
        let value = mutate(&mut room)?;
        room.touch(now_millis());
        self.save(&room).await;

        Ok((room, value))
    }

    /// Load under the room's lock, for callers that only look.
    async fn read(&self, room_id: &str) -> Option<Room> {
        let lock = self.lock_for(room_id);
        let _guard = lock.lock().await;

        let room = self.load(room_id).await;
        if room.is_none() {
            self.release_lock(room_id, &lock);
        }
        room
    }

    fn lock_for(&self, room_id: &str) -> Arc<Mutex<()>> {
        self.room_locks
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Forget `room_id`'s lock unless another task is waiting on it.
    fn release_lock(&self, room_id: &str, lock: &Arc<Mutex<()>>) {
        // One reference in the map, one held by the caller
        self.room_locks.remove_if(room_id, |_, held| {
            Arc::ptr_eq(held, lock) && Arc::strong_count(held) <= 2
        });
    }

    /// Reconcile the cached copy with the store. Must run under the room's lock.
    async fn load(&self, room_id: &str) -> Option<Room> {
        let cached = self.rooms.read().await.get(room_id).cloned();
        if !self.store.is_available() {
            return cached.map(|c| c.room);
        }

        let stored = self.store.get(room_id).await;
        // A read that failed looks like a miss; the store flags itself unavailable
        if !self.store.is_available() {
            return cached.map(|c| c.room);
        }

        match (stored, cached) {
            (Some(stored), Some(cached))
                if cached.dirty && cached.room.last_activity >= stored.last_activity =>
            {
                info!(%room_id, "Pushing changes made while the store was unreachable");
                self.save(&cached.room).await;
                Some(cached.room)
            }
            (Some(stored), _) => {
                self.rooms.write().await.insert(
                    room_id.to_string(),
                    CachedRoom {
                        room: stored.clone(),
                        persisted: true,
                        dirty: false,
                    },
                );
                Some(stored)
            }
            (None, Some(cached)) if !cached.persisted => {
                info!(%room_id, "Storing room created while the store was unreachable");
                self.save(&cached.room).await;
                Some(cached.room)
            }
            (None, Some(_)) => {
                debug!(%room_id, "Room is gone from the store, dropping local copy");
                self.rooms.write().await.remove(room_id);
                None
            }
            (None, None) => None,
        }
    }

    async fn save(&self, room: &Room) {
        let stored = self.persist(room).await;

        let mut rooms = self.rooms.write().await;
        let persisted = stored || rooms.get(&room.id).is_some_and(|c| c.persisted);
        rooms.insert(
            room.id.clone(),
            CachedRoom {
                room: room.clone(),
                persisted,
                dirty: !stored,
            },
        );
    }

    /// Write the room and its member index through to the store. Returns
    /// whether the store took it.
    async fn persist(&self, room: &Room) -> bool {
        if !self.store.is_available() {
            return false;
        }

        self.store.put(&room.id, room, self.room_ttl).await;
        for member in room.members() {
            self.store
                .index_player(&member.id, &room.id, self.room_ttl)
                .await;
        }
        self.store.is_available()
    }

    async fn remove(&self, room_id: &str, lock: &Arc<Mutex<()>>) {
        self.rooms.write().await.remove(room_id);
        self.store.delete(room_id).await;
        self.release_lock(room_id, lock);
    }

    /// Index lookup first; the linear cache scan covers deployments without a shared store.
    async fn locate_player(&self, player_id: &str) -> Option<RoomId> {
        if self.store.is_available() {
            if let Some(room_id) = self.store.lookup_player_room(player_id).await {
                // Index entries outlive kicks and departures until their TTL runs out
                let indexed = self.read(&room_id).await;
                if indexed.is_some_and(|room| room.has_member(player_id)) {
                    return Some(room_id);
                }
            }
        }

        let rooms = self.rooms.read().await;
        rooms
            .values()
            .map(|cached| &cached.room)
            .find(|room| room.has_member(player_id))
            .map(|room| room.id.clone())
    }
}
