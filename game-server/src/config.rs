use std::env;
use std::str::FromStr;
use std::time::Duration;

use game_core::{GameRules, RoomCleanup};
use game_store::StoreConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("MIN_PLAYERS ({min}) must not exceed MAX_PLAYERS ({max})")]
    PlayerBounds { min: usize, max: usize },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub redis_url: Option<String>,
    pub redis_max_connections: usize,
    pub words_per_game: usize,
    pub min_players: usize,
    pub max_players: usize,
    pub room_inactivity_timeout_seconds: u64,
    pub cleanup_interval_seconds: u64,
    pub room_ttl_seconds: u64,
    pub words_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            redis_url: None,
            redis_max_connections: 16,
            words_per_game: 2,
            min_players: 2,
            max_players: 10,
            room_inactivity_timeout_seconds: 15 * 60,
            cleanup_interval_seconds: 60,
            room_ttl_seconds: 60 * 60,
            words_directory: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(&get, "PORT", defaults.port)?,
            redis_url: get("REDIS_URL"),
            redis_max_connections: parse_or(&get, "REDIS_MAX_CONNECTIONS", defaults.redis_max_connections)?,
            words_per_game: parse_or(&get, "WORDS_PER_GAME", defaults.words_per_game)?,
            min_players: parse_or(&get, "MIN_PLAYERS", defaults.min_players)?,
            max_players: parse_or(&get, "MAX_PLAYERS", defaults.max_players)?,
            room_inactivity_timeout_seconds: parse_or(
                &get,
                "ROOM_INACTIVITY_TIMEOUT_SECONDS",
                defaults.room_inactivity_timeout_seconds,
            )?,
            cleanup_interval_seconds: parse_or(&get, "CLEANUP_INTERVAL_SECONDS", defaults.cleanup_interval_seconds)?,
            room_ttl_seconds: parse_or(&get, "ROOM_TTL_SECONDS", defaults.room_ttl_seconds)?,
            words_directory: get("WORDS_DIRECTORY"),
        };

        if config.min_players > config.max_players {
            return Err(ConfigError::PlayerBounds {
                min: config.min_players,
                max: config.max_players,
            });
        }

        Ok(config)
    }

    pub fn rules(&self) -> GameRules {
        GameRules::new(self.words_per_game, self.min_players, self.max_players)
    }

    pub fn cleanup(&self) -> RoomCleanup {
        RoomCleanup::new(
            Duration::from_secs(self.room_inactivity_timeout_seconds),
            Duration::from_secs(self.cleanup_interval_seconds.max(1)),
        )
    }

    pub fn room_ttl(&self) -> Duration {
        Duration::from_secs(self.room_ttl_seconds)
    }

    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            redis_url: self.redis_url.clone(),
            max_connections: self.redis_max_connections,
        }
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
