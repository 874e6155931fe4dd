use std::sync::Arc;
use tracing::{info, warn};

use crate::{DisabledRoomStore, RedisPool, RedisRoomStore, RoomStore};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub redis_url: Option<String>,
    pub max_connections: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            max_connections: 16,
        }
    }
}

/// Pick the store backend. An unset URL or an unreachable Redis both fall
/// back to [`DisabledRoomStore`]; startup never fails on the store.
pub async fn connect(config: &StoreConfig) -> Arc<dyn RoomStore> {
    let Some(url) = config.redis_url.as_deref().filter(|u| !u.is_empty()) else {
        info!("REDIS_URL not set, running without a shared room store");
        return Arc::new(DisabledRoomStore);
    };

    let pool = match RedisPool::new(url, config.max_connections) {
        Ok(pool) => pool,
        Err(e) => {
            warn!("Invalid Redis configuration, running without a shared room store: {}", e);
            return Arc::new(DisabledRoomStore);
        }
    };

    let store = RedisRoomStore::new(pool);
    match store.ping().await {
        Ok(()) => {
            info!("Connected to Redis room store");
            Arc::new(store)
        }
        Err(e) => {
            warn!("Redis unreachable, running without a shared room store: {}", e);
            Arc::new(DisabledRoomStore)
        }
    }
}
