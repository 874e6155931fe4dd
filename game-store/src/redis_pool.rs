//! Pooled Redis access with JSON values.

use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};

/// Keys fetched per SCAN round trip.
const SCAN_BATCH: usize = 100;

#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    pub fn new(url: &str, max_connections: usize) -> StoreResult<Self> {
        let pool = Config::from_url(url)
            .builder()
            .map_err(|e| StoreError::CreatePool(e.to_string()))?
            .max_size(max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| StoreError::CreatePool(e.to_string()))?;

        tracing::info!(
            url = %redact_url(url),
            max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    async fn connection(&self) -> StoreResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    pub async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    pub async fn set_json<V: serde::Serialize>(&self, key: &str, value: &V, ttl: Duration) -> StoreResult<()> {
        let serialized = serde_json::to_string(value)?;
        self.set_string(key, &serialized, ttl).await
    }

    pub async fn set_string(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }

    pub async fn get_json<V: serde::de::DeserializeOwned>(&self, key: &str) -> StoreResult<Option<V>> {
        match self.get_string(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    pub async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let deleted: i32 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Cursor-based key listing; never blocks Redis the way `KEYS` does.
    pub async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let mut cursor: u64 = 0;
        let mut all_keys = Vec::new();

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            all_keys.extend(keys);
            cursor = next_cursor;

            if cursor == 0 {
                break;
            }
        }

        Ok(all_keys)
    }
}

/// Strip credentials before a URL reaches the logs.
pub fn redact_url(url: &str) -> &str {
    match url.rsplit_once('@') {
        Some((_, host)) => host,
        None => url,
    }
}
