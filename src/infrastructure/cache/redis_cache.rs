//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::utils::url_hash::long_url_hash;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for `long URL -> short code` lookups.
///
/// Keys are `link:<namespace>:<sha256(long_url)>`, so arbitrarily long URLs
/// map to fixed-size keys and deployments sharing one Redis stay apart.
/// Redis failures are returned as [`CacheError::OperationError`].
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set_code`] is
    ///   called with `ttl_seconds = None`; controlled via `CACHE_TTL_SECONDS`
    /// - `namespace` - identity of the backing store, embedded in every key
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        default_ttl_seconds: u64,
        namespace: &str,
    ) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: format!("link:{namespace}:"),
        })
    }

    fn build_key(&self, long_url: &str) -> String {
        format!("{}{}", self.key_prefix, long_url_hash(long_url))
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_code(&self, long_url: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(long_url);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(code)) => {
                debug!("Cache HIT: {} -> {}", key, code);
                Ok(Some(code))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Err(CacheError::OperationError(e.to_string()))
            }
        }
    }

    async fn set_code(
        &self,
        long_url: &str,
        code: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(long_url);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl_seconds.unwrap_or(self.default_ttl);

        match conn.set_ex::<_, _, ()>(&key, code, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} -> {} (TTL: {}s)", key, code, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Err(CacheError::OperationError(e.to_string()))
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
