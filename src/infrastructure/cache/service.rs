//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Look-aside cache for `long URL -> short code` mappings.
///
/// Links are immutable, so an entry never needs invalidation; it only
/// expires by TTL. Implementations must be thread-safe and report backend
/// failures as errors; callers decide whether to fall back to the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the short code cached for a long URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(code))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_code(&self, long_url: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with an optional TTL in seconds.
    ///
    /// When `ttl_seconds` is `None` the implementation's default TTL applies.
    async fn set_code(
        &self,
        long_url: &str,
        code: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
