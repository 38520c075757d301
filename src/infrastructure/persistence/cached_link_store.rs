//! Look-aside cache decorator for any link store.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::Link;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;
use crate::infrastructure::cache::CacheService;

/// Wraps a [`LinkStore`] with a [`CacheService`] in front of long URL lookups.
///
/// Hits skip the inner store entirely. Misses fall through and populate the
/// cache, as do successful inserts. Cache errors are logged and ignored.
pub struct CachedLinkStore<S> {
    inner: S,
    cache: Arc<dyn CacheService>,
}

impl<S: LinkStore> CachedLinkStore<S> {
    pub fn new(inner: S, cache: Arc<dyn CacheService>) -> Self {
        Self { inner, cache }
    }

    async fn remember(&self, link: &Link) {
        if let Err(e) = self.cache.set_code(&link.long_url, &link.code, None).await {
            warn!("Failed to cache link {}: {}", link.code, e);
        }
    }
}

#[async_trait]
impl<S: LinkStore> LinkStore for CachedLinkStore<S> {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, StoreError> {
        match self.cache.get_code(long_url).await {
            Ok(Some(code)) => return Ok(Some(Link::new(code, long_url))),
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed, falling back to store: {}", e),
        }

        let link = self.inner.find_by_long_url(long_url).await?;
        if let Some(link) = &link {
            self.remember(link).await;
        }

        Ok(link)
    }

    async fn insert(&self, link: Link) -> Result<InsertOutcome, StoreError> {
        let outcome = self.inner.insert(link).await?;

        match &outcome {
            InsertOutcome::Created(link) | InsertOutcome::Existing(link) => {
                self.remember(link).await
            }
        }

        Ok(outcome)
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkStore;
    use crate::infrastructure::cache::{CacheError, MockCacheService};

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let mut inner = MockLinkStore::new();
        inner.expect_find_by_long_url().times(0);

        let mut cache = MockCacheService::new();
        cache
            .expect_get_code()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(Some("cached".to_string())));

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        let link = store.find_by_long_url("https://example.com").await.unwrap();
        assert_eq!(link, Some(Link::new("cached", "https://example.com")));
    }

    #[tokio::test]
    async fn test_cache_miss_populates_cache() {
        let mut inner = MockLinkStore::new();
        inner
            .expect_find_by_long_url()
            .times(1)
            .returning(|url| Ok(Some(Link::new("stored", url))));

        let mut cache = MockCacheService::new();
        cache.expect_get_code().returning(|_| Ok(None));
        cache
            .expect_set_code()
            .withf(|url, code, ttl| url == "https://example.com" && code == "stored" && ttl.is_none())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        let link = store.find_by_long_url("https://example.com").await.unwrap();
        assert_eq!(link.unwrap().code, "stored");
    }

    #[tokio::test]
    async fn test_miss_everywhere_does_not_cache() {
        let mut inner = MockLinkStore::new();
        inner.expect_find_by_long_url().returning(|_| Ok(None));

        let mut cache = MockCacheService::new();
        cache.expect_get_code().returning(|_| Ok(None));
        cache.expect_set_code().times(0);

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        assert_eq!(store.find_by_long_url("https://example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cache_error_falls_back_to_store() {
        let mut inner = MockLinkStore::new();
        inner
            .expect_find_by_long_url()
            .times(1)
            .returning(|url| Ok(Some(Link::new("stored", url))));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_code()
            .returning(|_| Err(CacheError::OperationError("down".to_string())));
        cache
            .expect_set_code()
            .returning(|_, _, _| Err(CacheError::OperationError("down".to_string())));

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        let link = store.find_by_long_url("https://example.com").await.unwrap();
        assert_eq!(link.unwrap().code, "stored");
    }

    #[tokio::test]
    async fn test_insert_caches_winning_link() {
        let mut inner = MockLinkStore::new();
        inner
            .expect_insert()
            .times(1)
            .returning(|link| Ok(InsertOutcome::Existing(Link::new("winner", link.long_url))));

        let mut cache = MockCacheService::new();
        cache
            .expect_set_code()
            .withf(|_, code, _| code == "winner")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        let outcome = store
            .insert(Link::new("loser", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome.into_link().code, "winner");
    }

    #[tokio::test]
    async fn test_insert_succeeds_when_cache_write_fails() {
        let mut inner = MockLinkStore::new();
        inner
            .expect_insert()
            .times(1)
            .returning(|link| Ok(InsertOutcome::Created(link)));

        let mut cache = MockCacheService::new();
        cache
            .expect_set_code()
            .times(1)
            .returning(|_, _, _| Err(CacheError::OperationError("down".to_string())));

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        let outcome = store
            .insert(Link::new("fresh", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Created(Link::new("fresh", "https://example.com")));
    }

    #[tokio::test]
    async fn test_insert_failure_is_not_cached() {
        let mut inner = MockLinkStore::new();
        inner
            .expect_insert()
            .returning(|link| Err(StoreError::CodeTaken(link.code)));

        let mut cache = MockCacheService::new();
        cache.expect_set_code().times(0);

        let store = CachedLinkStore::new(inner, Arc::new(cache));

        let result = store.insert(Link::new("taken", "https://example.com")).await;
        assert_eq!(result, Err(StoreError::CodeTaken("taken".to_string())));
    }
}
