//! HTTP server initialization and runtime setup.
//!
//! Handles store and cache setup and the Axum server lifecycle.

use crate::application::services::Shortener;
use crate::config::{Config, StorageBackend};
use crate::domain::policy::SelfReferencePolicy;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{CachedLinkStore, MemoryLinkStore, PgLinkStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connects to PostgreSQL with the configured pool settings and applies migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Connects to Redis if the configured backend is cached, falling back to [`NullCache`].
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let (Some(redis_url), Some(namespace)) = (&config.redis_url, config.cache_namespace())
    else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds, &namespace).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis, namespace {})", namespace);
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Builds the link store selected by `STORAGE_BACKEND`.
///
/// The PostgreSQL store is wrapped with `cache`. The in-memory store is used
/// bare: its contents die with the process while cached entries would not.
///
/// # Errors
///
/// Returns an error if the PostgreSQL backend is selected and cannot be reached.
pub async fn build_store(
    config: &Config,
    cache: Arc<dyn CacheService>,
) -> Result<Arc<dyn LinkStore>> {
    let store: Arc<dyn LinkStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = connect_database(config, database_url).await?;
            Arc::new(CachedLinkStore::new(PgLinkStore::new(Arc::new(pool)), cache))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            if config.redis_url.is_some() {
                tracing::warn!("REDIS_URL is ignored for the in-memory backend");
            }
            Arc::new(MemoryLinkStore::new())
        }
    };

    Ok(store)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The link store cannot be initialized
/// - `SERVICE_DOMAIN` does not produce a valid exclusion pattern
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache = connect_cache(&config).await;
    let store = build_store(&config, cache.clone()).await?;

    let policy = SelfReferencePolicy::new(&config.service_domain)
        .context("Invalid SERVICE_DOMAIN")?;
    let shortener = Shortener::new(store.clone(), Arc::new(RandomCodeGenerator), policy)
        .with_max_code_attempts(config.max_code_attempts);

    let state = AppState::new(Arc::new(shortener), store, cache);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::infrastructure::cache::MockCacheService;

    fn memory_config() -> Config {
        Config {
            storage_backend: StorageBackend::Memory,
            database_url: None,
            redis_url: Some("redis://localhost:6379".to_string()),
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            cache_ttl_seconds: 3600,
            service_domain: "shitp.st".to_string(),
            max_code_attempts: 10,
            db_max_connections: 10,
            db_connect_timeout: 30,
            db_idle_timeout: 600,
            db_max_lifetime: 1800,
        }
    }

    #[tokio::test]
    async fn test_memory_backend_bypasses_cache() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get_code()
            .times(0)
            .returning(|_| Ok(Some("oldcode".to_string())));
        cache.expect_set_code().times(0);

        let store = build_store(&memory_config(), Arc::new(cache)).await.unwrap();

        assert_eq!(store.find_by_long_url("https://example.com").await.unwrap(), None);

        let outcome = store
            .insert(Link::new("fresh", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome.into_link().code, "fresh");
    }

    #[tokio::test]
    async fn test_memory_backend_gets_null_cache() {
        let cache = connect_cache(&memory_config()).await;

        assert!(cache.health_check().await);
        assert_eq!(cache.get_code("https://example.com").await.unwrap(), None);
    }
}
