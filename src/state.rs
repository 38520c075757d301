use std::sync::Arc;

use crate::application::services::Shortener;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::cache::CacheService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<Shortener>,
    /// Same store the shortener writes to, kept for health checks.
    pub store: Arc<dyn LinkStore>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        shortener: Arc<Shortener>,
        store: Arc<dyn LinkStore>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            shortener,
            store,
            cache,
        }
    }
}
