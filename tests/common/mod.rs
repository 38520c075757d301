#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum_test::TestServer;
use shitpost_shortener::application::services::Shortener;
use shitpost_shortener::domain::entities::Link;
use shitpost_shortener::domain::policy::SelfReferencePolicy;
use shitpost_shortener::domain::repositories::{InsertOutcome, LinkStore};
use shitpost_shortener::error::StoreError;
use shitpost_shortener::infrastructure::cache::{CacheService, NullCache};
use shitpost_shortener::infrastructure::persistence::MemoryLinkStore;
use shitpost_shortener::state::AppState;
use shitpost_shortener::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub const SERVICE_DOMAIN: &str = "shitp.st";

/// Store whose every operation fails, for exercising error paths.
pub struct FailingStore;

#[async_trait]
impl LinkStore for FailingStore {
    async fn find_by_long_url(&self, _long_url: &str) -> Result<Option<Link>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn insert(&self, _link: Link) -> Result<InsertOutcome, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Generator replaying a fixed list of codes, then falling back to random ones.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RandomCodeGenerator.generate())
    }
}

pub fn create_shortener(
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
) -> Shortener {
    Shortener::new(
        store,
        generator,
        SelfReferencePolicy::new(SERVICE_DOMAIN).unwrap(),
    )
}

pub fn create_state(store: Arc<dyn LinkStore>, generator: Arc<dyn CodeGenerator>) -> AppState {
    let cache: Arc<dyn CacheService> = Arc::new(NullCache::new());
    let shortener = Arc::new(create_shortener(store.clone(), generator));

    AppState::new(shortener, store, cache)
}

/// State over a fresh in-memory store, returned alongside the store for assertions.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let state = create_state(store.clone(), Arc::new(RandomCodeGenerator));

    (state, store)
}

pub fn create_server(app: Router) -> TestServer {
    TestServer::new(app).unwrap()
}
