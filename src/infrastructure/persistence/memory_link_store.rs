//! In-process link store for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::Link;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Tables {
    /// long URL -> short code
    by_long_url: HashMap<String, String>,
    /// short code -> long URL
    by_code: HashMap<String, String>,
}

/// Link store kept in memory and lost on restart.
///
/// Both indexes live under one lock, so the existence check and the write
/// in [`LinkStore::insert`] happen atomically.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    tables: RwLock<Tables>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_code.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_long_url
            .get(long_url)
            .map(|code| Link::new(code.clone(), long_url)))
    }

    async fn insert(&self, link: Link) -> Result<InsertOutcome, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(code) = tables.by_long_url.get(&link.long_url) {
            return Ok(InsertOutcome::Existing(Link::new(
                code.clone(),
                link.long_url,
            )));
        }

        if tables.by_code.contains_key(&link.code) {
            return Err(StoreError::CodeTaken(link.code));
        }

        tables
            .by_long_url
            .insert(link.long_url.clone(), link.code.clone());
        tables
            .by_code
            .insert(link.code.clone(), link.long_url.clone());

        Ok(InsertOutcome::Created(link))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
