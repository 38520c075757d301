//! Storage contract for links.

use crate::domain::entities::Link;
use crate::error::StoreError;
use async_trait::async_trait;

/// Result of a conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The link was written.
    Created(Link),
    /// Another link already maps the same long URL; nothing was written.
    Existing(Link),
}

impl InsertOutcome {
    /// Returns the link that now owns the long URL, whichever way the insert went.
    pub fn into_link(self) -> Link {
        match self {
            Self::Created(link) | Self::Existing(link) => link,
        }
    }
}

/// Persistence for [`Link`] records with a lookup path keyed by long URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process map
/// - [`crate::infrastructure::persistence::CachedLinkStore`] - cache decorator
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Finds the link for an exact long URL.
    ///
    /// Returns at most one match; `Ok(None)` when the URL has never been shortened.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the lookup fails.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, StoreError>;

    /// Inserts `link` unless a link for the same long URL already exists.
    ///
    /// The check and the write are a single atomic step in the backend, so
    /// concurrent callers for one long URL all observe the same winner.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CodeTaken`] if the short code already belongs to
    /// a different long URL, and [`StoreError::Backend`] on storage failure.
    async fn insert(&self, link: Link) -> Result<InsertOutcome, StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
