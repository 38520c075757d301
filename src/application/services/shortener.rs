//! Shorten-or-lookup service.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::policy::SelfReferencePolicy;
use crate::domain::repositories::LinkStore;
use crate::error::{ShortenError, StoreError};
use crate::utils::code_generator::{CodeGenerator, is_reserved};

/// Maps long URLs to short codes, minting a new code only for unseen URLs.
///
/// The service holds no mutable state and is shared across request tasks.
/// Uniqueness per long URL is delegated to [`LinkStore::insert`], which is a
/// conditional write; concurrent callers shortening the same new URL all
/// receive the code of whichever insert won.
pub struct Shortener {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    policy: SelfReferencePolicy,
    max_code_attempts: usize,
}

impl Shortener {
    /// Attempt budget used when none is configured.
    pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

    /// Creates a new shortener.
    pub fn new(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn CodeGenerator>,
        policy: SelfReferencePolicy,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
            max_code_attempts: Self::DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Sets how many candidate codes may be drawn for a single new link.
    ///
    /// Values below one are raised to one.
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Returns the short code for `long_url`, creating a link if needed.
    ///
    /// 1. Self-referential URLs are rejected before the store is touched.
    /// 2. An existing link for the exact URL is returned unchanged, with no write.
    /// 3. Otherwise candidate codes are drawn, skipping the reserved word and
    ///    codes already owned by other URLs, until one is persisted or the
    ///    attempt budget runs out.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::SelfReferential`] if the URL targets the service's own domain
    /// - [`ShortenError::Store`] if the lookup or the insert fails
    /// - [`ShortenError::GenerationExhausted`] if every candidate was unusable
    pub async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        if self.policy.is_self_referential(long_url) {
            return Err(ShortenError::SelfReferential);
        }

        if let Some(existing) = self.store.find_by_long_url(long_url).await? {
            return Ok(existing.code);
        }

        for _ in 0..self.max_code_attempts {
            let code = self.generator.generate();
            if is_reserved(&code) {
                continue;
            }

            match self.store.insert(Link::new(code, long_url)).await {
                Ok(outcome) => return Ok(outcome.into_link().code),
                Err(StoreError::CodeTaken(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(ShortenError::GenerationExhausted {
            attempts: self.max_code_attempts,
        })
    }

    /// Looks up the link for an exact long URL without creating one.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::Store`] if the lookup fails.
    pub async fn lookup(&self, long_url: &str) -> Result<Option<Link>, ShortenError> {
        Ok(self.store.find_by_long_url(long_url).await?)
    }

    /// The exclusion policy this shortener enforces.
    pub fn policy(&self) -> &SelfReferencePolicy {
        &self.policy
    }
}
