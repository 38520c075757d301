//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;
use crate::utils::url_hash::long_url_hash;

/// Name of the primary key constraint on `links.short_url`.
const CODE_CONSTRAINT: &str = "links_pkey";

/// PostgreSQL store backed by the `links` table.
///
/// Long URLs are looked up through the unique index on `long_url_hash`,
/// which also makes [`LinkStore::insert`] a single conditional statement.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on database errors.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

fn is_code_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(CODE_CONSTRAINT)
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, StoreError> {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT short_url, long_url
            FROM links
            WHERE long_url_hash = $1 AND long_url = $2
            LIMIT 1
            "#,
        )
        .bind(long_url_hash(long_url))
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(code, long_url)| Link::new(code, long_url)))
    }

    async fn insert(&self, link: Link) -> Result<InsertOutcome, StoreError> {
        let inserted: Result<Option<(String, String)>, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO links (short_url, long_url, long_url_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (long_url_hash) DO NOTHING
            RETURNING short_url, long_url
            "#,
        )
        .bind(&link.code)
        .bind(&link.long_url)
        .bind(long_url_hash(&link.long_url))
        .fetch_optional(self.pool.as_ref())
        .await;

        match inserted {
            Ok(Some((code, long_url))) => Ok(InsertOutcome::Created(Link::new(code, long_url))),
            Ok(None) => self
                .find_by_long_url(&link.long_url)
                .await?
                .map(InsertOutcome::Existing)
                .ok_or_else(|| {
                    StoreError::Backend(
                        "insert conflicted but no link matches the long URL".to_string(),
                    )
                }),
            Err(e) if is_code_violation(&e) => Err(StoreError::CodeTaken(link.code)),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
