//! Link store implementations.
//!
//! # Stores
//!
//! - [`PgLinkStore`] - PostgreSQL via SQLx, unique index on the long URL hash
//! - [`MemoryLinkStore`] - in-process maps for development and tests
//! - [`CachedLinkStore`] - cache decorator over either of the above

pub mod cached_link_store;
pub mod memory_link_store;
pub mod pg_link_store;

pub use cached_link_store::CachedLinkStore;
pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
