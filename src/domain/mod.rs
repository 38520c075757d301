//! Domain layer containing business entities and rules.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by the
//! infrastructure layer; orchestration lives in
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`policy`] - Self-reference exclusion rule

pub mod entities;
pub mod policy;
pub mod repositories;
