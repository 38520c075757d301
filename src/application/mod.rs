//! Application layer services implementing business logic.
//!
//! Services consume repository traits and capabilities injected at startup
//! and expose a small API to the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener::Shortener`] - Shorten-or-lookup for long URLs

pub mod services;
