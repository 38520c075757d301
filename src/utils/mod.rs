//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and the reserved word
//! - [`url_hash`] - Fixed-size deduplication key for long URLs

pub mod code_generator;
pub mod url_hash;
