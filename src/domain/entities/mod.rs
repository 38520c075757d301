//! Core domain entities.
//!
//! The service persists exactly one kind of record, the [`Link`].

pub mod link;

pub use link::Link;
