//! Business logic services for the application layer.

pub mod shortener;

pub use shortener::Shortener;
