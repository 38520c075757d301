//! HTTP request handlers.

pub mod health;
pub mod shorten;

pub use health::health_handler;
pub use shorten::shorten_handler;
