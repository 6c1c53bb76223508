//! Application configuration management.
//!
//! A single typed `AppConfig` behind a `parking_lot::RwLock`, read by the
//! poller and window handlers and updated atomically from the frontend.

pub mod app;

pub use app::{AppConfig, APP_CONFIG};
