//! Cosmic Cache - An offline-first request router and cache gateway
//!
//! Classifies intercepted GET requests into static, dynamic, api and other
//! categories and applies a per-category cache-vs-network strategy over two
//! versioned, named cache stores.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod net;
pub mod routing;
pub mod tasks;
pub mod worker;

pub use api::AppState;
pub use config::WorkerConfig;
pub use worker::Worker;
