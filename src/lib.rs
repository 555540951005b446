//! Minimal in-memory item/user store exposed over HTTP.
//!
//! The service keeps one process-local mapping of items (and one of users),
//! exposes CRUD over it via an axum router, and runs a small fire-and-forget
//! background processor that marks an item processed after a fixed delay.
//! Nothing survives a restart.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: In-memory item and user stores
//! - [`processor`]: Delayed background processing tasks
//! - [`api`]: HTTP API surface
//! - [`metrics`]: Prometheus counters
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod processor;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
