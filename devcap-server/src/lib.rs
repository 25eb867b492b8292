//! devcap-server: device capability catalogue over HTTP
//!
//! Records which bands, band combinations and features each device
//! supports, optionally per carrier, and serves them as a JSON API
//! backed by Postgres.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{Config, ConfigError, Environment};
pub use db::{create_pool, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
