//! HTTP server layer
//!
//! Axum server with:
//! - CORS from configuration
//! - Request tracing and timeout
//! - Graceful shutdown
//! - JSON error envelope

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
