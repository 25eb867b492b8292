//! Route handlers organized by resource

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

pub mod bands;
pub mod combos;
pub mod devices;
pub mod features;
pub mod providers;
pub mod root;
pub mod software;

/// Every resource router, mounted under `/api/v1`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(devices::router())
        .merge(software::router())
        .merge(bands::router())
        .merge(combos::router())
        .merge(features::router())
        .merge(providers::router())
}
