//! Software version endpoints
//!
//! Creation lives under `/devices/{id}/software`; a version is addressed by
//! its own id afterwards.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{Software, SoftwareRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{Id, JsonBody};
use crate::http::server::AppState;
use crate::models::{NewSoftware, SoftwareInput};

/// GET /software/{id}
async fn get_software(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Software>, ApiError> {
    let software = SoftwareRepo::new(&state.pool).get(id).await?;
    Ok(Json(software))
}

/// PUT /software/{id}
async fn update_software(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<SoftwareInput>,
) -> Result<Json<Software>, ApiError> {
    let software = NewSoftware::try_from(input)?;
    let software = SoftwareRepo::new(&state.pool).update(id, software).await?;
    Ok(Json(software))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/software/{id}", get(get_software).put(update_software))
}
