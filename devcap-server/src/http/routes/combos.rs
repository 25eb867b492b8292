//! Band combination endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{Combo, ComboRepo, Device};
use crate::http::error::ApiError;
use crate::http::extractors::{Id, JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{ComboInput, ComboSearch, NewCombo};

async fn search_combos(
    State(state): State<Arc<AppState>>,
    QueryParams(criteria): QueryParams<ComboSearch>,
) -> Result<Json<Vec<Combo>>, ApiError> {
    let combos = ComboRepo::new(&state.pool).search(&criteria).await?;
    Ok(Json(combos))
}

async fn create_combo(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ComboInput>,
) -> Result<(StatusCode, Json<Combo>), ApiError> {
    let combo = NewCombo::try_from(input)?;
    let combo = ComboRepo::new(&state.pool).create(combo).await?;
    Ok((StatusCode::CREATED, Json(combo)))
}

async fn get_combo(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Combo>, ApiError> {
    let combo = ComboRepo::new(&state.pool).get(id).await?;
    Ok(Json(combo))
}

async fn update_combo(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<ComboInput>,
) -> Result<Json<Combo>, ApiError> {
    let combo = NewCombo::try_from(input)?;
    let combo = ComboRepo::new(&state.pool).update(id, combo).await?;
    Ok(Json(combo))
}

async fn supporting_devices(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = ComboRepo::new(&state.pool)
        .find_devices_supporting_combo(id)
        .await?;
    Ok(Json(devices))
}

/// Combo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/combos", get(search_combos).post(create_combo))
        .route("/combos/{id}", get(get_combo).put(update_combo))
        .route("/combos/{id}/devices", get(supporting_devices))
}
