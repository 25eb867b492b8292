//! Feature endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{Device, Feature, FeatureRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{Id, JsonBody};
use crate::http::server::AppState;
use crate::models::{FeatureInput, NewFeature};

/// GET /features - every feature, by name
async fn list_features(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Feature>>, ApiError> {
    let features = FeatureRepo::new(&state.pool).find_all().await?;
    Ok(Json(features))
}

/// POST /features
async fn create_feature(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<FeatureInput>,
) -> Result<(StatusCode, Json<Feature>), ApiError> {
    let feature = NewFeature::try_from(input)?;
    let feature = FeatureRepo::new(&state.pool).create(feature).await?;
    Ok((StatusCode::CREATED, Json(feature)))
}

/// GET /features/{id}
async fn get_feature(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Feature>, ApiError> {
    let feature = FeatureRepo::new(&state.pool).get(id).await?;
    Ok(Json(feature))
}

/// PUT /features/{id}
async fn update_feature(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<FeatureInput>,
) -> Result<Json<Feature>, ApiError> {
    let feature = NewFeature::try_from(input)?;
    let feature = FeatureRepo::new(&state.pool).update(id, feature).await?;
    Ok(Json(feature))
}

/// GET /features/{id}/devices
async fn supporting_devices(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = FeatureRepo::new(&state.pool)
        .find_devices_supporting_feature(id)
        .await?;
    Ok(Json(devices))
}

/// Feature routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/features", get(list_features).post(create_feature))
        .route("/features/{id}", get(get_feature).put(update_feature))
        .route("/features/{id}/devices", get(supporting_devices))
}
