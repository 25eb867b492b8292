//! Device endpoints, including the per-device capability lists

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{
    BandRepo, Combo, ComboRepo, Device, DeviceBand, DeviceRepo, Feature, FeatureRepo, Software,
    SoftwareRepo,
};
use crate::http::error::ApiError;
use crate::http::extractors::{Id, JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{
    DeviceBandInput, DeviceComboInput, DeviceFeatureInput, DeviceInput, DeviceSearch, NewDevice,
    NewSoftware, SoftwareInput,
};

/// GET /devices - search by vendor, model number and market name
async fn search_devices(
    State(state): State<Arc<AppState>>,
    QueryParams(criteria): QueryParams<DeviceSearch>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = DeviceRepo::new(&state.pool).search(&criteria).await?;
    Ok(Json(devices))
}

/// POST /devices
async fn create_device(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<DeviceInput>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    let device = NewDevice::try_from(input)?;
    let device = DeviceRepo::new(&state.pool).create(device).await?;

    tracing::info!(device_id = %device.id, vendor = %device.vendor, "device created");
    Ok((StatusCode::CREATED, Json(device)))
}

/// GET /devices/{id}
async fn get_device(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Device>, ApiError> {
    let device = DeviceRepo::new(&state.pool).get(id).await?;
    Ok(Json(device))
}

/// PUT /devices/{id}
async fn update_device(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<DeviceInput>,
) -> Result<Json<Device>, ApiError> {
    let device = NewDevice::try_from(input)?;
    let device = DeviceRepo::new(&state.pool).update(id, device).await?;
    Ok(Json(device))
}

/// DELETE /devices/{id} - removes its software and capability rows too
async fn delete_device(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<StatusCode, ApiError> {
    DeviceRepo::new(&state.pool).delete(id).await?;

    tracing::info!(device_id = %id, "device deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /devices/{id}/software
async fn list_software(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Vec<Software>>, ApiError> {
    let software = SoftwareRepo::new(&state.pool).find_by_device(id).await?;
    Ok(Json(software))
}

/// POST /devices/{id}/software
async fn create_software(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<SoftwareInput>,
) -> Result<(StatusCode, Json<Software>), ApiError> {
    let software = NewSoftware::try_from(input)?;
    let software = SoftwareRepo::new(&state.pool).create(id, software).await?;
    Ok((StatusCode::CREATED, Json(software)))
}

/// GET /devices/{id}/bands
async fn list_bands(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Vec<DeviceBand>>, ApiError> {
    let bands = BandRepo::new(&state.pool).find_by_device(id).await?;
    Ok(Json(bands))
}

/// POST /devices/{id}/bands - record support, returning the device's band list
async fn add_band(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<DeviceBandInput>,
) -> Result<(StatusCode, Json<Vec<DeviceBand>>), ApiError> {
    let status = input.status()?;
    DeviceRepo::new(&state.pool)
        .add_band(id, input.band_id, input.provider_id, status)
        .await?;

    let bands = BandRepo::new(&state.pool).find_by_device(id).await?;
    Ok((StatusCode::CREATED, Json(bands)))
}

/// GET /devices/{id}/combos
async fn list_combos(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Vec<Combo>>, ApiError> {
    let combos = ComboRepo::new(&state.pool).find_by_device(id).await?;
    Ok(Json(combos))
}

/// POST /devices/{id}/combos
async fn add_combo(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<DeviceComboInput>,
) -> Result<(StatusCode, Json<Vec<Combo>>), ApiError> {
    DeviceRepo::new(&state.pool).add_combo(id, input.combo_id).await?;

    let combos = ComboRepo::new(&state.pool).find_by_device(id).await?;
    Ok((StatusCode::CREATED, Json(combos)))
}

/// GET /devices/{id}/features
async fn list_features(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Vec<Feature>>, ApiError> {
    let features = FeatureRepo::new(&state.pool).find_by_device(id).await?;
    Ok(Json(features))
}

/// POST /devices/{id}/features
async fn add_feature(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<DeviceFeatureInput>,
) -> Result<(StatusCode, Json<Vec<Feature>>), ApiError> {
    DeviceRepo::new(&state.pool).add_feature(id, input.feature_id).await?;

    let features = FeatureRepo::new(&state.pool).find_by_device(id).await?;
    Ok((StatusCode::CREATED, Json(features)))
}

/// Device routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/devices", get(search_devices).post(create_device))
        .route(
            "/devices/{id}",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/devices/{id}/software", get(list_software).post(create_software))
        .route("/devices/{id}/bands", get(list_bands).post(add_band))
        .route("/devices/{id}/combos", get(list_combos).post(add_combo))
        .route("/devices/{id}/features", get(list_features).post(add_feature))
}
