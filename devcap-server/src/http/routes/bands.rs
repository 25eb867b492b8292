//! Band endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{Band, BandRepo, SupportingDevice};
use crate::http::error::ApiError;
use crate::http::extractors::{Id, JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{BandInput, BandSearch, BandSupportQuery, NewBand, ProviderScope};

/// GET /bands - filter by technology and band number
async fn search_bands(
    State(state): State<Arc<AppState>>,
    QueryParams(criteria): QueryParams<BandSearch>,
) -> Result<Json<Vec<Band>>, ApiError> {
    let bands = BandRepo::new(&state.pool).search(&criteria).await?;
    Ok(Json(bands))
}

/// POST /bands
async fn create_band(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<BandInput>,
) -> Result<(StatusCode, Json<Band>), ApiError> {
    let band = NewBand::try_from(input)?;
    let band = BandRepo::new(&state.pool).create(band).await?;
    Ok((StatusCode::CREATED, Json(band)))
}

/// GET /bands/{id}
async fn get_band(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Band>, ApiError> {
    let band = BandRepo::new(&state.pool).get(id).await?;
    Ok(Json(band))
}

/// PUT /bands/{id}
async fn update_band(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<BandInput>,
) -> Result<Json<Band>, ApiError> {
    let band = NewBand::try_from(input)?;
    let band = BandRepo::new(&state.pool).update(id, band).await?;
    Ok(Json(band))
}

/// GET /bands/{id}/devices?providerId= - devices supporting the band
///
/// With `providerId` each device carries the provider-specific
/// `supportStatus`; without it the key is omitted.
async fn supporting_devices(
    State(state): State<Arc<AppState>>,
    Id(band_id): Id,
    QueryParams(scope): QueryParams<ProviderScope>,
) -> Result<Json<Vec<SupportingDevice>>, ApiError> {
    let query = BandSupportQuery {
        band_id,
        provider_id: scope.provider_id,
    };
    let devices = BandRepo::new(&state.pool)
        .find_devices_supporting_band(query)
        .await?;
    Ok(Json(devices))
}

/// Band routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bands", get(search_bands).post(create_band))
        .route("/bands/{id}", get(get_band).put(update_band))
        .route("/bands/{id}/devices", get(supporting_devices))
}
