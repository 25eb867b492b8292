//! Provider (carrier) endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{Provider, ProviderRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{Id, JsonBody};
use crate::http::server::AppState;
use crate::models::{NewProvider, ProviderInput};

async fn list_providers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Provider>>, ApiError> {
    let providers = ProviderRepo::new(&state.pool).find_all().await?;
    Ok(Json(providers))
}

async fn create_provider(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ProviderInput>,
) -> Result<(StatusCode, Json<Provider>), ApiError> {
    let provider = NewProvider::try_from(input)?;
    let provider = ProviderRepo::new(&state.pool).create(provider).await?;

    tracing::info!(provider_id = %provider.id, name = %provider.name, "provider created");
    Ok((StatusCode::CREATED, Json(provider)))
}

async fn get_provider(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> Result<Json<Provider>, ApiError> {
    let provider = ProviderRepo::new(&state.pool).get(id).await?;
    Ok(Json(provider))
}

async fn update_provider(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    JsonBody(input): JsonBody<ProviderInput>,
) -> Result<Json<Provider>, ApiError> {
    let provider = NewProvider::try_from(input)?;
    let provider = ProviderRepo::new(&state.pool).update(id, provider).await?;
    Ok(Json(provider))
}

/// Provider routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/providers", get(list_providers).post(create_provider))
        .route("/providers/{id}", get(get_provider).put(update_provider))
}
