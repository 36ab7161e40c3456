//! Handlers for listing find, search, and update.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{table_for_collection, ListingStore};
use crate::validate;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

fn city_table(city_id: &str) -> Result<&'static str, AppError> {
    table_for_collection(city_id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown city: {city_id}")))
}

/// POST `/find` — one listing by `{id, cityId}`, or 404.
pub async fn find(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let (id, city_id) = validate::find_request(&body)?;
    let table = city_table(&city_id)?;
    let listing = ListingStore::find(&state.pool, table, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.clone()))?;
    tracing::info!(listing_id = %id, city = %city_id, "find ok");
    Ok(Json(listing))
}

/// POST `/search` — one page of listings matching the filter.
pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let filter = validate::search_request(&body)?;
    let table = city_table(&filter.city_id)?;
    let listings = ListingStore::search(&state.pool, table, &filter).await?;
    tracing::info!(city = %filter.city_id, count = listings.len(), "search ok");
    Ok(Json(listings))
}

/// POST `/update` — append a video to the agent's listing, 404 when the
/// listing/agent pair does not match.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let update = validate::update_request(&body)?;
    let table = city_table(&update.city_id)?;
    ListingStore::add_video(&state.pool, table, &update).await?;
    if state.config.notify.enabled {
        state.notifier.video_approval(&update.listing_id).await?;
    }
    tracing::info!(listing_id = %update.listing_id, "update ok");
    Ok(StatusCode::OK)
}
