//! Handler for user actions (book/heart/mail/text) against a listing.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{table_for_collection, ListingStore};
use crate::validate;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

/// POST `/action` — persist the action record, then dispatch notifications
/// when enabled.
pub async fn action(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let rec = validate::action_request(&body)?;
    let table = table_for_collection(rec.action.as_str())
        .ok_or_else(|| AppError::BadRequest(format!("unknown action: {}", rec.action.as_str())))?;
    ListingStore::add_action(&state.pool, table, &rec).await?;
    if state.config.notify.enabled {
        state.notifier.dispatch(&rec).await?;
    }
    Ok(StatusCode::OK)
}
