//! Router assembly: the four POST endpoints plus health/version, with
//! permissive CORS and request tracing on everything.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, routing::post, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/find", post(handlers::find))
        .route("/search", post(handlers::search))
        .route("/update", post(handlers::update))
        .route("/action", post(handlers::action))
        .route("/health", get(health))
        .route("/version", get(version))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
