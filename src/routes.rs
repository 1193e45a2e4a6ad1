//! Routers. Resource routes use a parameterized path segment; handlers
//! resolve the variant, so adding one is a catalog change only.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::handlers;
use crate::state::AppState;

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(handlers::list).post(handlers::create))
        .route(
            "/:path_segment/:id",
            get(handlers::get).delete(handlers::delete),
        )
        .with_state(state)
}

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

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
