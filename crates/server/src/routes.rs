use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::registry::{BackendRegistry, Scope};

use crate::dispatch;
use crate::errors::WireError;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BackendRegistry>,
    pub default_account_id: String,
    pub default_region: String,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Scope the call by `x-account-id` / `x-region` headers, falling back to
/// the configured defaults. Caller resolution proper lives behind the
/// identity seam; the headers only pick the store.
fn scope_from_headers(state: &AppState, headers: &HeaderMap) -> Scope {
    let account_id = headers
        .get("x-account-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.default_account_id);
    let region = headers
        .get("x-region")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.default_region);
    Scope::new(account_id, region)
}

async fn handle_operation(
    State(state): State<AppState>,
    Path((service, operation)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, WireError> {
    let scope = scope_from_headers(&state, &headers);
    let body: Value = if body.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str(&body)
            .map_err(|e| WireError::validation(format!("request body is not valid JSON: {e}")))?
    };

    let result = match service.as_str() {
        "mesh" => {
            let backend = state.registry.mesh(&scope);
            dispatch::mesh::dispatch(&backend, &operation, body).await?
        }
        "transfer" => {
            let backend = state.registry.transfer(&scope);
            dispatch::transfer::dispatch(&backend, &operation, body).await?
        }
        _ => return Err(WireError::unknown_service(&service)),
    };
    Ok(Json(result))
}

/// Build the full application router: health probe plus the operation
/// endpoint both emulated services hang off.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/:service/:operation", post(handle_operation))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
