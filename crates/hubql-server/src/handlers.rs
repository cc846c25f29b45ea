use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use hubql_graphql::SchemaState;
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "hubql",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            error: None,
        }),
    )
}

/// Ready once the GraphQL schema is built; always ready when GraphQL is disabled.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let Some(lazy_schema) = state.lazy_schema else {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready",
                error: None,
            }),
        );
    };

    match lazy_schema.state().await {
        SchemaState::Ready => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready",
                error: None,
            }),
        ),
        SchemaState::Failed => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "failed",
                error: lazy_schema.last_error().await,
            }),
        ),
        SchemaState::Uninitialized | SchemaState::Building => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "initializing",
                error: None,
            }),
        ),
    }
}
