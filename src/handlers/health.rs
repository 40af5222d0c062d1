use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    environment: String,
    version: String,
    loans_v1: usize,
    loans_v2: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: state.environment.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        loans_v1: state.loan_service.count().await,
        loans_v2: state.loan_service_v2.count().await,
    })
}
