//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    /// Upstream forecast endpoint in use
    pub provider: String,
}

/// Health check endpoint handler.
///
/// Does not call the provider, so it stays up while Open-Meteo is down.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        provider: state.config.open_meteo.base_url.clone(),
    })
}
