//! Route definitions for the solar forecast server

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather
        .route("/weather_forecast", get(handlers::weather_forecast))
        .route(
            "/weekly_weather_summary",
            get(handlers::weekly_weather_summary),
        )
}
