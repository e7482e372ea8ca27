//! Solar Forecast Server
//!
//! Serves a 7-day forecast with an estimated solar yield and a weekly
//! weather summary for any point on the globe, on top of the Open-Meteo API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::WeatherProvider;
use services::WeatherService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: WeatherService,
}

impl AppState {
    /// Wire the state around an already constructed weather provider
    pub fn new(config: Config, provider: Arc<dyn WeatherProvider>) -> Self {
        let weather = WeatherService::new(provider, config.solar.model());
        Self {
            config: Arc::new(config),
            weather,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Solar Forecast API v1.0"
}
