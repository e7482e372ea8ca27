//! HTTP handlers

pub mod health;
pub mod weather;

pub use health::health_check;
pub use weather::{weather_forecast, weekly_weather_summary};
