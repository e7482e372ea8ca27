//! External API integrations

pub mod cache;
pub mod open_meteo;
pub mod provider;

pub use open_meteo::OpenMeteoClient;
pub use provider::{WeatherProvider, WeatherRequest, WeatherResponse};
