//! Business logic services for the solar forecast server

pub mod weather;

pub use weather::WeatherService;
