//! Weather provider seam
//!
//! Handlers only see this trait, so the Open-Meteo client can be swapped for
//! a stub that returns canned blocks.

use async_trait::async_trait;
use shared::{DailyVariable, GpsCoordinates, HourlyVariable, TimeSeriesBlock};

use crate::error::AppResult;

/// Variables to request for one location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRequest {
    pub coordinates: GpsCoordinates,
    pub daily: Vec<DailyVariable>,
    pub hourly: Vec<HourlyVariable>,
}

impl WeatherRequest {
    /// Daily variables behind the 7-day forecast
    pub fn forecast(coordinates: GpsCoordinates) -> Self {
        Self {
            coordinates,
            daily: vec![
                DailyVariable::TemperatureMax,
                DailyVariable::TemperatureMin,
                DailyVariable::SunshineDuration,
                DailyVariable::PrecipitationSum,
                DailyVariable::WeatherCode,
            ],
            hourly: Vec::new(),
        }
    }

    /// Hourly pressure plus the daily variables behind the weekly summary
    pub fn weekly_summary(coordinates: GpsCoordinates) -> Self {
        Self {
            coordinates,
            daily: vec![
                DailyVariable::TemperatureMax,
                DailyVariable::TemperatureMin,
                DailyVariable::SunshineDuration,
                DailyVariable::PrecipitationSum,
            ],
            hourly: vec![HourlyVariable::SurfacePressure],
        }
    }
}

/// One provider answer; a group is `None` when it was not requested or came
/// back without samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherResponse {
    pub daily: Option<TimeSeriesBlock<DailyVariable>>,
    pub hourly: Option<TimeSeriesBlock<HourlyVariable>>,
}

/// Source of raw weather blocks
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch blocks for one location. An empty vector means the provider had
    /// nothing to return.
    async fn fetch(&self, request: &WeatherRequest) -> AppResult<Vec<WeatherResponse>>;
}
