//! Forecast record models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub sunshine_hours: f64,
    #[serde(rename = "energy_generated_kWh")]
    pub energy_generated_kwh: f64,
    /// Provider weather code, passed through as an opaque id
    pub weather_icon: Option<f64>,
    /// Raw sunshine duration in seconds
    #[serde(skip)]
    pub sunshine_duration: f64,
    #[serde(skip)]
    pub precipitation_sum: f64,
}

/// One hourly sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyRecord {
    pub instant: DateTime<Utc>,
    pub surface_pressure: f64,
}
