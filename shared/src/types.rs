//! Common types used across the platform

use serde::{Deserialize, Serialize};
use validator::Validate;

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct GpsCoordinates {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Parameters of the solar yield estimate and the weekly classification.
///
/// The energy figure is a linear proxy (`capacity * efficiency * hours of
/// sunshine`), not a photovoltaic simulation. Treat it as an approximation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolarModel {
    /// Installed panel capacity in kW
    pub power_capacity_kw: f64,
    /// Fraction of the capacity delivered per sunshine hour
    pub efficiency: f64,
    /// Rainy days needed before a week counts as rainy
    pub rainy_day_threshold: usize,
    /// Length of the summary window, counted from request time
    pub window_days: i64,
}

impl SolarModel {
    pub const DEFAULT_POWER_CAPACITY_KW: f64 = 2.5;
    pub const DEFAULT_EFFICIENCY: f64 = 0.2;
    pub const DEFAULT_RAINY_DAY_THRESHOLD: usize = 4;
    pub const DEFAULT_WINDOW_DAYS: i64 = 7;
}

impl Default for SolarModel {
    fn default() -> Self {
        Self {
            power_capacity_kw: Self::DEFAULT_POWER_CAPACITY_KW,
            efficiency: Self::DEFAULT_EFFICIENCY,
            rainy_day_threshold: Self::DEFAULT_RAINY_DAY_THRESHOLD,
            window_days: Self::DEFAULT_WINDOW_DAYS,
        }
    }
}
