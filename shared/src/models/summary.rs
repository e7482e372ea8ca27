//! Weekly summary models

use serde::{Deserialize, Serialize};

/// Weekly weather summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    /// Mean surface pressure over every hourly sample returned
    pub avg_pressure: f64,
    /// Mean sunshine duration in seconds per day
    pub avg_sunshine: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub weather_summary: WeekClassification,
}

/// Rain classification of a week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WeekClassification {
    RainyWeek,
    DryWeek,
}

impl std::fmt::Display for WeekClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekClassification::RainyWeek => write!(f, "rainy-week"),
            WeekClassification::DryWeek => write!(f, "dry-week"),
        }
    }
}

/// Classify a week from its number of rainy days
pub fn classify_week(rainy_days: usize, threshold: usize) -> WeekClassification {
    if rainy_days >= threshold {
        WeekClassification::RainyWeek
    } else {
        WeekClassification::DryWeek
    }
}
