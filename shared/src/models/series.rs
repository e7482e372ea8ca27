//! Columnar time-series blocks as returned by the weather provider

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SeriesError, SeriesResult};

/// A variable that can be requested from the provider.
///
/// Value columns are bound to these keys, never to their position in the
/// request list.
pub trait SeriesVariable: Copy + Eq + std::fmt::Debug {
    /// Name used in the provider API
    fn api_name(&self) -> &'static str;

    /// Sampling interval of the group this variable belongs to
    fn nominal_interval() -> Duration;
}

/// Daily aggregates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DailyVariable {
    #[serde(rename = "temperature_2m_max")]
    TemperatureMax,
    #[serde(rename = "temperature_2m_min")]
    TemperatureMin,
    /// Seconds of sunshine in the day
    #[serde(rename = "sunshine_duration")]
    SunshineDuration,
    #[serde(rename = "precipitation_sum")]
    PrecipitationSum,
    /// WMO weather code
    #[serde(rename = "weathercode")]
    WeatherCode,
}

impl SeriesVariable for DailyVariable {
    fn api_name(&self) -> &'static str {
        match self {
            DailyVariable::TemperatureMax => "temperature_2m_max",
            DailyVariable::TemperatureMin => "temperature_2m_min",
            DailyVariable::SunshineDuration => "sunshine_duration",
            DailyVariable::PrecipitationSum => "precipitation_sum",
            DailyVariable::WeatherCode => "weathercode",
        }
    }

    fn nominal_interval() -> Duration {
        Duration::days(1)
    }
}

/// Hourly samples
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HourlyVariable {
    /// Surface pressure in hPa
    #[serde(rename = "surface_pressure")]
    SurfacePressure,
}

impl SeriesVariable for HourlyVariable {
    fn api_name(&self) -> &'static str {
        match self {
            HourlyVariable::SurfacePressure => "surface_pressure",
        }
    }

    fn nominal_interval() -> Duration {
        Duration::hours(1)
    }
}

/// A uniformly sampled series over the half-open interval `[start, end)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesBlock<V> {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(with = "interval_seconds")]
    pub interval: Duration,
    pub variables: Vec<(V, Vec<f64>)>,
}

impl<V: SeriesVariable> TimeSeriesBlock<V> {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, interval: Duration) -> Self {
        Self {
            start,
            end,
            interval,
            variables: Vec::new(),
        }
    }

    /// Attach a value column
    pub fn with_variable(mut self, variable: V, values: Vec<f64>) -> Self {
        self.variables.push((variable, values));
        self
    }

    /// Values recorded for `variable`
    pub fn values(&self, variable: V) -> SeriesResult<&[f64]> {
        self.variables
            .iter()
            .find(|(key, _)| *key == variable)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| SeriesError::MissingVariable(variable.api_name().to_string()))
    }

    /// Check that every column has one value per sample instant
    pub fn validate(&self) -> SeriesResult<()> {
        let expected = crate::series::sample_count(self.start, self.end, self.interval)?;
        for (variable, values) in &self.variables {
            if values.len() != expected {
                return Err(SeriesError::LengthMismatch {
                    column: variable.api_name().to_string(),
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

mod interval_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(interval.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Ok(Duration::seconds(seconds))
    }
}
