//! Record building: zip aligned instants and value columns into records

use chrono::{DateTime, Utc};

use crate::error::{SeriesError, SeriesResult};
use crate::models::{DailyRecord, HourlyRecord};
use crate::types::SolarModel;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Daily value columns, each aligned with the block instants
#[derive(Debug, Clone, Copy)]
pub struct DailyColumns<'a> {
    pub max_temp: &'a [f64],
    pub min_temp: &'a [f64],
    /// Seconds of sunshine
    pub sunshine_duration: &'a [f64],
    pub precipitation_sum: &'a [f64],
    /// Not requested on the summary path
    pub weather_code: Option<&'a [f64]>,
}

impl DailyColumns<'_> {
    fn check_lengths(&self, expected: usize) -> SeriesResult<()> {
        check_length("temperature_2m_max", self.max_temp, expected)?;
        check_length("temperature_2m_min", self.min_temp, expected)?;
        check_length("sunshine_duration", self.sunshine_duration, expected)?;
        check_length("precipitation_sum", self.precipitation_sum, expected)?;
        if let Some(codes) = self.weather_code {
            check_length("weathercode", codes, expected)?;
        }
        Ok(())
    }
}

fn check_length(column: &str, values: &[f64], expected: usize) -> SeriesResult<()> {
    if values.len() != expected {
        return Err(SeriesError::LengthMismatch {
            column: column.to_string(),
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Estimated energy in kWh for a day with the given hours of sunshine
pub fn calculate_solar_energy(sunshine_hours: f64, model: &SolarModel) -> f64 {
    model.power_capacity_kw * model.efficiency * sunshine_hours
}

/// Build one record per instant; record `i` reads index `i` of every column
pub fn build_daily_records(
    instants: &[DateTime<Utc>],
    columns: &DailyColumns<'_>,
    model: &SolarModel,
) -> SeriesResult<Vec<DailyRecord>> {
    columns.check_lengths(instants.len())?;

    let records = instants
        .iter()
        .enumerate()
        .map(|(i, instant)| {
            let sunshine_duration = columns.sunshine_duration[i];
            let sunshine_hours = sunshine_duration / SECONDS_PER_HOUR;
            DailyRecord {
                date: instant.date_naive(),
                max_temp: columns.max_temp[i],
                min_temp: columns.min_temp[i],
                sunshine_hours,
                energy_generated_kwh: calculate_solar_energy(sunshine_hours, model),
                weather_icon: columns.weather_code.map(|codes| codes[i]),
                sunshine_duration,
                precipitation_sum: columns.precipitation_sum[i],
            }
        })
        .collect();

    Ok(records)
}

/// Pair every hourly instant with its surface pressure
pub fn build_hourly_records(
    instants: &[DateTime<Utc>],
    surface_pressure: &[f64],
) -> SeriesResult<Vec<HourlyRecord>> {
    check_length("surface_pressure", surface_pressure, instants.len())?;

    Ok(instants
        .iter()
        .zip(surface_pressure)
        .map(|(instant, pressure)| HourlyRecord {
            instant: *instant,
            surface_pressure: *pressure,
        })
        .collect())
}
