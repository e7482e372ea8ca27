//! WebAssembly module for the Solar Forecast service
//!
//! Lets a browser run the same pipeline as the server on blocks it already
//! holds:
//! - Solar yield for a number of sunshine hours
//! - Daily forecast records from a serialized daily block
//! - Weekly summary from serialized daily and hourly blocks
//! - Coordinate validation

use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{
    build_daily_records, build_hourly_records, reconstruct, summarize, DailyColumns,
    SeriesResult,
};

/// Estimated kWh for a day with the given hours of sunshine
#[wasm_bindgen]
pub fn calculate_solar_energy(sunshine_hours: f64) -> f64 {
    shared::calculate_solar_energy(sunshine_hours, &SolarModel::default())
}

/// Check a coordinate pair, returning the problems found (empty when valid)
#[wasm_bindgen]
pub fn check_coordinates(latitude: f64, longitude: f64) -> String {
    match validate_coordinates(&GpsCoordinates::new(latitude, longitude)) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

/// Daily records as JSON, from a JSON `TimeSeriesBlock` of daily variables
#[wasm_bindgen]
pub fn forecast_from_block(daily_json: &str) -> Result<String, JsValue> {
    forecast_json(daily_json).map_err(report)
}

/// Weekly summary as JSON, relative to the browser clock
#[wasm_bindgen]
pub fn summarize_blocks(daily_json: &str, hourly_json: &str) -> Result<String, JsValue> {
    let now = DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64)
        .ok_or_else(|| report("browser clock out of range".to_string()))?;
    summary_json(daily_json, hourly_json, now).map_err(report)
}

fn report(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_block<V>(json: &str) -> Result<TimeSeriesBlock<V>, String>
where
    V: SeriesVariable + serde::de::DeserializeOwned,
{
    let block: TimeSeriesBlock<V> =
        serde_json::from_str(json).map_err(|e| format!("Invalid block JSON: {}", e))?;
    block.validate().map_err(|e| e.to_string())?;
    Ok(block)
}

fn daily_records(
    block: &TimeSeriesBlock<DailyVariable>,
    model: &SolarModel,
) -> SeriesResult<Vec<DailyRecord>> {
    let instants = reconstruct(block)?;
    let columns = DailyColumns {
        max_temp: block.values(DailyVariable::TemperatureMax)?,
        min_temp: block.values(DailyVariable::TemperatureMin)?,
        sunshine_duration: block.values(DailyVariable::SunshineDuration)?,
        precipitation_sum: block.values(DailyVariable::PrecipitationSum)?,
        // The weather code is optional for callers that only want yields
        weather_code: block.values(DailyVariable::WeatherCode).ok(),
    };
    build_daily_records(&instants, &columns, model)
}

fn forecast_json(daily_json: &str) -> Result<String, String> {
    let block = parse_block::<DailyVariable>(daily_json)?;
    let records = daily_records(&block, &SolarModel::default()).map_err(|e| e.to_string())?;
    serde_json::to_string(&records).map_err(|e| e.to_string())
}

fn summary_json(daily_json: &str, hourly_json: &str, now: DateTime<Utc>) -> Result<String, String> {
    let model = SolarModel::default();
    let daily = parse_block::<DailyVariable>(daily_json)?;
    let hourly = parse_block::<HourlyVariable>(hourly_json)?;

    let summary = daily_records(&daily, &model)
        .and_then(|records| {
            let instants = reconstruct(&hourly)?;
            let pressure =
                build_hourly_records(&instants, hourly.values(HourlyVariable::SurfacePressure)?)?;
            summarize(&records, &pressure, now, &model)
        })
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&summary).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::Value;

    fn daily_block() -> TimeSeriesBlock<DailyVariable> {
        let start = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
        TimeSeriesBlock::new(start, start + Duration::days(3), Duration::days(1))
            .with_variable(DailyVariable::TemperatureMax, vec![24.0, 26.0, 22.0])
            .with_variable(DailyVariable::TemperatureMin, vec![14.0, 15.0, 12.0])
            .with_variable(DailyVariable::SunshineDuration, vec![36000.0, 18000.0, 0.0])
            .with_variable(DailyVariable::PrecipitationSum, vec![0.0, 1.5, 4.0])
    }

    #[test]
    fn test_solar_energy() {
        assert_eq!(calculate_solar_energy(10.0), 5.0);
        assert_eq!(calculate_solar_energy(0.0), 0.0);
    }

    #[test]
    fn test_check_coordinates() {
        assert_eq!(check_coordinates(50.06, 19.94), "");
        assert!(check_coordinates(50.06, 200.0).contains("longitude"));
    }

    #[test]
    fn test_forecast_json() {
        let json = serde_json::to_string(&daily_block()).unwrap();
        let records: Value = serde_json::from_str(&forecast_json(&json).unwrap()).unwrap();

        let days = records.as_array().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0]["date"], "2024-07-15");
        assert_eq!(days[0]["energy_generated_kWh"], 5.0);
        assert_eq!(days[1]["sunshine_hours"], 5.0);
        assert!(days[0]["weather_icon"].is_null());
    }

    #[test]
    fn test_forecast_json_rejects_short_column() {
        let mut block = daily_block();
        block.variables[0].1.pop();
        let json = serde_json::to_string(&block).unwrap();

        assert!(forecast_json(&json).is_err());
    }

    #[test]
    fn test_summary_json() {
        let start = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
        let hourly = TimeSeriesBlock::new(start, start + Duration::hours(4), Duration::hours(1))
            .with_variable(HourlyVariable::SurfacePressure, vec![1010.0, 1012.0, 1014.0, 1016.0]);
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

        let summary = summary_json(
            &serde_json::to_string(&daily_block()).unwrap(),
            &serde_json::to_string(&hourly).unwrap(),
            now,
        )
        .unwrap();
        let summary: Value = serde_json::from_str(&summary).unwrap();

        assert_eq!(summary["avg_pressure"], 1013.0);
        assert_eq!(summary["max_temp"], 26.0);
        assert_eq!(summary["min_temp"], 12.0);
        assert_eq!(summary["avg_sunshine"], 18000.0);
        assert_eq!(summary["weather_summary"], "dry-week");
    }

    #[test]
    fn test_invalid_json() {
        assert!(forecast_json("not json").unwrap_err().starts_with("Invalid block JSON"));
    }
}
