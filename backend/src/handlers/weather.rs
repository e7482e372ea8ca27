//! HTTP handlers for the forecast and weekly summary endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{parse_coordinate, validate_coordinates, DailyRecord, GpsCoordinates, WeeklySummary};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for both endpoints.
///
/// Kept as strings so a value that is not a number gets the same 400 as a
/// missing one instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CoordinatesQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl CoordinatesQuery {
    /// Parse and range-check the coordinates
    pub fn coordinates(&self) -> AppResult<GpsCoordinates> {
        let latitude = self.latitude.as_deref().and_then(parse_coordinate);
        let longitude = self.longitude.as_deref().and_then(parse_coordinate);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(AppError::MissingCoordinates);
        };

        let coordinates = GpsCoordinates::new(latitude, longitude);
        validate_coordinates(&coordinates).map_err(AppError::InvalidCoordinates)?;
        Ok(coordinates)
    }
}

/// Unpack the extractor result. A query string axum cannot decode (for
/// example a repeated key) is reported like a missing coordinate.
fn query_coordinates(
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> AppResult<GpsCoordinates> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Query string rejected: {}", rejection.body_text());
        AppError::MissingCoordinates
    })?;
    query.coordinates()
}

/// Get the 7-day forecast with solar yield
pub async fn weather_forecast(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<DailyRecord>>> {
    let coordinates = query_coordinates(query)?;
    let forecast = state.weather.forecast(coordinates).await?;
    Ok(Json(forecast))
}

/// Get the weekly weather summary
pub async fn weekly_weather_summary(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> AppResult<Json<WeeklySummary>> {
    let coordinates = query_coordinates(query)?;
    let summary = state.weather.weekly_summary(coordinates).await?;
    Ok(Json(summary))
}
