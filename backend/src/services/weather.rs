//! Weather service: fetch blocks, rebuild records, reduce to a summary

use chrono::Utc;
use shared::{
    build_daily_records, build_hourly_records, reconstruct, summarize, DailyColumns, DailyRecord,
    DailyVariable, GpsCoordinates, HourlyVariable, SolarModel, TimeSeriesBlock, WeeklySummary,
};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::{WeatherProvider, WeatherRequest, WeatherResponse};

/// Weather service for forecasts and weekly summaries
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    model: SolarModel,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(provider: Arc<dyn WeatherProvider>, model: SolarModel) -> Self {
        Self { provider, model }
    }

    /// 7-day forecast with estimated solar yield per day
    pub async fn forecast(&self, coordinates: GpsCoordinates) -> AppResult<Vec<DailyRecord>> {
        let request = WeatherRequest::forecast(coordinates);
        let response = self.fetch_first(&request).await?;
        let daily = response.daily.ok_or_else(|| {
            tracing::warn!("Provider reply has no daily block");
            AppError::UpstreamUnavailable
        })?;

        let records = self.daily_records(&daily, true)?;
        tracing::debug!("Built {} forecast days", records.len());
        Ok(records)
    }

    /// Weekly summary relative to the time of this call
    pub async fn weekly_summary(&self, coordinates: GpsCoordinates) -> AppResult<WeeklySummary> {
        let now = Utc::now();

        let request = WeatherRequest::weekly_summary(coordinates);
        let response = self.fetch_first(&request).await?;
        let (Some(daily), Some(hourly)) = (response.daily, response.hourly) else {
            tracing::warn!("Provider reply is missing the daily or hourly block");
            return Err(AppError::UpstreamUnavailable);
        };

        let daily_records = self.daily_records(&daily, false)?;
        let hourly_records = build_hourly_records(
            &reconstruct(&hourly)?,
            hourly.values(HourlyVariable::SurfacePressure)?,
        )?;

        Ok(summarize(&daily_records, &hourly_records, now, &self.model)?)
    }

    /// First reply of the provider; none at all is a terminal failure
    async fn fetch_first(&self, request: &WeatherRequest) -> AppResult<WeatherResponse> {
        let responses = self.provider.fetch(request).await?;
        responses.into_iter().next().ok_or_else(|| {
            tracing::warn!(
                "Provider returned no responses for {:?}",
                request.coordinates
            );
            AppError::UpstreamUnavailable
        })
    }

    fn daily_records(
        &self,
        daily: &TimeSeriesBlock<DailyVariable>,
        with_weather_code: bool,
    ) -> AppResult<Vec<DailyRecord>> {
        let instants = reconstruct(daily)?;
        let weather_code = if with_weather_code {
            Some(daily.values(DailyVariable::WeatherCode)?)
        } else {
            None
        };
        let columns = DailyColumns {
            max_temp: daily.values(DailyVariable::TemperatureMax)?,
            min_temp: daily.values(DailyVariable::TemperatureMin)?,
            sunshine_duration: daily.values(DailyVariable::SunshineDuration)?,
            precipitation_sum: daily.values(DailyVariable::PrecipitationSum)?,
            weather_code,
        };

        Ok(build_daily_records(&instants, &columns, &self.model)?)
    }
}
