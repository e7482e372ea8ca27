//! Weekly summary aggregation
//!
//! The daily records are cut to the window `[.., now + window_days)` once and
//! every daily reduction reads that same slice. The hourly pressure series is
//! averaged in full, without windowing.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::error::{SeriesError, SeriesResult};
use crate::models::{classify_week, DailyRecord, HourlyRecord, WeeklySummary};
use crate::types::SolarModel;

/// Reduce daily and hourly records into a weekly summary.
///
/// `now` is the request time, read once by the caller.
pub fn summarize(
    daily: &[DailyRecord],
    hourly: &[HourlyRecord],
    now: DateTime<Utc>,
    model: &SolarModel,
) -> SeriesResult<WeeklySummary> {
    let avg_pressure = average_pressure(hourly)?;

    let window = window(daily, now, model.window_days)?;
    if window.is_empty() {
        return Err(SeriesError::EmptyWindow);
    }

    // NaN marks a missing sample; f64::max/min already skip it
    let max_temp = window
        .iter()
        .map(|r| r.max_temp)
        .fold(f64::NAN, f64::max);
    let min_temp = window
        .iter()
        .map(|r| r.min_temp)
        .fold(f64::NAN, f64::min);
    let avg_sunshine = nan_mean(window.iter().map(|r| r.sunshine_duration));

    let rainy_days = window.iter().filter(|r| r.precipitation_sum > 0.0).count();

    Ok(WeeklySummary {
        avg_pressure,
        avg_sunshine,
        max_temp,
        min_temp,
        weather_summary: classify_week(rainy_days, model.rainy_day_threshold),
    })
}

/// Daily records whose day starts strictly before `now + window_days`
pub fn window(
    daily: &[DailyRecord],
    now: DateTime<Utc>,
    window_days: i64,
) -> SeriesResult<Vec<&DailyRecord>> {
    let cutoff = Duration::try_days(window_days)
        .and_then(|length| now.checked_add_signed(length))
        .ok_or(SeriesError::InvalidWindow(window_days))?;

    Ok(daily
        .iter()
        .filter(|r| r.date.and_time(NaiveTime::MIN).and_utc() < cutoff)
        .collect())
}

/// Mean of every hourly pressure sample
pub fn average_pressure(hourly: &[HourlyRecord]) -> SeriesResult<f64> {
    if hourly.is_empty() {
        return Err(SeriesError::EmptySeries("surface_pressure".to_string()));
    }
    let total: f64 = hourly.iter().map(|r| r.surface_pressure).sum();
    Ok(total / hourly.len() as f64)
}

fn nan_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
