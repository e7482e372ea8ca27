//! Open-Meteo API client
//!
//! Fetches daily and hourly series for a location and turns each group of
//! the reply into a `TimeSeriesBlock`. Responses are cached and transient
//! failures are retried with exponential backoff.

use async_trait::async_trait;
use chrono::{DateTime, Duration};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{SeriesError, SeriesVariable, TimeSeriesBlock};
use std::collections::HashMap;

use super::cache::ResponseCache;
use super::provider::{WeatherProvider, WeatherRequest, WeatherResponse};
use crate::config::OpenMeteoConfig;
use crate::error::{AppError, AppResult};

/// Retry policy for upstream calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Seconds; the wait before retry n is `backoff_factor * 2^n`
    pub backoff_factor: f64,
}

impl RetryPolicy {
    /// Longest wait between two attempts
    pub const MAX_DELAY: std::time::Duration = std::time::Duration::from_secs(120);

    /// Wait before the given retry (0-based), capped at `MAX_DELAY`
    pub fn delay(&self, retry: u32) -> std::time::Duration {
        let seconds = self.backoff_factor * 2f64.powi(retry.min(64) as i32);
        if !(seconds > 0.0) {
            return std::time::Duration::ZERO;
        }
        std::time::Duration::try_from_secs_f64(seconds)
            .map_or(Self::MAX_DELAY, |delay| delay.min(Self::MAX_DELAY))
    }

    /// Whether an HTTP status is worth another attempt
    pub fn is_retryable(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 0.2,
        }
    }
}

/// Open-Meteo forecast client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    cache: ResponseCache,
    retry: RetryPolicy,
}

impl OpenMeteoClient {
    /// Create a client from configuration
    pub fn from_config(config: &OpenMeteoConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        let ttl = Duration::try_seconds(config.cache_ttl_secs).ok_or_else(|| {
            AppError::Configuration(format!(
                "cache TTL of {}s is out of range",
                config.cache_ttl_secs
            ))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cache: ResponseCache::new(ttl),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_factor: config.backoff_factor,
            },
        })
    }

    /// Send the query, retrying network errors, 429 and 5xx
    async fn send_with_retry(&self, query: &[(&'static str, String)]) -> AppResult<String> {
        let mut retry = 0;
        loop {
            let result = self.client.get(&self.base_url).query(query).send().await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    return response.text().await.map_err(|e| {
                        AppError::Upstream(format!("Failed to read forecast response: {}", e))
                    });
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    let failure = format!("Open-Meteo HTTP {} - {}", status, body);
                    if !RetryPolicy::is_retryable(status) {
                        return Err(AppError::Upstream(failure));
                    }
                    failure
                }
                Err(e) => format!("Open-Meteo request failed: {}", e),
            };

            if retry >= self.retry.max_retries {
                tracing::error!("Giving up after {} retries: {}", retry, failure);
                return Err(AppError::Upstream(failure));
            }

            let delay = self.retry.delay(retry);
            tracing::warn!(
                "{}; retry {} of {} in {:.1}s",
                failure,
                retry + 1,
                self.retry.max_retries,
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch(&self, request: &WeatherRequest) -> AppResult<Vec<WeatherResponse>> {
        let query = build_query(request);
        let key = cache_key(&query);

        match self.cache.read(&key).await {
            Some(cached) if !cached.is_expired => {
                tracing::debug!("Open-Meteo cache hit for {} (stored {})", key, cached.cached_at);
                return Ok(vec![parse_response(&cached.body, request)?]);
            }
            Some(cached) => {
                tracing::debug!("Cached reply from {} expired, refetching", cached.cached_at);
            }
            None => {}
        }

        let body = self.send_with_retry(&query).await?;
        // Cache only replies that parse
        let response = parse_response(&body, request)?;
        self.cache.write(&key, body).await;
        tracing::debug!("{} replies cached", self.cache.len().await);

        Ok(vec![response])
    }
}

/// Query parameters for a request. Instants come back as unix seconds in UTC.
pub fn build_query(request: &WeatherRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("latitude", request.coordinates.latitude.to_string()),
        ("longitude", request.coordinates.longitude.to_string()),
    ];
    if !request.daily.is_empty() {
        query.push(("daily", join_names(&request.daily)));
    }
    if !request.hourly.is_empty() {
        query.push(("hourly", join_names(&request.hourly)));
    }
    query.push(("timeformat", "unixtime".to_string()));
    query.push(("timezone", "GMT".to_string()));
    query
}

fn join_names<V: SeriesVariable>(variables: &[V]) -> String {
    variables
        .iter()
        .map(|v| v.api_name())
        .collect::<Vec<_>>()
        .join(",")
}

fn cache_key(query: &[(&'static str, String)]) -> String {
    query
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<SeriesPayload>,
    hourly: Option<SeriesPayload>,
}

/// One group of the response: sample times plus a column per variable
#[derive(Debug, Deserialize)]
struct SeriesPayload {
    time: Vec<i64>,
    #[serde(flatten)]
    columns: HashMap<String, Vec<Option<f64>>>,
}

/// Parse a response body into blocks bound to the requested variables
pub fn parse_response(body: &str, request: &WeatherRequest) -> AppResult<WeatherResponse> {
    let payload: OpenMeteoResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("Failed to parse forecast response: {}", e)))?;

    let daily = match payload.daily {
        Some(group) if !request.daily.is_empty() => into_block(group, &request.daily)?,
        _ => None,
    };
    let hourly = match payload.hourly {
        Some(group) if !request.hourly.is_empty() => into_block(group, &request.hourly)?,
        _ => None,
    };

    Ok(WeatherResponse { daily, hourly })
}

fn into_block<V: SeriesVariable>(
    mut payload: SeriesPayload,
    variables: &[V],
) -> Result<Option<TimeSeriesBlock<V>>, SeriesError> {
    let Some(&first) = payload.time.first() else {
        return Ok(None);
    };

    let interval = V::nominal_interval();
    let step = interval.num_seconds();
    let count = payload.time.len() as i64;
    if let Some((i, t)) = (0..)
        .zip(&payload.time)
        .find(|(i, t)| **t != first + i * step)
    {
        return Err(SeriesError::MalformedBlock(format!(
            "sample {} at {} is not {}s after the previous one",
            i, t, step
        )));
    }

    let start = DateTime::from_timestamp(first, 0)
        .ok_or_else(|| SeriesError::MalformedBlock(format!("bad timestamp {}", first)))?;
    let end = start + Duration::seconds(count * step);

    let mut block = TimeSeriesBlock::new(start, end, interval);
    for variable in variables {
        let values = payload
            .columns
            .remove(variable.api_name())
            .ok_or_else(|| SeriesError::MissingVariable(variable.api_name().to_string()))?;
        // Gaps arrive as null
        let values = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        block = block.with_variable(*variable, values);
    }
    block.validate()?;

    Ok(Some(block))
}
