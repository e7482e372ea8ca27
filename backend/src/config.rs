//! Configuration management for the solar forecast server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SOLAR_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::SolarModel;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream weather provider configuration
    pub open_meteo: OpenMeteoConfig,

    /// Solar yield and weekly classification parameters
    pub solar: SolarConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenMeteoConfig {
    /// Forecast endpoint
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// How long a cached response stays fresh, in seconds
    pub cache_ttl_secs: i64,

    /// Retries after the first attempt
    pub max_retries: u32,

    /// Backoff before retry n is `backoff_factor * 2^n` seconds
    pub backoff_factor: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolarConfig {
    /// Installed capacity in kW
    pub power_capacity_kw: f64,

    /// Panel efficiency
    pub efficiency: f64,

    /// Rainy days that make a rainy week
    pub rainy_day_threshold: usize,

    /// Summary window length in days
    pub window_days: i64,
}

impl SolarConfig {
    /// Open-Meteo forecasts reach 16 days ahead at most
    pub const MAX_WINDOW_DAYS: i64 = 16;

    pub fn model(&self) -> SolarModel {
        SolarModel {
            power_capacity_kw: self.power_capacity_kw,
            efficiency: self.efficiency,
            rainy_day_threshold: self.rainy_day_threshold,
            window_days: self.window_days,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SOLAR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("open_meteo.base_url", OpenMeteoConfig::DEFAULT_BASE_URL)?
            .set_default("open_meteo.timeout_secs", 20)?
            .set_default("open_meteo.cache_ttl_secs", 3600)?
            .set_default("open_meteo.max_retries", 5)?
            .set_default("open_meteo.backoff_factor", 0.2)?
            .set_default("solar.power_capacity_kw", SolarModel::DEFAULT_POWER_CAPACITY_KW)?
            .set_default("solar.efficiency", SolarModel::DEFAULT_EFFICIENCY)?
            .set_default(
                "solar.rainy_day_threshold",
                SolarModel::DEFAULT_RAINY_DAY_THRESHOLD as i64,
            )?
            .set_default("solar.window_days", SolarModel::DEFAULT_WINDOW_DAYS)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SOLAR_ prefix)
            .add_source(
                Environment::with_prefix("SOLAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        let open_meteo = &self.open_meteo;
        if open_meteo.timeout_secs == 0 {
            return Err(invalid("open_meteo.timeout_secs must be positive"));
        }
        if !(0..=OpenMeteoConfig::MAX_CACHE_TTL_SECS).contains(&open_meteo.cache_ttl_secs) {
            return Err(invalid(format!(
                "open_meteo.cache_ttl_secs must be between 0 and {}",
                OpenMeteoConfig::MAX_CACHE_TTL_SECS
            )));
        }
        if !open_meteo.backoff_factor.is_finite() || open_meteo.backoff_factor < 0.0 {
            return Err(invalid("open_meteo.backoff_factor must be a non-negative number"));
        }

        let solar = &self.solar;
        if !(1..=SolarConfig::MAX_WINDOW_DAYS).contains(&solar.window_days) {
            return Err(invalid(format!(
                "solar.window_days must be between 1 and {}",
                SolarConfig::MAX_WINDOW_DAYS
            )));
        }
        if !solar.power_capacity_kw.is_finite() || !solar.efficiency.is_finite() {
            return Err(invalid("solar.power_capacity_kw and solar.efficiency must be finite"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Message(message.into())
}

impl OpenMeteoConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.open-meteo.com/v1/forecast";

    /// One week
    pub const MAX_CACHE_TTL_SECS: i64 = 7 * 24 * 3600;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            open_meteo: OpenMeteoConfig::default(),
            solar: SolarConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 20,
            cache_ttl_secs: 3600,
            max_retries: 5,
            backoff_factor: 0.2,
        }
    }
}

impl Default for SolarConfig {
    fn default() -> Self {
        let model = SolarModel::default();
        Self {
            power_capacity_kw: model.power_capacity_kw,
            efficiency: model.efficiency,
            rainy_day_threshold: model.rainy_day_threshold,
            window_days: model.window_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_solar_config_matches_model() {
        assert_eq!(SolarConfig::default().model(), SolarModel::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_window_days_out_of_range() {
        for window_days in [0, -3, 17, i64::MAX] {
            let mut config = Config::default();
            config.solar.window_days = window_days;
            assert!(config.validate().is_err(), "accepted {}", window_days);
        }
    }

    #[test]
    fn test_cache_ttl_out_of_range() {
        let mut config = Config::default();
        config.open_meteo.cache_ttl_secs = i64::MAX;
        assert!(config.validate().is_err());

        config.open_meteo.cache_ttl_secs = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_factor_must_be_finite() {
        for backoff_factor in [f64::NAN, f64::INFINITY, -0.5] {
            let mut config = Config::default();
            config.open_meteo.backoff_factor = backoff_factor;
            assert!(config.validate().is_err());
        }
    }
}
