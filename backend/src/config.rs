//! Configuration management for the Agriculture Advisory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Knowledge base location
    pub knowledge: KnowledgeConfig,

    /// Advisory rule thresholds
    pub advisory: AdvisoryConfig,

    /// Simulated SMS gateway
    pub sms: SmsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KnowledgeConfig {
    /// Directory holding the JSON knowledge base files
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdvisoryConfig {
    /// Skip irrigation when rainfall exceeds this (mm)
    pub rainfall_threshold_mm: f64,

    /// Advise early irrigation above this temperature (°C)
    pub high_temp_threshold_c: f64,

    /// Price changes within ±this percentage are reported as stable
    pub price_dead_band_percent: f64,

    /// Maximum number of top gainers/losers in a price advisory
    pub top_movers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmsConfig {
    /// Sender id stamped on simulated messages
    pub sender_id: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("knowledge.data_dir", "data")?
            .set_default("advisory.rainfall_threshold_mm", 5.0)?
            .set_default("advisory.high_temp_threshold_c", 38.0)?
            .set_default("advisory.price_dead_band_percent", 2.0)?
            .set_default("advisory.top_movers", 3)?
            .set_default("sms.sender_id", "AGRI-EXPERT")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.advisory.validate()?;
        Ok(config)
    }

    /// Whether a weather provider key is available
    pub fn weather_api_configured(&self) -> bool {
        !self.weather.api_key.trim().is_empty()
    }
}

impl AdvisoryConfig {
    /// Reject thresholds the advisory rules cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("advisory.rainfall_threshold_mm", self.rainfall_threshold_mm),
            ("advisory.high_temp_threshold_c", self.high_temp_threshold_c),
        ];
        if let Some((key, _)) = thresholds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Message(format!("{} must be a finite number", key)));
        }
        if !self.price_dead_band_percent.is_finite() || self.price_dead_band_percent < 0.0 {
            return Err(ConfigError::Message(format!(
                "advisory.price_dead_band_percent must be a non-negative number, got {}",
                self.price_dead_band_percent
            )));
        }
        Ok(())
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

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            rainfall_threshold_mm: shared::DEFAULT_RAINFALL_THRESHOLD_MM,
            high_temp_threshold_c: shared::DEFAULT_HIGH_TEMP_THRESHOLD_C,
            price_dead_band_percent: 2.0,
            top_movers: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig {
                api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
                api_key: String::new(),
                timeout_secs: 10,
            },
            knowledge: KnowledgeConfig {
                data_dir: PathBuf::from("data"),
            },
            advisory: AdvisoryConfig::default(),
            sms: SmsConfig {
                sender_id: "AGRI-EXPERT".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_advisory_config_is_valid() {
        assert!(AdvisoryConfig::default().validate().is_ok());
        let zero = AdvisoryConfig {
            price_dead_band_percent: 0.0,
            ..AdvisoryConfig::default()
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_or_nan_dead_band() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let config = AdvisoryConfig {
                price_dead_band_percent: bad,
                ..AdvisoryConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("price_dead_band_percent"));
        }
    }

    #[test]
    fn test_rejects_non_finite_thresholds() {
        let config = AdvisoryConfig {
            high_temp_threshold_c: f64::NAN,
            ..AdvisoryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
