//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint. Locations
//! may be a city name or a 6-digit Indian pincode.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::{is_pincode, WeatherReading};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

const MPS_TO_KMH: f64 = 3.6;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    pincodes: Arc<HashMap<String, String>>,
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_percent: i32,
    /// Last hour's rain, else last 3 hours, else 0 (mm, one decimal)
    pub rainfall_mm: f64,
    pub wind_speed_kmh: f64,
    pub description: String,
}

impl CurrentWeather {
    /// Reading for the irrigation rules, labelled with the caller's location
    pub fn reading(&self, location: &str) -> WeatherReading {
        WeatherReading::new(self.temperature_c, self.rainfall_mm, location)
    }
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    #[serde(default)]
    wind: Option<OWMWind>,
    #[serde(default)]
    rain: Option<OWMRain>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a client from configuration. Fails when no API key is set.
    pub fn new(config: &WeatherConfig, pincodes: HashMap<String, String>) -> AppResult<Self> {
        let api_key = config.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            pincodes: Arc::new(pincodes),
        })
    }

    /// City name for a location. Mapped pincodes become their city;
    /// everything else is passed through.
    pub fn resolve_location(&self, location: &str) -> String {
        let location = location.trim();
        if is_pincode(location) {
            if let Some(city) = self.pincodes.get(location) {
                return city.clone();
            }
        }
        location.to_string()
    }

    /// Fetch current weather for a city name or pincode
    pub async fn get_current_weather(&self, location: &str) -> AppResult<CurrentWeather> {
        let city = self.resolve_location(location);
        if city.is_empty() {
            return Err(AppError::validation(
                "location",
                "Location is required",
                "स्थान आवश्यक है",
            ));
        }

        tracing::debug!(location = %location, city = %city, "Fetching current weather");

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", format!("{},IN", city)),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::Configuration("Invalid weather API key".to_string()));
            }
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!("Location '{}'", location.trim())));
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalService(format!(
                    "Weather API error: {} - {}",
                    status, body
                )));
            }
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_current_response(data, &city))
    }
}

/// Convert an OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse, city: &str) -> CurrentWeather {
    let rainfall = data
        .rain
        .as_ref()
        .and_then(|r| r.one_hour.or(r.three_hour))
        .unwrap_or(0.0);

    CurrentWeather {
        city: if data.name.is_empty() {
            city.to_string()
        } else {
            data.name
        },
        temperature_c: round1(data.main.temp),
        feels_like_c: round1(data.main.feels_like),
        humidity_percent: data.main.humidity,
        rainfall_mm: round1(rainfall),
        wind_speed_kmh: round1(data.wind.map(|w| w.speed).unwrap_or(0.0) * MPS_TO_KMH),
        description: data
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> WeatherConfig {
        WeatherConfig {
            api_endpoint: "http://localhost:9".to_string(),
            api_key: api_key.to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = WeatherClient::new(&config("  "), HashMap::new()).err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let mut weather = config("key");
        weather.api_endpoint = "https://api.openweathermap.org/data/2.5/".to_string();
        let client = WeatherClient::new(&weather, HashMap::new()).unwrap();
        assert_eq!(client.base_url, "https://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn test_pincode_resolution() {
        let pincodes = HashMap::from([("110001".to_string(), "New Delhi".to_string())]);
        let client = WeatherClient::new(&config("key"), pincodes).unwrap();
        assert_eq!(client.resolve_location("110001"), "New Delhi");
        assert_eq!(client.resolve_location("400001"), "400001");
        assert_eq!(client.resolve_location(" Pune "), "Pune");
    }

    #[test]
    fn test_convert_prefers_hourly_rain() {
        let data: OWMCurrentResponse = serde_json::from_str(
            r#"{
                "weather": [{"description": "light rain"}],
                "main": {"temp": 31.26, "feels_like": 35.04, "humidity": 70},
                "wind": {"speed": 2.5},
                "rain": {"1h": 1.27, "3h": 6.0},
                "name": "Nagpur"
            }"#,
        )
        .unwrap();
        let weather = convert_current_response(data, "Nagpur");
        assert_eq!(weather.rainfall_mm, 1.3);
        assert_eq!(weather.temperature_c, 31.3);
        assert_eq!(weather.wind_speed_kmh, 9.0);
        assert_eq!(weather.description, "light rain");
    }

    #[test]
    fn test_convert_without_rain() {
        let data: OWMCurrentResponse = serde_json::from_str(
            r#"{"main": {"temp": 40.0, "feels_like": 44.0, "humidity": 20}, "name": ""}"#,
        )
        .unwrap();
        let weather = convert_current_response(data, "Jaipur");
        assert_eq!(weather.rainfall_mm, 0.0);
        assert_eq!(weather.city, "Jaipur");
        assert_eq!(weather.reading("302001").location, "302001");
    }
}
