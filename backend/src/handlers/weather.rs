//! HTTP handlers for weather-based irrigation advisories

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use shared::{DeliveryRecord, IrrigationAction, IrrigationReason, Language, WeatherReading};

use crate::error::{AppError, AppResult};
use crate::external::{CurrentWeather, WeatherClient};
use crate::services::WeatherAdvisory;
use crate::AppState;

/// Query parameters for a provider-backed advisory
#[derive(Debug, Deserialize)]
pub struct WeatherAdvisoryQuery {
    pub location: Option<String>,
    pub lang: Option<String>,
    pub send_sms: Option<String>,
}

/// Query parameters for a raw weather lookup
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherQuery {
    pub location: Option<String>,
}

/// Advisory from a reading the caller already has
#[derive(Debug, Deserialize)]
pub struct WeatherAdvisoryRequest {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    #[serde(default)]
    pub location: String,
    pub lang: Option<String>,
    pub send_sms: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeatherSummary {
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i32>,
    pub rainfall: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Thresholds {
    pub rainfall_threshold_mm: f64,
    pub temp_threshold_c: f64,
}

#[derive(Debug, Serialize)]
pub struct AdvisorySummary {
    #[serde(rename = "type")]
    pub action: IrrigationAction,
    pub reason: IrrigationReason,
    pub message: String,
    pub language: Language,
    pub thresholds: Thresholds,
}

#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub success: bool,
    pub location: String,
    pub weather: CurrentWeather,
}

#[derive(Debug, Serialize)]
pub struct WeatherAdvisoryResponse {
    pub success: bool,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub weather: WeatherSummary,
    pub advisory: AdvisorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_status: Option<DeliveryRecord>,
}

/// Fetch current weather for a location and advise on irrigation
pub async fn get_weather_advisory(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<WeatherAdvisoryQuery>, AppError>,
) -> AppResult<Json<WeatherAdvisoryResponse>> {
    let location = required_location(query.location.as_deref())?;
    let current = weather_client(&state)?.get_current_weather(location).await?;
    let lang = Language::from_tag(query.lang.as_deref().unwrap_or_default());

    let reading = current.reading(location);

    let advisory = state
        .advisory
        .weather_advisory(&reading, lang, query.send_sms.as_deref())?;

    Ok(Json(build_response(&state, location, Some(&current), &reading, advisory)))
}

/// Current provider conditions for a location, without an advisory
pub async fn current_weather(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CurrentWeatherQuery>, AppError>,
) -> AppResult<Json<CurrentWeatherResponse>> {
    let location = required_location(query.location.as_deref())?;
    let weather = weather_client(&state)?.get_current_weather(location).await?;

    Ok(Json(CurrentWeatherResponse {
        success: true,
        location: location.to_string(),
        weather,
    }))
}

/// Advise on irrigation from a supplied reading
pub async fn post_weather_advisory(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<WeatherAdvisoryRequest>, AppError>,
) -> AppResult<Json<WeatherAdvisoryResponse>> {
    let reading = WeatherReading::new(
        request.temperature_c,
        request.rainfall_mm,
        request.location.trim(),
    );
    let lang = Language::from_tag(request.lang.as_deref().unwrap_or_default());

    let advisory = state
        .advisory
        .weather_advisory(&reading, lang, request.send_sms.as_deref())?;

    Ok(Json(build_response(&state, &reading.location, None, &reading, advisory)))
}

fn required_location(location: Option<&str>) -> AppResult<&str> {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::validation("location", "Location is required", "स्थान आवश्यक है"))
}

fn weather_client(state: &AppState) -> AppResult<&WeatherClient> {
    state
        .weather_client
        .as_ref()
        .ok_or_else(|| AppError::Configuration("Weather API key not configured".to_string()))
}

fn build_response(
    state: &AppState,
    location: &str,
    current: Option<&CurrentWeather>,
    reading: &WeatherReading,
    advisory: WeatherAdvisory,
) -> WeatherAdvisoryResponse {
    let rules = state.advisory.weather().rules();

    WeatherAdvisoryResponse {
        success: true,
        location: location.to_string(),
        city: current.map(|c| c.city.clone()),
        weather: WeatherSummary {
            temperature: reading.temperature_c,
            feels_like: current.map(|c| c.feels_like_c),
            humidity: current.map(|c| c.humidity_percent),
            rainfall: reading.rainfall_mm,
            wind_speed: current.map(|c| c.wind_speed_kmh),
            description: current.map(|c| c.description.clone()),
        },
        advisory: AdvisorySummary {
            action: advisory.decision.action,
            reason: advisory.decision.reason,
            message: advisory.message,
            language: advisory.language,
            thresholds: Thresholds {
                rainfall_threshold_mm: rules.rainfall_threshold_mm(),
                temp_threshold_c: rules.high_temp_threshold_c(),
            },
        },
        sms_status: advisory.delivery,
    }
}
