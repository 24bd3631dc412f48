//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

const ENDPOINTS: &[&str] = &[
    "GET /weather-advisory?location=&lang=&send_sms=",
    "POST /weather-advisory",
    "GET /seasonal-advisory?month=&lang=&send_sms=",
    "GET /price-advisory?crops=&lang=&send_sms=",
    "POST /send-sms",
    "GET /api/weather?location=",
    "GET /api/advisory?location=&lang=&send_sms=",
    "GET /api/sms/history?limit=&phone=",
    "GET /api/sms/:message_id",
];

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub environment: String,
    pub weather_api_configured: bool,
    pub messages_sent: usize,
    pub endpoints: &'static [&'static str],
}

/// Root endpoint
pub async fn root() -> &'static str {
    "Agriculture Advisory Platform API v1.0"
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "agri-advisory".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        weather_api_configured: state.weather_client.is_some(),
        messages_sent: state.delivery.len(),
        endpoints: ENDPOINTS,
    })
}
