//! Route definitions for the Agriculture Advisory Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Advisory routes served at the root
pub fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/weather-advisory",
            get(handlers::get_weather_advisory).post(handlers::post_weather_advisory),
        )
        .route("/seasonal-advisory", get(handlers::seasonal_advisory))
        .route("/price-advisory", get(handlers::price_advisory))
        .route("/send-sms", post(handlers::send_sms))
}

/// Routes under /api
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/weather", get(handlers::current_weather))
        .route("/advisory", get(handlers::get_weather_advisory))
        .nest("/sms", sms_routes())
}

/// Delivery log routes
fn sms_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(handlers::sms_history))
        .route("/:message_id", get(handlers::get_sms))
}
