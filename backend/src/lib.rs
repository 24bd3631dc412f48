//! Agriculture Advisory Platform
//!
//! Bilingual (English/Hindi) advisories for farmers: irrigation advice from
//! weather readings, seasonal crop recommendations and weekly market price
//! trends, with simulated SMS delivery.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod knowledge;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use knowledge::KnowledgeBase;

use external::WeatherClient;
use services::{AdvisoryOrchestrator, DeliveryTracker};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisory: Arc<AdvisoryOrchestrator>,
    pub delivery: Arc<DeliveryTracker>,
    /// Absent when no provider key is configured
    pub weather_client: Option<WeatherClient>,
}

impl AppState {
    /// Wire the engines, delivery log and weather client together
    pub fn new(config: Config, knowledge: KnowledgeBase) -> AppResult<Self> {
        let KnowledgeBase {
            seasons,
            prices,
            templates,
            pincodes,
        } = knowledge;

        let weather_client = if config.weather_api_configured() {
            Some(WeatherClient::new(&config.weather, pincodes)?)
        } else {
            tracing::warn!("Weather API key not configured, GET /weather-advisory disabled");
            None
        };

        let delivery = Arc::new(DeliveryTracker::new(config.sms.sender_id.clone()));
        let advisory = Arc::new(AdvisoryOrchestrator::new(
            seasons,
            prices,
            templates,
            &config.advisory,
            Arc::clone(&delivery),
        ));

        Ok(Self {
            config: Arc::new(config),
            advisory,
            delivery,
            weather_client,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(routes::advisory_routes())
        .nest("/api", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
