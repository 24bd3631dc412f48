//! HTTP handlers for simulated SMS delivery

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{DeliveryMode, DeliveryRecord, DeliveryStatus, Language};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Send SMS request
#[derive(Debug, Deserialize, Validate)]
pub struct SendSmsRequest {
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,

    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendSmsResponse {
    pub status: DeliveryStatus,
    pub delivery: DeliveryMode,
    pub message_id: Uuid,
    pub phone: String,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}

impl From<DeliveryRecord> for SendSmsResponse {
    fn from(record: DeliveryRecord) -> Self {
        Self {
            status: record.status,
            delivery: record.delivery_mode,
            message_id: record.message_id,
            phone: record.phone,
            timestamp: record.timestamp,
            note: "Simulated delivery; no message left this server".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub count: usize,
    pub messages: Vec<DeliveryRecord>,
}

/// Send a message through the simulated gateway
pub async fn send_sms(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<SendSmsRequest>, AppError>,
) -> AppResult<Json<SendSmsResponse>> {
    request.validate()?;

    let lang = Language::from_tag(request.lang.as_deref().unwrap_or_default());
    let record = state
        .advisory
        .send_sms(&request.phone, &request.message, lang)?;

    Ok(Json(record.into()))
}

/// Delivery log, most recent first
pub async fn sms_history(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<HistoryQuery>, AppError>,
) -> AppResult<Json<HistoryResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let messages: Vec<DeliveryRecord> = match query.phone.as_deref().map(str::trim) {
        Some(phone) if !phone.is_empty() => {
            state.delivery.by_phone(phone).into_iter().take(limit).collect()
        }
        _ => state.delivery.history(limit),
    };

    Ok(Json(HistoryResponse {
        total: state.delivery.len(),
        count: messages.len(),
        messages,
    }))
}

/// One delivery record by message id
pub async fn get_sms(
    State(state): State<AppState>,
    WithRejection(Path(message_id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<Json<DeliveryRecord>> {
    state
        .delivery
        .get(message_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Message {}", message_id)))
}
