//! Simulated SMS delivery records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Language;

/// Delivery status. The gateway is simulated, so every record is sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Sent,
}

/// How a message was delivered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {
    Simulated,
}

/// Immutable record of one delivery request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRecord {
    pub message_id: Uuid,
    pub phone: String,
    pub message: String,
    pub language: Language,
    pub status: DeliveryStatus,
    pub delivery_mode: DeliveryMode,
    pub sender_id: String,
    pub timestamp: DateTime<Utc>,
}
