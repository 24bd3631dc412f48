//! Simulated SMS delivery with an in-memory delivery log

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use shared::{
    normalize_phone, validate_message, validate_phone, DeliveryMode, DeliveryRecord,
    DeliveryStatus, Language,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Records every simulated SMS. The log only grows.
#[derive(Debug)]
pub struct DeliveryTracker {
    sender_id: String,
    log: Mutex<Vec<DeliveryRecord>>,
}

impl DeliveryTracker {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Validate, stamp and record one message
    pub fn send(&self, phone: &str, message: &str, language: Language) -> AppResult<DeliveryRecord> {
        validate_phone(phone).map_err(|msg| {
            AppError::validation("phone", msg, "फ़ोन नंबर अमान्य है")
        })?;
        validate_message(message).map_err(|msg| {
            AppError::validation("message", msg, "संदेश खाली नहीं हो सकता")
        })?;

        let record = DeliveryRecord {
            message_id: Uuid::new_v4(),
            phone: normalize_phone(phone),
            message: message.to_string(),
            language,
            status: DeliveryStatus::Sent,
            delivery_mode: DeliveryMode::Simulated,
            sender_id: self.sender_id.clone(),
            timestamp: Utc::now(),
        };

        self.records().push(record.clone());

        tracing::info!(
            message_id = %record.message_id,
            phone = %record.phone,
            language = %language,
            chars = record.message.chars().count(),
            "SMS sent (simulated)"
        );

        Ok(record)
    }

    pub fn get(&self, message_id: Uuid) -> Option<DeliveryRecord> {
        self.records()
            .iter()
            .find(|r| r.message_id == message_id)
            .cloned()
    }

    /// Most recent first
    pub fn history(&self, limit: usize) -> Vec<DeliveryRecord> {
        self.records().iter().rev().take(limit).cloned().collect()
    }

    /// Records for a phone number, most recent first
    pub fn by_phone(&self, phone: &str) -> Vec<DeliveryRecord> {
        let phone = normalize_phone(phone);
        self.records()
            .iter()
            .rev()
            .filter(|r| r.phone == phone)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn records(&self) -> MutexGuard<'_, Vec<DeliveryRecord>> {
        // Records are pushed whole, so a poisoned log is still consistent
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
