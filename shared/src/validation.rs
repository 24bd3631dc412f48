//! Validation utilities for the Agriculture Advisory Platform
//!
//! Includes India-specific helpers for phone numbers and postal pincodes.

use crate::models::WeatherReading;

// ============================================================================
// Advisory Input Validations
// ============================================================================

/// Validate calendar month (1-12)
pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

/// Validate a weather reading before it reaches the irrigation rules
pub fn validate_weather_reading(reading: &WeatherReading) -> Result<(), &'static str> {
    if !reading.temperature_c.is_finite() {
        return Err("Temperature must be a finite number");
    }
    if !reading.rainfall_mm.is_finite() {
        return Err("Rainfall must be a finite number");
    }
    if reading.rainfall_mm < 0.0 {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

/// Validate message content for delivery
pub fn validate_message(message: &str) -> Result<(), &'static str> {
    if message.trim().is_empty() {
        return Err("Message content cannot be empty");
    }
    Ok(())
}

// ============================================================================
// India-Specific Validations
// ============================================================================

fn strip_phone_separators(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Validate phone number loosely: digits with an optional leading '+'.
/// Spaces and hyphens are ignored.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let cleaned = strip_phone_separators(phone);
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if digits.is_empty() {
        return Err("Phone number is required");
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number must contain only digits and an optional leading '+'");
    }
    Ok(())
}

/// Normalize a phone number for storage and lookup.
/// A bare 10-digit Indian mobile number gets the +91 country code.
pub fn normalize_phone(phone: &str) -> String {
    let cleaned = strip_phone_separators(phone);
    if !cleaned.starts_with('+') && cleaned.len() == 10 {
        format!("+91{}", cleaned)
    } else {
        cleaned
    }
}

/// Check whether a location string is a 6-digit Indian postal pincode
pub fn is_pincode(location: &str) -> bool {
    location.len() == 6 && location.chars().all(|c| c.is_ascii_digit())
}
