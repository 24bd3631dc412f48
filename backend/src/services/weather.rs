//! Weather advisory engine: irrigation decisions from weather readings

use shared::{validate_weather_reading, IrrigationDecision, IrrigationRules, WeatherReading};

use crate::config::AdvisoryConfig;
use crate::error::{AppError, AppResult};

/// Irrigation advisory service. Stateless apart from its rule table.
#[derive(Debug, Clone, Default)]
pub struct WeatherAdvisoryService {
    rules: IrrigationRules,
}

impl WeatherAdvisoryService {
    /// Create a service with explicit thresholds
    pub fn new(rules: IrrigationRules) -> Self {
        Self { rules }
    }

    /// Create a service from the advisory configuration
    pub fn from_config(config: &AdvisoryConfig) -> Self {
        Self::new(IrrigationRules::new(
            config.rainfall_threshold_mm,
            config.high_temp_threshold_c,
        ))
    }

    pub fn rules(&self) -> &IrrigationRules {
        &self.rules
    }

    /// Evaluate the irrigation rules for a reading
    pub fn evaluate(&self, reading: &WeatherReading) -> AppResult<IrrigationDecision> {
        validate_weather_reading(reading).map_err(|msg| {
            AppError::validation("weather", msg, "मौसम का डेटा अमान्य है")
        })?;

        let decision = self.rules.decide(reading);

        tracing::debug!(
            location = %reading.location,
            temperature_c = reading.temperature_c,
            rainfall_mm = reading.rainfall_mm,
            action = %decision.action,
            "Irrigation decision"
        );

        Ok(decision)
    }
}
