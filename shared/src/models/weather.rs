//! Weather readings and irrigation decision rules

use serde::{Deserialize, Serialize};

/// Rainfall above which irrigation is skipped (mm)
pub const DEFAULT_RAINFALL_THRESHOLD_MM: f64 = 5.0;

/// Temperature above which early-morning irrigation is advised (°C)
pub const DEFAULT_HIGH_TEMP_THRESHOLD_C: f64 = 38.0;

/// A normalized weather reading for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub location: String,
}

impl WeatherReading {
    pub fn new(temperature_c: f64, rainfall_mm: f64, location: impl Into<String>) -> Self {
        Self {
            temperature_c,
            rainfall_mm,
            location: location.into(),
        }
    }
}

/// Irrigation action advised to the farmer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationAction {
    NoIrrigate,
    IrrigateEarly,
    IrrigateNormal,
}

impl IrrigationAction {
    /// Localization key for the advisory text
    pub fn message_key(&self) -> &'static str {
        match self {
            IrrigationAction::NoIrrigate => "irrigation.no_irrigate",
            IrrigationAction::IrrigateEarly => "irrigation.irrigate_early",
            IrrigationAction::IrrigateNormal => "irrigation.irrigate_normal",
        }
    }
}

impl std::fmt::Display for IrrigationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationAction::NoIrrigate => write!(f, "NO_IRRIGATE"),
            IrrigationAction::IrrigateEarly => write!(f, "IRRIGATE_EARLY"),
            IrrigationAction::IrrigateNormal => write!(f, "IRRIGATE_NORMAL"),
        }
    }
}

/// Rule that triggered an irrigation decision
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationReason {
    SufficientRainfall,
    HeatStress,
    FavorableConditions,
}

/// Outcome of evaluating the irrigation rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IrrigationDecision {
    pub action: IrrigationAction,
    pub reason: IrrigationReason,
}

/// Condition of a single rule. Thresholds are exclusive: a reading exactly
/// on the threshold does not match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleCondition {
    RainfallAbove(f64),
    TemperatureAbove(f64),
    Always,
}

impl RuleCondition {
    pub fn matches(&self, reading: &WeatherReading) -> bool {
        match *self {
            RuleCondition::RainfallAbove(mm) => reading.rainfall_mm > mm,
            RuleCondition::TemperatureAbove(c) => reading.temperature_c > c,
            RuleCondition::Always => true,
        }
    }
}

/// One row of the irrigation decision table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrigationRule {
    pub condition: RuleCondition,
    pub decision: IrrigationDecision,
}

/// Ordered irrigation decision table, evaluated first-match-wins.
/// The last row is always an unconditional fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct IrrigationRules {
    rules: Vec<IrrigationRule>,
}

impl IrrigationRules {
    pub fn new(rainfall_threshold_mm: f64, high_temp_threshold_c: f64) -> Self {
        Self {
            rules: vec![
                IrrigationRule {
                    condition: RuleCondition::RainfallAbove(rainfall_threshold_mm),
                    decision: IrrigationDecision {
                        action: IrrigationAction::NoIrrigate,
                        reason: IrrigationReason::SufficientRainfall,
                    },
                },
                IrrigationRule {
                    condition: RuleCondition::TemperatureAbove(high_temp_threshold_c),
                    decision: IrrigationDecision {
                        action: IrrigationAction::IrrigateEarly,
                        reason: IrrigationReason::HeatStress,
                    },
                },
                IrrigationRule {
                    condition: RuleCondition::Always,
                    decision: IrrigationDecision {
                        action: IrrigationAction::IrrigateNormal,
                        reason: IrrigationReason::FavorableConditions,
                    },
                },
            ],
        }
    }

    pub fn rules(&self) -> &[IrrigationRule] {
        &self.rules
    }

    /// Decide for a reading that has already been validated
    pub fn decide(&self, reading: &WeatherReading) -> IrrigationDecision {
        self.rules
            .iter()
            .find(|rule| rule.condition.matches(reading))
            .map(|rule| rule.decision)
            .unwrap_or(IrrigationDecision {
                action: IrrigationAction::IrrigateNormal,
                reason: IrrigationReason::FavorableConditions,
            })
    }

    pub fn rainfall_threshold_mm(&self) -> f64 {
        self.threshold_of(|c| match c {
            RuleCondition::RainfallAbove(mm) => Some(mm),
            _ => None,
        })
    }

    pub fn high_temp_threshold_c(&self) -> f64 {
        self.threshold_of(|c| match c {
            RuleCondition::TemperatureAbove(t) => Some(t),
            _ => None,
        })
    }

    fn threshold_of(&self, pick: impl Fn(RuleCondition) -> Option<f64>) -> f64 {
        self.rules
            .iter()
            .find_map(|rule| pick(rule.condition))
            .unwrap_or(f64::NAN)
    }
}

impl Default for IrrigationRules {
    fn default() -> Self {
        Self::new(DEFAULT_RAINFALL_THRESHOLD_MM, DEFAULT_HIGH_TEMP_THRESHOLD_C)
    }
}
