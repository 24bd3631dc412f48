//! Weather advisory tests
//!
//! Tests for the irrigation rule table including:
//! - Sufficient rainfall always suppresses irrigation
//! - Heat stress advice below the rainfall threshold
//! - Exclusive threshold boundaries

use agri_advisory::services::WeatherAdvisoryService;
use proptest::prelude::*;
use shared::{IrrigationAction, IrrigationReason, IrrigationRules, WeatherReading};

fn evaluate(temperature_c: f64, rainfall_mm: f64) -> (IrrigationAction, IrrigationReason) {
    let decision = WeatherAdvisoryService::default()
        .evaluate(&WeatherReading::new(temperature_c, rainfall_mm, "Nagpur"))
        .unwrap();
    (decision.action, decision.reason)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_rain_beats_heat() {
        assert_eq!(
            evaluate(45.0, 12.0),
            (IrrigationAction::NoIrrigate, IrrigationReason::SufficientRainfall)
        );
    }

    #[test]
    fn test_heat_stress() {
        assert_eq!(
            evaluate(40.0, 0.0),
            (IrrigationAction::IrrigateEarly, IrrigationReason::HeatStress)
        );
    }

    #[test]
    fn test_favorable_conditions() {
        assert_eq!(
            evaluate(30.0, 2.0),
            (IrrigationAction::IrrigateNormal, IrrigationReason::FavorableConditions)
        );
    }

    /// Thresholds are exclusive: exact values fall through to the next rule
    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(evaluate(40.0, 5.0).0, IrrigationAction::IrrigateEarly);
        assert_eq!(evaluate(38.0, 0.0).0, IrrigationAction::IrrigateNormal);
        assert_eq!(evaluate(38.0, 5.0).0, IrrigationAction::IrrigateNormal);
        assert_eq!(evaluate(20.0, 5.01).0, IrrigationAction::NoIrrigate);
    }

    #[test]
    fn test_invalid_readings() {
        let service = WeatherAdvisoryService::default();
        for reading in [
            WeatherReading::new(f64::NAN, 0.0, ""),
            WeatherReading::new(30.0, f64::INFINITY, ""),
            WeatherReading::new(30.0, -1.0, ""),
        ] {
            assert!(service.evaluate(&reading).unwrap_err().is_validation());
        }
    }

    #[test]
    fn test_rule_table_order() {
        let rules = IrrigationRules::default();
        let actions: Vec<IrrigationAction> =
            rules.rules().iter().map(|r| r.decision.action).collect();
        assert_eq!(
            actions,
            vec![
                IrrigationAction::NoIrrigate,
                IrrigationAction::IrrigateEarly,
                IrrigationAction::IrrigateNormal,
            ]
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Rainfall above 5mm never irrigates, whatever the temperature
        #[test]
        fn prop_rain_suppresses_irrigation(
            temperature in -10.0f64..55.0,
            rainfall in 5.0001f64..500.0
        ) {
            prop_assert_eq!(evaluate(temperature, rainfall).0, IrrigationAction::NoIrrigate);
        }

        /// Dry and hot means irrigate early
        #[test]
        fn prop_heat_without_rain_irrigates_early(
            temperature in 38.0001f64..55.0,
            rainfall in 0.0f64..=5.0
        ) {
            prop_assert_eq!(evaluate(temperature, rainfall).0, IrrigationAction::IrrigateEarly);
        }

        /// Dry and mild means the normal schedule
        #[test]
        fn prop_mild_without_rain_irrigates_normally(
            temperature in -10.0f64..=38.0,
            rainfall in 0.0f64..=5.0
        ) {
            prop_assert_eq!(evaluate(temperature, rainfall).0, IrrigationAction::IrrigateNormal);
        }

        /// Decisions depend only on the reading
        #[test]
        fn prop_decision_is_deterministic(
            temperature in -10.0f64..55.0,
            rainfall in 0.0f64..50.0
        ) {
            prop_assert_eq!(evaluate(temperature, rainfall), evaluate(temperature, rainfall));
        }
    }
}
