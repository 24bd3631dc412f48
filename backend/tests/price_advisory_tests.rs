//! Price advisory tests
//!
//! Tests for weekly price trends including:
//! - Percentage change and dead-band classification
//! - Unknown crops in a batch
//! - Top movers and MSP checks on the shipped price table

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use agri_advisory::knowledge::PriceTable;
use agri_advisory::services::PriceAdvisoryService;
use agri_advisory::KnowledgeBase;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{TrendDirection, DEFAULT_DEAD_BAND_PERCENT};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn service_for(json: &str) -> PriceAdvisoryService {
    let table = PriceTable::from_json(json).unwrap();
    PriceAdvisoryService::new(Arc::new(table), DEFAULT_DEAD_BAND_PERCENT, 3)
}

fn series_json(prices: &[u32]) -> String {
    let list: Vec<String> = prices.iter().map(|p| p.to_string()).collect();
    format!(
        r#"{{"prices": [{{"crop": "Onion", "weekly_prices": [{}]}}]}}"#,
        list.join(", ")
    )
}

fn shipped() -> PriceAdvisoryService {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let knowledge = KnowledgeBase::load(&data_dir).unwrap();
    PriceAdvisoryService::new(Arc::new(knowledge.prices), DEFAULT_DEAD_BAND_PERCENT, 3)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_flat_prices_are_stable() {
        let trends = service_for(&series_json(&[100, 100])).trends(&["Onion".to_string()]);
        assert_eq!(trends[0].percent_change, Decimal::ZERO);
        assert_eq!(trends[0].direction, TrendDirection::Stable);
    }

    #[test]
    fn test_three_percent_is_rising() {
        let trends = service_for(&series_json(&[100, 103])).trends(&["onion".to_string()]);
        assert_eq!(trends[0].percent_change, dec("3"));
        assert_eq!(trends[0].direction, TrendDirection::Rising);
    }

    #[test]
    fn test_change_uses_first_and_last_week() {
        let trends = service_for(&series_json(&[200, 500, 50, 190])).trends(&[]);
        assert_eq!(trends[0].percent_change, dec("-5"));
        assert_eq!(trends[0].direction, TrendDirection::Falling);
    }

    #[test]
    fn test_single_point_is_stable() {
        let trends = service_for(&series_json(&[100])).trends(&[]);
        assert_eq!(trends[0].percent_change, Decimal::ZERO);
        assert_eq!(trends[0].direction, TrendDirection::Stable);
        assert!(trends[0].has_data);
    }

    #[test]
    fn test_rounding_to_two_places() {
        let trends = service_for(&series_json(&[300, 301])).trends(&[]);
        assert_eq!(trends[0].percent_change, dec("0.33"));
    }

    #[test]
    fn test_unknown_crop_does_not_fail_batch() {
        let crops = vec!["Wheat".to_string(), "Dragonfruit".to_string()];
        let trends = shipped().trends(&crops);
        assert_eq!(trends.len(), 2);
        assert!(trends[0].has_data);
        assert!(!trends[1].has_data);
        assert_eq!(trends[1].direction, TrendDirection::Stable);
        assert_eq!(trends[1].percent_change, Decimal::ZERO);
    }

    #[test]
    fn test_shipped_report() {
        let report = shipped().report(&[]);
        let gainers: Vec<&str> = report.top_gainers.iter().map(|t| t.crop.as_str()).collect();
        let losers: Vec<&str> = report.top_losers.iter().map(|t| t.crop.as_str()).collect();
        assert_eq!(gainers, vec!["Onion", "Cotton", "Rice"]);
        assert_eq!(losers, vec!["Tomato", "Potato", "Maize"]);

        let below: Vec<&str> = report.below_msp().map(|t| t.crop.as_str()).collect();
        assert_eq!(below, vec!["Wheat", "Mustard", "Maize"]);
    }

    #[test]
    fn test_msp_absent_is_never_below() {
        let trends = shipped().trends(&["Onion".to_string()]);
        assert_eq!(trends[0].msp, None);
        assert!(!trends[0].below_msp);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Direction agrees with the sign of the change outside the dead-band
        #[test]
        fn prop_direction_matches_change(first in 1u32..100_000, last in 1u32..100_000) {
            let trend = service_for(&series_json(&[first, last])).trends(&[]).remove(0);
            let band = DEFAULT_DEAD_BAND_PERCENT;

            if trend.percent_change > band + dec("0.01") {
                prop_assert_eq!(trend.direction, TrendDirection::Rising);
            } else if trend.percent_change < -band - dec("0.01") {
                prop_assert_eq!(trend.direction, TrendDirection::Falling);
            } else if trend.percent_change.abs() < band {
                prop_assert_eq!(trend.direction, TrendDirection::Stable);
            }
            if last == first {
                prop_assert_eq!(trend.percent_change, Decimal::ZERO);
            }
        }

        /// Every requested crop gets exactly one entry, in request order
        #[test]
        fn prop_one_entry_per_requested_crop(
            crops in prop::collection::vec("[a-z]{1,12}", 0..8)
        ) {
            let service = shipped();
            let trends = service.trends(&crops);
            if crops.is_empty() {
                prop_assert_eq!(trends.len(), 9);
            } else {
                prop_assert_eq!(trends.len(), crops.len());
                for (trend, crop) in trends.iter().zip(&crops) {
                    prop_assert!(trend.crop.eq_ignore_ascii_case(crop));
                }
            }
        }
    }
}
