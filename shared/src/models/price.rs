//! Market price observations and weekly trend classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default dead-band around zero change, in percent
pub const DEFAULT_DEAD_BAND_PERCENT: Decimal = Decimal::TWO;

fn default_unit() -> String {
    "quintal".to_string()
}

/// Weekly price series for one crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceObservation {
    pub crop: String,
    #[serde(default)]
    pub name_hi: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Weekly prices, oldest first
    pub weekly_prices: Vec<Decimal>,
    /// Minimum Support Price, where the government sets one
    #[serde(default)]
    pub msp: Option<Decimal>,
}

/// Direction of a price movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl TrendDirection {
    /// Classify a percentage change against a symmetric dead-band
    pub fn classify(percent_change: Decimal, dead_band: Decimal) -> Self {
        if percent_change > dead_band {
            TrendDirection::Rising
        } else if percent_change < -dead_band {
            TrendDirection::Falling
        } else {
            TrendDirection::Stable
        }
    }
}

/// Trend of one crop's price series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTrend {
    pub crop: String,
    pub name_hi: String,
    pub unit: String,
    pub direction: TrendDirection,
    /// Change from the earliest to the latest price, rounded to 2 places
    pub percent_change: Decimal,
    pub latest_price: Option<Decimal>,
    pub msp: Option<Decimal>,
    /// Only meaningful when `msp` is present
    pub below_msp: bool,
    pub has_data: bool,
}

impl PriceObservation {
    /// Change from the earliest to the latest price in percent, unrounded.
    /// Fewer than two points is no change; `None` when the arithmetic
    /// overflows.
    pub fn percent_change(&self) -> Option<Decimal> {
        match (self.weekly_prices.first(), self.weekly_prices.last()) {
            (Some(&earliest), Some(&latest))
                if self.weekly_prices.len() >= 2 && !earliest.is_zero() =>
            {
                latest
                    .checked_sub(earliest)?
                    .checked_div(earliest)?
                    .checked_mul(Decimal::ONE_HUNDRED)
            }
            _ => Some(Decimal::ZERO),
        }
    }
}

impl PriceTrend {
    /// Analyse a price series. Fewer than two points is reported as stable,
    /// as is a series whose change cannot be represented.
    pub fn analyze(observation: &PriceObservation, dead_band: Decimal) -> Self {
        let latest = observation.weekly_prices.last().copied();
        let raw_change = observation.percent_change().unwrap_or(Decimal::ZERO);

        let below_msp = match (latest, observation.msp) {
            (Some(price), Some(msp)) => price < msp,
            _ => false,
        };

        Self {
            crop: observation.crop.clone(),
            name_hi: observation
                .name_hi
                .clone()
                .unwrap_or_else(|| observation.crop.clone()),
            unit: observation.unit.clone(),
            direction: TrendDirection::classify(raw_change, dead_band),
            percent_change: raw_change.round_dp(2),
            latest_price: latest,
            msp: observation.msp,
            below_msp,
            has_data: true,
        }
    }

    /// Placeholder entry for a crop with no price data
    pub fn no_data(crop: &str) -> Self {
        Self {
            crop: crop.to_string(),
            name_hi: crop.to_string(),
            unit: default_unit(),
            direction: TrendDirection::Stable,
            percent_change: Decimal::ZERO,
            latest_price: None,
            msp: None,
            below_msp: false,
            has_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(prices: &[i64], msp: Option<i64>) -> PriceObservation {
        PriceObservation {
            crop: "Wheat".to_string(),
            name_hi: Some("गेहूं".to_string()),
            unit: "quintal".to_string(),
            weekly_prices: prices.iter().map(|p| Decimal::from(*p)).collect(),
            msp: msp.map(Decimal::from),
        }
    }

    #[test]
    fn test_flat_series_is_stable() {
        let trend = PriceTrend::analyze(&observation(&[100, 100], None), DEFAULT_DEAD_BAND_PERCENT);
        assert_eq!(trend.percent_change, Decimal::ZERO);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_three_percent_rise() {
        let trend = PriceTrend::analyze(&observation(&[100, 103], None), DEFAULT_DEAD_BAND_PERCENT);
        assert_eq!(trend.percent_change, Decimal::from(3));
        assert_eq!(trend.direction, TrendDirection::Rising);
    }

    #[test]
    fn test_dead_band_edges() {
        let band = DEFAULT_DEAD_BAND_PERCENT;
        assert_eq!(TrendDirection::classify(Decimal::from(2), band), TrendDirection::Stable);
        assert_eq!(TrendDirection::classify(Decimal::from(-2), band), TrendDirection::Stable);
        assert_eq!(TrendDirection::classify(Decimal::new(-201, 2), band), TrendDirection::Falling);
    }

    #[test]
    fn test_uses_first_and_last_points() {
        let trend = PriceTrend::analyze(&observation(&[200, 500, 10, 190], None), DEFAULT_DEAD_BAND_PERCENT);
        assert_eq!(trend.percent_change, Decimal::from(-5));
        assert_eq!(trend.direction, TrendDirection::Falling);
    }

    #[test]
    fn test_single_point_is_stable() {
        let trend = PriceTrend::analyze(&observation(&[2100], Some(2275)), DEFAULT_DEAD_BAND_PERCENT);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.percent_change, Decimal::ZERO);
        assert!(trend.below_msp);
    }

    #[test]
    fn test_msp_comparison() {
        let below = PriceTrend::analyze(&observation(&[2300, 2200], Some(2275)), DEFAULT_DEAD_BAND_PERCENT);
        assert!(below.below_msp);

        let at_msp = PriceTrend::analyze(&observation(&[2300, 2275], Some(2275)), DEFAULT_DEAD_BAND_PERCENT);
        assert!(!at_msp.below_msp);

        let no_msp = PriceTrend::analyze(&observation(&[2300, 1000], None), DEFAULT_DEAD_BAND_PERCENT);
        assert!(!no_msp.below_msp);
        assert!(no_msp.msp.is_none());
    }

    #[test]
    fn test_overflowing_change_does_not_panic() {
        let obs = PriceObservation {
            crop: "Saffron".to_string(),
            name_hi: None,
            unit: "kg".to_string(),
            weekly_prices: vec![
                Decimal::from_str_exact("0.0000000001").unwrap(),
                Decimal::from_str_exact("79228162514264337593543950").unwrap(),
            ],
            msp: None,
        };
        assert_eq!(obs.percent_change(), None);

        let trend = PriceTrend::analyze(&obs, DEFAULT_DEAD_BAND_PERCENT);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.percent_change, Decimal::ZERO);
    }

    #[test]
    fn test_percent_change_of_short_series() {
        assert_eq!(observation(&[2100], None).percent_change(), Some(Decimal::ZERO));
        assert_eq!(observation(&[100, 150], None).percent_change(), Some(Decimal::from(50)));
    }

    #[test]
    fn test_no_data_entry() {
        let trend = PriceTrend::no_data("Saffron");
        assert!(!trend.has_data);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.crop, "Saffron");
    }

    #[test]
    fn test_observation_defaults() {
        let obs: PriceObservation =
            serde_json::from_str(r#"{"crop": "Onion", "weekly_prices": [1500, 1650.5]}"#).unwrap();
        assert_eq!(obs.unit, "quintal");
        assert!(obs.msp.is_none());
        assert_eq!(obs.weekly_prices[1], Decimal::new(16505, 1));
    }
}
