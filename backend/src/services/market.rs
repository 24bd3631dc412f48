//! Price advisory engine: weekly trends, top movers and MSP checks

use std::sync::Arc;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{PriceTrend, TrendDirection, DEFAULT_DEAD_BAND_PERCENT};

use crate::config::AdvisoryConfig;
use crate::knowledge::PriceTable;

/// Trends for one price advisory request
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub last_updated: Option<String>,
    pub market: Option<String>,
    pub trends: Vec<PriceTrend>,
    pub top_gainers: Vec<PriceTrend>,
    pub top_losers: Vec<PriceTrend>,
}

impl PriceReport {
    /// Known crops whose latest price is under the support price
    pub fn below_msp(&self) -> impl Iterator<Item = &PriceTrend> {
        self.trends.iter().filter(|t| t.has_data && t.below_msp)
    }

    /// Requested crops with no price data
    pub fn missing(&self) -> impl Iterator<Item = &PriceTrend> {
        self.trends.iter().filter(|t| !t.has_data)
    }
}

/// Market price advisory service
#[derive(Debug, Clone)]
pub struct PriceAdvisoryService {
    prices: Arc<PriceTable>,
    dead_band: Decimal,
    top_movers: usize,
}

impl PriceAdvisoryService {
    pub fn new(prices: Arc<PriceTable>, dead_band: Decimal, top_movers: usize) -> Self {
        Self {
            prices,
            dead_band,
            top_movers,
        }
    }

    pub fn from_config(prices: Arc<PriceTable>, config: &AdvisoryConfig) -> Self {
        let dead_band = Decimal::from_f64(config.price_dead_band_percent)
            .filter(|band| !band.is_sign_negative())
            .unwrap_or(DEFAULT_DEAD_BAND_PERCENT);
        Self::new(prices, dead_band, config.top_movers)
    }

    /// One trend per requested crop, in request order. An empty request
    /// covers every crop in the price table.
    pub fn trends(&self, crops: &[String]) -> Vec<PriceTrend> {
        if crops.is_empty() {
            return self
                .prices
                .observations()
                .iter()
                .map(|o| PriceTrend::analyze(o, self.dead_band))
                .collect();
        }

        crops
            .iter()
            .map(|crop| match self.prices.find(crop) {
                Some(observation) => PriceTrend::analyze(observation, self.dead_band),
                None => {
                    tracing::debug!(crop = %crop, "No price data");
                    PriceTrend::no_data(crop.trim())
                }
            })
            .collect()
    }

    /// Build the full report for a request
    pub fn report(&self, crops: &[String]) -> PriceReport {
        let trends = self.trends(crops);

        let mut top_gainers: Vec<PriceTrend> = trends
            .iter()
            .filter(|t| t.has_data && t.direction == TrendDirection::Rising)
            .cloned()
            .collect();
        top_gainers.sort_by(|a, b| b.percent_change.cmp(&a.percent_change));
        top_gainers.truncate(self.top_movers);

        let mut top_losers: Vec<PriceTrend> = trends
            .iter()
            .filter(|t| t.has_data && t.direction == TrendDirection::Falling)
            .cloned()
            .collect();
        top_losers.sort_by(|a, b| a.percent_change.cmp(&b.percent_change));
        top_losers.truncate(self.top_movers);

        tracing::debug!(
            crops = trends.len(),
            gainers = top_gainers.len(),
            losers = top_losers.len(),
            "Price trends analysed"
        );

        PriceReport {
            last_updated: self.prices.last_updated.clone(),
            market: self.prices.market.clone(),
            trends,
            top_gainers,
            top_losers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(top_movers: usize) -> PriceAdvisoryService {
        let table = PriceTable::from_json(
            r#"{
                "last_updated": "2024-03-01",
                "market": "Azadpur Mandi",
                "prices": [
                    {"crop": "Wheat", "weekly_prices": [2000, 2100], "msp": 2275},
                    {"crop": "Onion", "weekly_prices": [1000, 1300]},
                    {"crop": "Tomato", "weekly_prices": [1500, 1200]},
                    {"crop": "Potato", "weekly_prices": [800, 700]},
                    {"crop": "Rice", "weekly_prices": [3000, 3010]}
                ]
            }"#,
        )
        .unwrap();
        PriceAdvisoryService::new(Arc::new(table), DEFAULT_DEAD_BAND_PERCENT, top_movers)
    }

    #[test]
    fn test_empty_request_covers_all_crops() {
        let trends = service(3).trends(&[]);
        let names: Vec<&str> = trends.iter().map(|t| t.crop.as_str()).collect();
        assert_eq!(names, vec!["Wheat", "Onion", "Tomato", "Potato", "Rice"]);
    }

    #[test]
    fn test_unknown_crop_keeps_request_order() {
        let crops = vec!["rice".to_string(), "Saffron".to_string(), "ONION".to_string()];
        let trends = service(3).trends(&crops);
        assert_eq!(trends.len(), 3);
        assert_eq!(trends[0].crop, "Rice");
        assert!(!trends[1].has_data);
        assert_eq!(trends[1].crop, "Saffron");
        assert_eq!(trends[1].direction, TrendDirection::Stable);
        assert_eq!(trends[2].crop, "Onion");
    }

    #[test]
    fn test_top_movers_are_sorted_and_capped() {
        let report = service(1).report(&[]);
        assert_eq!(report.top_gainers.len(), 1);
        assert_eq!(report.top_gainers[0].crop, "Onion");
        assert_eq!(report.top_losers.len(), 1);
        assert_eq!(report.top_losers[0].crop, "Tomato");
        assert_eq!(report.market.as_deref(), Some("Azadpur Mandi"));
    }

    #[test]
    fn test_from_config_ignores_unusable_dead_band() {
        let prices = Arc::new(PriceTable::from_json(r#"{"prices": []}"#).unwrap());
        for bad in [-5.0, f64::NAN] {
            let config = AdvisoryConfig {
                price_dead_band_percent: bad,
                ..AdvisoryConfig::default()
            };
            let service = PriceAdvisoryService::from_config(prices.clone(), &config);
            assert_eq!(service.dead_band, DEFAULT_DEAD_BAND_PERCENT);
        }
    }

    #[test]
    fn test_below_msp_listing() {
        let report = service(3).report(&[]);
        let below: Vec<&str> = report.below_msp().map(|t| t.crop.as_str()).collect();
        assert_eq!(below, vec!["Wheat"]);
    }
}
