//! HTTP handlers for market price advisories

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use shared::{DeliveryRecord, Language, PriceTrend};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PriceAdvisoryQuery {
    /// Comma-separated crop names; empty means every crop
    pub crops: Option<String>,
    pub lang: Option<String>,
    pub send_sms: Option<String>,
}

impl PriceAdvisoryQuery {
    fn crop_list(&self) -> Vec<String> {
        self.crops
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PriceAdvisoryResponse {
    pub success: bool,
    pub last_updated: Option<String>,
    pub market: Option<String>,
    pub total_crops: usize,
    pub top_gainers: Vec<PriceTrend>,
    pub top_losers: Vec<PriceTrend>,
    pub all_prices: Vec<PriceTrend>,
    pub message: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_status: Option<DeliveryRecord>,
}

/// Weekly price trends for the requested crops
pub async fn price_advisory(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PriceAdvisoryQuery>, AppError>,
) -> AppResult<Json<PriceAdvisoryResponse>> {
    let lang = Language::from_tag(query.lang.as_deref().unwrap_or_default());

    let advisory = state
        .advisory
        .price_advisory(&query.crop_list(), lang, query.send_sms.as_deref())?;

    let report = advisory.report;

    Ok(Json(PriceAdvisoryResponse {
        success: true,
        last_updated: report.last_updated,
        market: report.market,
        total_crops: report.trends.len(),
        top_gainers: report.top_gainers,
        top_losers: report.top_losers,
        all_prices: report.trends,
        message: advisory.message,
        language: advisory.language,
        sms_status: advisory.delivery,
    }))
}
