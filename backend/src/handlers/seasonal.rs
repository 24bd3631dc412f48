//! HTTP handlers for seasonal crop advisories

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use shared::{CropInfo, DeliveryRecord, Language, Season};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SeasonalAdvisoryQuery {
    /// Defaults to the current month
    pub month: Option<u32>,
    pub lang: Option<String>,
    pub send_sms: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeasonalAdvisoryResponse {
    pub success: bool,
    pub current_month: u32,
    pub season: Season,
    pub season_name: String,
    pub planting_period: String,
    pub harvesting_period: String,
    pub recommended_crops: Vec<CropInfo>,
    pub message: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_status: Option<DeliveryRecord>,
}

/// Seasonal advisory for a month
pub async fn seasonal_advisory(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SeasonalAdvisoryQuery>, AppError>,
) -> AppResult<Json<SeasonalAdvisoryResponse>> {
    let month = query.month.unwrap_or_else(|| Utc::now().month());
    let lang = Language::from_tag(query.lang.as_deref().unwrap_or_default());

    let advisory = state
        .advisory
        .seasonal_advisory(month, lang, query.send_sms.as_deref())?;

    let profile = advisory.profile;
    let season_name = match lang {
        Language::Hi => profile.name_hi,
        Language::En => profile.name,
    };

    Ok(Json(SeasonalAdvisoryResponse {
        success: true,
        current_month: advisory.month,
        season: profile.season,
        season_name,
        planting_period: profile.planting_period,
        harvesting_period: profile.harvesting_period,
        recommended_crops: profile.crops,
        message: advisory.message,
        language: advisory.language,
        sms_status: advisory.delivery,
    }))
}
