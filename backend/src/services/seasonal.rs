//! Seasonal advisory engine: cropping season and crops for a month

use std::sync::Arc;

use shared::{validate_month, Season, SeasonProfile};

use crate::error::{AppError, AppResult};
use crate::knowledge::SeasonTable;

const MONTH_ERROR_HI: &str = "महीना 1 से 12 के बीच होना चाहिए";

/// Seasonal crop advisory service
#[derive(Debug, Clone)]
pub struct SeasonalAdvisoryService {
    seasons: Arc<SeasonTable>,
}

impl SeasonalAdvisoryService {
    pub fn new(seasons: Arc<SeasonTable>) -> Self {
        Self { seasons }
    }

    /// Season profile for a month (1-12). The caller supplies the current
    /// month when the user did not ask for one.
    pub fn profile_for_month(&self, month: u32) -> AppResult<&SeasonProfile> {
        let invalid = |msg: &str| AppError::validation("month", msg, MONTH_ERROR_HI);

        validate_month(month).map_err(invalid)?;
        let season = Season::for_month(month).ok_or_else(|| invalid("Month must be between 1 and 12"))?;

        tracing::debug!(month, season = %season, "Season resolved");

        Ok(self.seasons.profile(season))
    }
}
