//! Knowledge base loading
//!
//! The season, price, template and pincode tables are JSON files read once at
//! startup. Each is deserialized into a typed table and validated eagerly;
//! any problem is a configuration error and the server refuses to start.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use shared::{CropInfo, PriceObservation, Season, SeasonProfile};

use crate::error::{AppError, AppResult};
use crate::services::localization::LocalizationTable;

pub const SEASONS_FILE: &str = "seasonal_crops.json";
pub const PRICES_FILE: &str = "market_prices.json";
pub const TEMPLATES_FILE: &str = "localization.json";
pub const PINCODES_FILE: &str = "pincode_mapping.json";

// ============================================================================
// Season Table
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeasonFile {
    kharif: SeasonEntry,
    rabi: SeasonEntry,
    zaid: SeasonEntry,
}

#[derive(Debug, Deserialize)]
struct SeasonEntry {
    name: String,
    name_hi: String,
    planting_period: String,
    harvesting_period: String,
    crops: Vec<CropInfo>,
}

impl SeasonEntry {
    fn into_profile(self, season: Season) -> AppResult<SeasonProfile> {
        if self.crops.is_empty() {
            return Err(AppError::Configuration(format!(
                "season '{}' has no recommended crops",
                season.key()
            )));
        }
        if self.crops.iter().any(|c| c.name.trim().is_empty()) {
            return Err(AppError::Configuration(format!(
                "season '{}' has a crop without a name",
                season.key()
            )));
        }
        Ok(SeasonProfile {
            season,
            name: self.name,
            name_hi: self.name_hi,
            planting_period: self.planting_period,
            harvesting_period: self.harvesting_period,
            crops: self.crops,
        })
    }
}

/// Season profiles for all three seasons
#[derive(Debug, Clone)]
pub struct SeasonTable {
    kharif: SeasonProfile,
    rabi: SeasonProfile,
    zaid: SeasonProfile,
}

impl SeasonTable {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let file: SeasonFile = serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("{}: {}", SEASONS_FILE, e)))?;

        Ok(Self {
            kharif: file.kharif.into_profile(Season::Kharif)?,
            rabi: file.rabi.into_profile(Season::Rabi)?,
            zaid: file.zaid.into_profile(Season::Zaid)?,
        })
    }

    pub fn profile(&self, season: Season) -> &SeasonProfile {
        match season {
            Season::Kharif => &self.kharif,
            Season::Rabi => &self.rabi,
            Season::Zaid => &self.zaid,
        }
    }
}

// ============================================================================
// Price Table
// ============================================================================

#[derive(Debug, Deserialize)]
struct PriceFile {
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    market: Option<String>,
    prices: Vec<PriceObservation>,
}

/// Weekly price series per crop, in knowledge-base order
#[derive(Debug, Clone)]
pub struct PriceTable {
    pub last_updated: Option<String>,
    pub market: Option<String>,
    observations: Vec<PriceObservation>,
}

impl PriceTable {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let file: PriceFile = serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("{}: {}", PRICES_FILE, e)))?;

        let mut seen = HashSet::new();
        for observation in &file.prices {
            let key = crop_key(&observation.crop);
            if key.is_empty() {
                return Err(AppError::Configuration(format!(
                    "{}: crop name cannot be empty",
                    PRICES_FILE
                )));
            }
            if !seen.insert(key) {
                return Err(AppError::Configuration(format!(
                    "{}: duplicate crop '{}'",
                    PRICES_FILE, observation.crop
                )));
            }
            if observation.weekly_prices.is_empty() {
                return Err(AppError::Configuration(format!(
                    "{}: no weekly prices for '{}'",
                    PRICES_FILE, observation.crop
                )));
            }
            if observation.weekly_prices.iter().any(|p| p.is_sign_negative() || p.is_zero()) {
                return Err(AppError::Configuration(format!(
                    "{}: prices for '{}' must be positive",
                    PRICES_FILE, observation.crop
                )));
            }
            if observation.msp.is_some_and(|msp| msp.is_sign_negative() || msp.is_zero()) {
                return Err(AppError::Configuration(format!(
                    "{}: MSP for '{}' must be positive",
                    PRICES_FILE, observation.crop
                )));
            }
            if observation.percent_change().is_none() {
                return Err(AppError::Configuration(format!(
                    "{}: price change for '{}' is out of range",
                    PRICES_FILE, observation.crop
                )));
            }
        }

        Ok(Self {
            last_updated: file.last_updated,
            market: file.market,
            observations: file.prices,
        })
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// Case-insensitive lookup by crop name
    pub fn find(&self, crop: &str) -> Option<&PriceObservation> {
        let wanted = crop_key(crop);
        self.observations.iter().find(|o| crop_key(&o.crop) == wanted)
    }
}

/// Crop names compare trimmed and lowercased
fn crop_key(crop: &str) -> String {
    crop.trim().to_lowercase()
}

// ============================================================================
// Knowledge Base
// ============================================================================

/// All read-only tables loaded at startup
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub seasons: SeasonTable,
    pub prices: PriceTable,
    pub templates: LocalizationTable,
    pub pincodes: HashMap<String, String>,
}

impl KnowledgeBase {
    /// Load every table from `data_dir`. The pincode mapping is optional.
    pub fn load(data_dir: &Path) -> AppResult<Self> {
        tracing::info!("Loading knowledge base from {}", data_dir.display());

        let seasons = SeasonTable::from_json(&read_required(data_dir, SEASONS_FILE)?)?;
        let prices = PriceTable::from_json(&read_required(data_dir, PRICES_FILE)?)?;
        let templates = LocalizationTable::from_json(&read_required(data_dir, TEMPLATES_FILE)?)?;
        templates.ensure_required_keys()?;

        let pincode_path = data_dir.join(PINCODES_FILE);
        let pincodes = if pincode_path.exists() {
            let json = read_required(data_dir, PINCODES_FILE)?;
            serde_json::from_str(&json)
                .map_err(|e| AppError::Configuration(format!("{}: {}", PINCODES_FILE, e)))?
        } else {
            tracing::warn!("{} not found, pincode lookup disabled", PINCODES_FILE);
            HashMap::new()
        };

        tracing::info!(
            crops = prices.observations().len(),
            templates = templates.len(),
            pincodes = pincodes.len(),
            "Knowledge base loaded"
        );

        Ok(Self {
            seasons,
            prices,
            templates,
            pincodes,
        })
    }
}

fn read_required(data_dir: &Path, file: &str) -> AppResult<String> {
    let path = data_dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| AppError::Configuration(format!("cannot read {}: {}", path.display(), e)))
}
