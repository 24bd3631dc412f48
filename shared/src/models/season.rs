//! Indian cropping seasons and seasonal crop profiles

use serde::{Deserialize, Serialize};

/// Agricultural cropping season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon season, June to October
    Kharif,
    /// Winter season, November to March
    Rabi,
    /// Summer season, April to May
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    /// Month partition of the calendar year. Returns `None` outside 1-12.
    pub fn for_month(month: u32) -> Option<Season> {
        match month {
            6..=10 => Some(Season::Kharif),
            11 | 12 | 1..=3 => Some(Season::Rabi),
            4 | 5 => Some(Season::Zaid),
            _ => None,
        }
    }

    /// Months belonging to this season, in calendar order of the season
    pub fn months(&self) -> &'static [u32] {
        match self {
            Season::Kharif => &[6, 7, 8, 9, 10],
            Season::Rabi => &[11, 12, 1, 2, 3],
            Season::Zaid => &[4, 5],
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Kharif => write!(f, "KHARIF"),
            Season::Rabi => write!(f, "RABI"),
            Season::Zaid => write!(f, "ZAID"),
        }
    }
}

/// A crop recommended for a season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropInfo {
    pub name: String,
    pub name_hi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_requirement: Option<String>,
}

/// Season with its recommended crops, in recommendation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonProfile {
    pub season: Season,
    pub name: String,
    pub name_hi: String,
    pub planting_period: String,
    pub harvesting_period: String,
    pub crops: Vec<CropInfo>,
}

impl SeasonProfile {
    pub fn crop_names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.name.as_str()).collect()
    }
}
