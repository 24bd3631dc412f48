//! Business logic services

pub mod advisory;
pub mod delivery;
pub mod localization;
pub mod market;
pub mod seasonal;
pub mod weather;

pub use advisory::{AdvisoryOrchestrator, PriceAdvisory, SeasonalAdvisory, WeatherAdvisory};
pub use delivery::DeliveryTracker;
pub use localization::LocalizationTable;
pub use market::{PriceAdvisoryService, PriceReport};
pub use seasonal::SeasonalAdvisoryService;
pub use weather::WeatherAdvisoryService;
