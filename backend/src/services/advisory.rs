//! Advisory orchestration
//!
//! Runs an engine, renders its result through the localization table and,
//! when a phone number is given, hands the text to the delivery tracker in
//! the same language. No advisory decisions are made here.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    CropInfo, DeliveryRecord, IrrigationDecision, Language, PriceTrend, SeasonProfile,
    WeatherReading,
};

use crate::config::AdvisoryConfig;
use crate::error::AppResult;
use crate::knowledge::{PriceTable, SeasonTable};
use crate::services::delivery::DeliveryTracker;
use crate::services::localization::LocalizationTable;
use crate::services::market::{PriceAdvisoryService, PriceReport};
use crate::services::seasonal::SeasonalAdvisoryService;
use crate::services::weather::WeatherAdvisoryService;

/// Crops listed in a seasonal message
const SEASON_MESSAGE_CROPS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct WeatherAdvisory {
    pub decision: IrrigationDecision,
    pub message: String,
    pub language: Language,
    pub delivery: Option<DeliveryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonalAdvisory {
    pub month: u32,
    pub profile: SeasonProfile,
    pub message: String,
    pub language: Language,
    pub delivery: Option<DeliveryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceAdvisory {
    pub report: PriceReport,
    pub message: String,
    pub language: Language,
    pub delivery: Option<DeliveryRecord>,
}

/// Entry point for all advisories
#[derive(Debug)]
pub struct AdvisoryOrchestrator {
    weather: WeatherAdvisoryService,
    seasonal: SeasonalAdvisoryService,
    market: PriceAdvisoryService,
    templates: LocalizationTable,
    delivery: Arc<DeliveryTracker>,
}

impl AdvisoryOrchestrator {
    pub fn new(
        seasons: SeasonTable,
        prices: PriceTable,
        templates: LocalizationTable,
        config: &AdvisoryConfig,
        delivery: Arc<DeliveryTracker>,
    ) -> Self {
        Self {
            weather: WeatherAdvisoryService::from_config(config),
            seasonal: SeasonalAdvisoryService::new(Arc::new(seasons)),
            market: PriceAdvisoryService::from_config(Arc::new(prices), config),
            templates,
            delivery,
        }
    }

    pub fn weather(&self) -> &WeatherAdvisoryService {
        &self.weather
    }

    pub fn delivery(&self) -> &DeliveryTracker {
        &self.delivery
    }

    // ========================================================================
    // Weather
    // ========================================================================

    pub fn weather_advisory(
        &self,
        reading: &WeatherReading,
        lang: Language,
        send_to: Option<&str>,
    ) -> AppResult<WeatherAdvisory> {
        let decision = self.weather.evaluate(reading)?;

        let location = if reading.location.trim().is_empty() {
            match lang {
                Language::Hi => "आपके क्षेत्र",
                Language::En => "your area",
            }
        } else {
            reading.location.trim()
        };
        let temperature = format!("{:.1}", reading.temperature_c);
        let rainfall = format!("{:.1}", reading.rainfall_mm);

        let message = self.templates.render(
            decision.action.message_key(),
            lang,
            &[
                ("location", location),
                ("temperature", temperature.as_str()),
                ("rainfall", rainfall.as_str()),
            ],
        )?;

        let delivery = self.deliver(send_to, &message, lang)?;

        Ok(WeatherAdvisory {
            decision,
            message,
            language: lang,
            delivery,
        })
    }

    // ========================================================================
    // Seasonal
    // ========================================================================

    pub fn seasonal_advisory(
        &self,
        month: u32,
        lang: Language,
        send_to: Option<&str>,
    ) -> AppResult<SeasonalAdvisory> {
        let profile = self.seasonal.profile_for_month(month)?;

        let season = match lang {
            Language::Hi => profile.name_hi.as_str(),
            Language::En => profile.name.as_str(),
        };
        let crops = profile
            .crops
            .iter()
            .take(SEASON_MESSAGE_CROPS)
            .map(|c| crop_label(c, lang))
            .collect::<Vec<_>>()
            .join(", ");

        let message = self.templates.render(
            "season.advisory",
            lang,
            &[
                ("season", season),
                ("planting", profile.planting_period.as_str()),
                ("harvesting", profile.harvesting_period.as_str()),
                ("crops", crops.as_str()),
            ],
        )?;

        let delivery = self.deliver(send_to, &message, lang)?;

        Ok(SeasonalAdvisory {
            month,
            profile: profile.clone(),
            message,
            language: lang,
            delivery,
        })
    }

    // ========================================================================
    // Prices
    // ========================================================================

    pub fn price_advisory(
        &self,
        crops: &[String],
        lang: Language,
        send_to: Option<&str>,
    ) -> AppResult<PriceAdvisory> {
        let report = self.market.report(crops);
        let message = self.render_prices(&report, lang)?;
        let delivery = self.deliver(send_to, &message, lang)?;

        Ok(PriceAdvisory {
            report,
            message,
            language: lang,
            delivery,
        })
    }

    fn render_prices(&self, report: &PriceReport, lang: Language) -> AppResult<String> {
        let mut sections = vec![self.templates.render("price.header", lang, &[])?];

        if !report.top_gainers.is_empty() {
            sections.push(self.trend_section(Some("price.rising_title"), &report.top_gainers, lang)?);
        }
        if !report.top_losers.is_empty() {
            sections.push(self.trend_section(Some("price.falling_title"), &report.top_losers, lang)?);
        }
        if report.top_gainers.is_empty() && report.top_losers.is_empty() {
            let steady: Vec<PriceTrend> = report.trends.iter().filter(|t| t.has_data).cloned().collect();
            if !steady.is_empty() {
                sections.push(self.trend_section(None, &steady, lang)?);
            }
        }

        let below = join_names(report.below_msp(), lang);
        if !below.is_empty() {
            sections.push(self.templates.render("price.below_msp", lang, &[("crops", below.as_str())])?);
        }

        let missing = join_names(report.missing(), lang);
        if !missing.is_empty() {
            sections.push(self.templates.render("price.no_data", lang, &[("crops", missing.as_str())])?);
        }

        sections.push(self.templates.render("price.tip", lang, &[])?);

        Ok(sections.join("\n\n"))
    }

    fn trend_section(
        &self,
        title_key: Option<&str>,
        trends: &[PriceTrend],
        lang: Language,
    ) -> AppResult<String> {
        let mut lines = Vec::with_capacity(trends.len() + 1);
        if let Some(key) = title_key {
            lines.push(self.templates.render(key, lang, &[])?);
        }
        for trend in trends {
            let price = trend.latest_price.map(|p| p.to_string()).unwrap_or_default();
            let change = signed_percent(trend.percent_change);
            lines.push(self.templates.render(
                "price.trend_item",
                lang,
                &[
                    ("crop", trend_label(trend, lang)),
                    ("price", price.as_str()),
                    ("unit", trend.unit.as_str()),
                    ("change", change.as_str()),
                ],
            )?);
        }
        Ok(lines.join("\n"))
    }

    // ========================================================================
    // Delivery
    // ========================================================================

    pub fn send_sms(&self, phone: &str, message: &str, lang: Language) -> AppResult<DeliveryRecord> {
        self.delivery.send(phone, message, lang)
    }

    fn deliver(
        &self,
        send_to: Option<&str>,
        message: &str,
        lang: Language,
    ) -> AppResult<Option<DeliveryRecord>> {
        match send_to.map(str::trim).filter(|p| !p.is_empty()) {
            Some(phone) => self.delivery.send(phone, message, lang).map(Some),
            None => Ok(None),
        }
    }
}

fn crop_label(crop: &CropInfo, lang: Language) -> &str {
    match lang {
        Language::Hi => crop.name_hi.as_str(),
        Language::En => crop.name.as_str(),
    }
}

fn trend_label(trend: &PriceTrend, lang: Language) -> &str {
    match lang {
        Language::Hi => trend.name_hi.as_str(),
        Language::En => trend.crop.as_str(),
    }
}

fn join_names<'a>(trends: impl Iterator<Item = &'a PriceTrend>, lang: Language) -> String {
    trends
        .map(|t| trend_label(t, lang))
        .collect::<Vec<_>>()
        .join(", ")
}

fn signed_percent(value: Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
