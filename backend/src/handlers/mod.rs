//! HTTP request handlers

pub mod health;
pub mod price;
pub mod seasonal;
pub mod sms;
pub mod weather;

pub use health::{health_check, root};
pub use price::price_advisory;
pub use seasonal::seasonal_advisory;
pub use sms::{get_sms, send_sms, sms_history};
pub use weather::{current_weather, get_weather_advisory, post_weather_advisory};
