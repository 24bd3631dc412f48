//! Domain models for the Agriculture Advisory Platform

mod delivery;
mod price;
mod season;
mod weather;

pub use delivery::*;
pub use price::*;
pub use season::*;
pub use weather::*;
