//! Shared types and models for the Agriculture Advisory Platform
//!
//! This crate contains the domain types and the pure decision rules used by
//! the backend: irrigation rules, the cropping-season calendar, price trend
//! classification and delivery records. Nothing here performs I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
