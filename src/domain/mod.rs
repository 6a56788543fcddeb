//! Core domain types and logic.

pub mod baseline;
pub mod classifier;
pub mod config_validation;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod execution;
pub mod ledger;
pub mod metrics;
pub mod price_series;
