//! latency-wars: measures how execution latency erodes a directional
//! classifier's edge on tick data, against a zero-latency momentum baseline.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
