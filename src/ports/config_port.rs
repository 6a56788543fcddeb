//! Configuration access port.
//!
//! Adapters only expose raw values through `get_string`. The typed getters
//! are layered on top: an absent key yields `default`, a present value that
//! does not parse is a [`LatencyWarsError::ConfigInvalid`]. Range checks live
//! in `domain::config_validation`.

use crate::domain::error::LatencyWarsError;
use std::str::FromStr;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, LatencyWarsError> {
        parse_or(self.get_string(section, key), section, key, default, "an integer")
    }

    fn get_uint(&self, section: &str, key: &str, default: u64) -> Result<u64, LatencyWarsError> {
        parse_or(
            self.get_string(section, key),
            section,
            key,
            default,
            "a non-negative integer",
        )
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, LatencyWarsError> {
        let value = parse_or(self.get_string(section, key), section, key, default, "a number")?;
        if !value.is_finite() {
            return Err(not_a(section, key, &value.to_string(), "a finite number"));
        }
        Ok(value)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, LatencyWarsError> {
        let Some(raw) = self.get_string(section, key) else {
            return Ok(default);
        };
        match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(not_a(section, key, raw.trim(), "a boolean")),
        }
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    section: &str,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, LatencyWarsError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| not_a(section, key, raw.trim(), expected)),
    }
}

fn not_a(section: &str, key: &str, value: &str, expected: &str) -> LatencyWarsError {
    LatencyWarsError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("'{value}' is not {expected}"),
    }
}
