//! Configuration validation and loading.
//!
//! Validates every config field before a run starts, then builds the typed
//! configs the simulator and sweep consume.

use crate::domain::classifier::{ClassifierKind, LogisticRegression, ThresholdRule};
use crate::domain::error::LatencyWarsError;
use crate::domain::evaluation::DEFAULT_LATENCIES;
use crate::domain::execution::SimulationConfig;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    validate_window_size(config)?;
    validate_train_ratio(config)?;
    validate_latency(config)?;
    Ok(())
}

pub fn validate_classifier_config(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    validate_classifier_kind(config)?;
    validate_max_iter(config)?;
    validate_positive(config, "classifier", "learning_rate", 0.1)?;
    validate_positive(config, "classifier", "c", 1.0)?;
    if config.get_double("classifier", "tolerance", 1e-6)? < 0.0 {
        return Err(invalid("classifier", "tolerance", "tolerance must be non-negative"));
    }
    Ok(())
}

pub fn validate_evaluation_config(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    if let Some(raw) = config.get_string("evaluation", "latencies") {
        parse_latencies(&raw)?;
    }
    get_count(config, "evaluation", "export_latency", 0)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    let synthetic = config.get_bool("data", "synthetic", false)?;
    let has_csv = config
        .get_string("data", "csv_path")
        .is_some_and(|p| !p.trim().is_empty());
    if !synthetic && !has_csv {
        return Err(LatencyWarsError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_path".to_string(),
        });
    }
    if synthetic {
        if get_count(config, "data", "num_ticks", 10_000)? < 1 {
            return Err(invalid("data", "num_ticks", "num_ticks must be at least 1"));
        }
        validate_positive(config, "data", "start_price", 100.0)?;
        if config.get_double("data", "volatility", 0.1)? < 0.0 {
            return Err(invalid("data", "volatility", "volatility must be non-negative"));
        }
        config.get_uint("data", "seed", 90)?;
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> LatencyWarsError {
    LatencyWarsError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Reads a non-negative count such as a tick or iteration number.
pub fn get_count(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, LatencyWarsError> {
    let value = config.get_uint(section, key, default as u64)?;
    usize::try_from(value).map_err(|_| invalid(section, key, &format!("{value} is too large")))
}

fn validate_positive(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<(), LatencyWarsError> {
    if !(config.get_double(section, key, default)? > 0.0) {
        return Err(invalid(section, key, &format!("{key} must be positive")));
    }
    Ok(())
}

fn validate_window_size(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    if get_count(config, "simulation", "window_size", 10)? < 1 {
        return Err(invalid(
            "simulation",
            "window_size",
            "window_size must be a positive integer",
        ));
    }
    Ok(())
}

fn validate_train_ratio(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    let value = config.get_double("simulation", "train_ratio", 0.7)?;
    if !(value > 0.0 && value < 1.0) {
        return Err(invalid(
            "simulation",
            "train_ratio",
            "train_ratio must be between 0 and 1 (exclusive)",
        ));
    }
    Ok(())
}

fn validate_latency(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    get_count(config, "simulation", "latency_ticks", 100)?;
    Ok(())
}

fn validate_classifier_kind(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    match config.get_string("classifier", "kind") {
        None => Ok(()),
        Some(kind) => match kind.trim().to_lowercase().as_str() {
            "logistic" | "threshold" => Ok(()),
            other => Err(invalid(
                "classifier",
                "kind",
                &format!("unknown classifier '{other}' (expected logistic or threshold)"),
            )),
        },
    }
}

fn validate_max_iter(config: &dyn ConfigPort) -> Result<(), LatencyWarsError> {
    if get_count(config, "classifier", "max_iter", 500)? < 1 {
        return Err(invalid("classifier", "max_iter", "max_iter must be at least 1"));
    }
    Ok(())
}

/// Parse a comma-separated latency list such as `1, 5, 10`.
pub fn parse_latencies(raw: &str) -> Result<Vec<usize>, LatencyWarsError> {
    let latencies = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>().map_err(|_| {
                invalid(
                    "evaluation",
                    "latencies",
                    &format!("'{s}' is not a non-negative integer"),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if latencies.is_empty() {
        return Err(invalid(
            "evaluation",
            "latencies",
            "at least one latency is required",
        ));
    }
    Ok(latencies)
}

pub fn build_simulation_config(config: &dyn ConfigPort) -> Result<SimulationConfig, LatencyWarsError> {
    validate_simulation_config(config)?;
    let defaults = SimulationConfig::default();
    Ok(SimulationConfig {
        window_size: get_count(config, "simulation", "window_size", defaults.window_size)?,
        train_ratio: config.get_double("simulation", "train_ratio", defaults.train_ratio)?,
        latency_ticks: get_count(config, "simulation", "latency_ticks", defaults.latency_ticks)?,
    })
}

pub fn build_classifier(config: &dyn ConfigPort) -> Result<ClassifierKind, LatencyWarsError> {
    validate_classifier_config(config)?;
    let kind = config
        .get_string("classifier", "kind")
        .map(|k| k.trim().to_lowercase())
        .unwrap_or_else(|| "logistic".to_string());

    if kind == "threshold" {
        return Ok(ClassifierKind::Threshold(ThresholdRule));
    }

    let defaults = LogisticRegression::default();
    Ok(ClassifierKind::Logistic(LogisticRegression {
        max_iter: get_count(config, "classifier", "max_iter", defaults.max_iter)?,
        tolerance: config.get_double("classifier", "tolerance", defaults.tolerance)?,
        learning_rate: config.get_double("classifier", "learning_rate", defaults.learning_rate)?,
        c: config.get_double("classifier", "c", defaults.c)?,
    }))
}

pub fn build_latencies(config: &dyn ConfigPort) -> Result<Vec<usize>, LatencyWarsError> {
    match config.get_string("evaluation", "latencies") {
        Some(raw) => parse_latencies(&raw),
        None => Ok(DEFAULT_LATENCIES.to_vec()),
    }
}
