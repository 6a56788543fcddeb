//! Domain error types.

/// Top-level error type for latency-wars.
#[derive(Debug, thiserror::Error)]
pub enum LatencyWarsError {
    #[error("insufficient data: have {ticks} ticks, need at least {minimum}")]
    InsufficientData { ticks: usize, minimum: usize },

    #[error("empty {partition} set: {examples} examples split at index {split_index}")]
    EmptyPartition {
        partition: &'static str,
        examples: usize,
        split_index: usize,
    },

    #[error("degenerate training set: every example is labelled {label}")]
    DegenerateTrainingSet { label: u8 },

    #[error("invalid configuration {key}: {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error("tick {tick} is outside a series of {len} ticks")]
    IndexOutOfBounds { tick: usize, len: usize },

    #[error("feature mismatch: model expects windows of {expected}, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("invalid price at tick {tick}: {value}")]
    InvalidPrice { tick: usize, value: f64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LatencyWarsError {
    pub(crate) fn invalid_config(key: &str, reason: impl Into<String>) -> Self {
        LatencyWarsError::InvalidConfiguration {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&LatencyWarsError> for std::process::ExitCode {
    fn from(err: &LatencyWarsError) -> Self {
        let code: u8 = match err {
            LatencyWarsError::Io(_) | LatencyWarsError::Report { .. } => 1,
            LatencyWarsError::ConfigParse { .. }
            | LatencyWarsError::ConfigMissing { .. }
            | LatencyWarsError::ConfigInvalid { .. }
            | LatencyWarsError::InvalidConfiguration { .. } => 2,
            LatencyWarsError::Data { .. } | LatencyWarsError::InvalidPrice { .. } => 3,
            LatencyWarsError::DegenerateTrainingSet { .. }
            | LatencyWarsError::FeatureMismatch { .. }
            | LatencyWarsError::IndexOutOfBounds { .. } => 4,
            LatencyWarsError::InsufficientData { .. } | LatencyWarsError::EmptyPartition { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
