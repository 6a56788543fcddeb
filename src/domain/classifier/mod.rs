//! Directional classifiers.
//!
//! A [`Classifier`] is an untrained configuration; `fit` consumes the train
//! prefix of an example set and yields a [`DirectionModel`] that predicts one
//! window at a time. The simulator is generic over this pair, so any binary
//! classifier can be swapped in without touching the execution loop.

pub mod logistic;
pub mod threshold;

use std::fmt;

use super::dataset::{Direction, Example};
use super::error::LatencyWarsError;

pub use logistic::{LogisticModel, LogisticRegression};
pub use threshold::{ThresholdModel, ThresholdRule};

pub trait Classifier {
    type Model: DirectionModel;

    fn name(&self) -> &'static str {
        "custom"
    }

    /// Fit on training examples. Must reject single-class input with
    /// [`LatencyWarsError::DegenerateTrainingSet`].
    fn fit(&self, train: &[Example]) -> Result<Self::Model, LatencyWarsError>;
}

pub trait DirectionModel {
    fn predict(&self, window: &[f64]) -> Result<Direction, LatencyWarsError>;
}

/// Checks a training set is non-empty, rectangular and holds both labels.
/// Returns the window width.
pub fn check_training_set(train: &[Example]) -> Result<usize, LatencyWarsError> {
    let first = train.first().ok_or(LatencyWarsError::EmptyPartition {
        partition: "train",
        examples: 0,
        split_index: 0,
    })?;
    let width = first.window.len();

    if let Some(bad) = train.iter().find(|e| e.window.len() != width) {
        return Err(LatencyWarsError::FeatureMismatch {
            expected: width,
            got: bad.window.len(),
        });
    }

    if train.iter().all(|e| e.label == first.label) {
        return Err(LatencyWarsError::DegenerateTrainingSet {
            label: first.label.label(),
        });
    }

    Ok(width)
}

pub(crate) fn check_width(expected: usize, window: &[f64]) -> Result<(), LatencyWarsError> {
    if window.len() != expected {
        return Err(LatencyWarsError::FeatureMismatch {
            expected,
            got: window.len(),
        });
    }
    Ok(())
}

/// Runtime-selected classifier, as named in configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierKind {
    Logistic(LogisticRegression),
    Threshold(ThresholdRule),
}

impl Default for ClassifierKind {
    fn default() -> Self {
        ClassifierKind::Logistic(LogisticRegression::default())
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum FittedModel {
    Logistic(LogisticModel),
    Threshold(ThresholdModel),
}

impl Classifier for ClassifierKind {
    type Model = FittedModel;

    fn name(&self) -> &'static str {
        match self {
            ClassifierKind::Logistic(c) => c.name(),
            ClassifierKind::Threshold(c) => c.name(),
        }
    }

    fn fit(&self, train: &[Example]) -> Result<FittedModel, LatencyWarsError> {
        match self {
            ClassifierKind::Logistic(c) => c.fit(train).map(FittedModel::Logistic),
            ClassifierKind::Threshold(c) => c.fit(train).map(FittedModel::Threshold),
        }
    }
}

impl DirectionModel for FittedModel {
    fn predict(&self, window: &[f64]) -> Result<Direction, LatencyWarsError> {
        match self {
            FittedModel::Logistic(m) => m.predict(window),
            FittedModel::Threshold(m) => m.predict(window),
        }
    }
}
