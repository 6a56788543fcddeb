//! L2-regularised logistic regression fit by full-batch gradient descent.
//!
//! Features are standardised column-wise before fitting; the fitted model
//! keeps the column means and scales and applies them at prediction time.
//! Weights start at zero and the optimiser draws no random numbers, so a
//! given training set always yields the same model.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use super::{Classifier, DirectionModel, check_training_set, check_width};
use crate::domain::dataset::{Direction, Example};
use crate::domain::error::LatencyWarsError;

/// Training hyperparameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    pub max_iter: usize,
    /// Stop once the largest parameter update falls below this.
    pub tolerance: f64,
    pub learning_rate: f64,
    /// Inverse regularisation strength; penalty is `|w|^2 / (2 * c * n)`.
    pub c: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        LogisticRegression {
            max_iter: 500,
            tolerance: 1e-6,
            learning_rate: 0.1,
            c: 1.0,
        }
    }
}

impl LogisticRegression {
    pub fn with_max_iter(max_iter: usize) -> Self {
        LogisticRegression {
            max_iter,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), LatencyWarsError> {
        if self.max_iter == 0 {
            return Err(LatencyWarsError::invalid_config(
                "max_iter",
                "max_iter must be at least 1",
            ));
        }
        if !(self.learning_rate > 0.0) {
            return Err(LatencyWarsError::invalid_config(
                "learning_rate",
                "learning_rate must be positive",
            ));
        }
        if !(self.c > 0.0) {
            return Err(LatencyWarsError::invalid_config("c", "c must be positive"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(LatencyWarsError::invalid_config(
                "tolerance",
                "tolerance must be non-negative",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    pub weights: Array1<f64>,
    pub intercept: f64,
    means: Array1<f64>,
    scales: Array1<f64>,
    pub iterations: usize,
    pub converged: bool,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp_z = z.exp();
        exp_z / (1.0 + exp_z)
    }
}

impl Classifier for LogisticRegression {
    type Model = LogisticModel;

    fn name(&self) -> &'static str {
        "logistic"
    }

    fn fit(&self, train: &[Example]) -> Result<LogisticModel, LatencyWarsError> {
        self.validate()?;
        let width = check_training_set(train)?;
        let n = train.len();

        let flat: Vec<f64> = train.iter().flat_map(|e| e.window.iter().copied()).collect();
        let raw = Array2::from_shape_vec((n, width), flat).map_err(|_| {
            LatencyWarsError::FeatureMismatch {
                expected: width,
                got: train[0].window.len(),
            }
        })?;
        let y: Array1<f64> = train.iter().map(|e| f64::from(e.label.label())).collect();

        let means = raw
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(width));
        let scales = raw
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });
        let x = (&raw - &means) / &scales;

        let n_samples = n as f64;
        let alpha = 1.0 / (self.c * n_samples);
        let mut weights = Array1::<f64>::zeros(width);
        let mut intercept = 0.0;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            iterations += 1;

            let predictions = (x.dot(&weights) + intercept).mapv(sigmoid);
            let errors = &predictions - &y;
            let dw = x.t().dot(&errors) / n_samples + &weights * alpha;
            let db = errors.sum() / n_samples;

            let step_w = &dw * self.learning_rate;
            let step_b = db * self.learning_rate;
            weights -= &step_w;
            intercept -= step_b;

            let largest = step_w
                .iter()
                .fold(step_b.abs(), |acc, s| acc.max(s.abs()));
            if largest < self.tolerance {
                converged = true;
                break;
            }
        }

        debug!(
            examples = n,
            features = width,
            iterations,
            converged,
            "fitted logistic regression"
        );

        Ok(LogisticModel {
            weights,
            intercept,
            means,
            scales,
            iterations,
            converged,
        })
    }
}

impl LogisticModel {
    /// Probability that the next move is up.
    pub fn probability_up(&self, window: &[f64]) -> Result<f64, LatencyWarsError> {
        check_width(self.weights.len(), window)?;
        let z = window
            .iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .zip(self.weights.iter())
            .map(|((&v, (&m, &s)), &w)| w * (v - m) / s)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(z))
    }
}

impl DirectionModel for LogisticModel {
    fn predict(&self, window: &[f64]) -> Result<Direction, LatencyWarsError> {
        if self.probability_up(window)? > 0.5 {
            Ok(Direction::Up)
        } else {
            Ok(Direction::Down)
        }
    }
}
