#![allow(dead_code)]

use latency_wars::domain::classifier::{Classifier, DirectionModel, check_training_set};
use latency_wars::domain::dataset::{Direction, Example};
use latency_wars::domain::error::LatencyWarsError;
use latency_wars::domain::price_series::PriceSeries;
use latency_wars::ports::data_port::PriceDataPort;
use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct MockPriceDataPort {
    pub prices: Vec<f64>,
    pub error: Option<String>,
    pub loads: Cell<usize>,
}

impl MockPriceDataPort {
    pub fn new(prices: Vec<f64>) -> Self {
        Self {
            prices,
            error: None,
            loads: Cell::new(0),
        }
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn load_prices(&self) -> Result<PriceSeries, LatencyWarsError> {
        self.loads.set(self.loads.get() + 1);
        if let Some(reason) = &self.error {
            return Err(LatencyWarsError::Data {
                reason: reason.clone(),
            });
        }
        PriceSeries::new(self.prices.clone())
    }
}

/// Predicts the same direction for every window.
pub struct FixedClassifier(pub Direction);

pub struct FixedModel(pub Direction);

impl Classifier for FixedClassifier {
    type Model = FixedModel;

    fn fit(&self, train: &[Example]) -> Result<FixedModel, LatencyWarsError> {
        check_training_set(train)?;
        Ok(FixedModel(self.0))
    }
}

impl DirectionModel for FixedModel {
    fn predict(&self, _window: &[f64]) -> Result<Direction, LatencyWarsError> {
        Ok(self.0)
    }
}

pub fn series(prices: &[f64]) -> PriceSeries {
    PriceSeries::new(prices.to_vec()).unwrap()
}

/// Ten ticks with a hand-checked train/test layout at window 2, ratio 0.5:
/// examples at ticks 2..=8, split index 3, test ticks 5..=8.
pub fn ten_ticks() -> PriceSeries {
    series(&[10.0, 11.0, 12.0, 11.0, 13.0, 12.0, 14.0, 15.0, 13.0, 16.0])
}

/// Deterministic jagged walk with both up and down moves.
pub fn jagged_walk(n: usize) -> PriceSeries {
    let mut price = 100.0;
    let prices = (0..n)
        .map(|i| {
            price += ((i * 37 + 11) % 17) as f64 / 20.0 - 0.4;
            price
        })
        .collect();
    PriceSeries::new(prices).unwrap()
}

pub fn write_price_csv(dir: &Path, name: &str, prices: &[f64]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from("timestamp,price\n");
    for (i, p) in prices.iter().enumerate() {
        content.push_str(&format!("{i},{p}\n"));
    }
    std::fs::write(&path, content).unwrap();
    path
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
