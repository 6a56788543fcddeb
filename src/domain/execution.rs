//! Latency-aware execution simulator.
//!
//! A classifier is fit on the train prefix of the example set, then every
//! test example is replayed: the prediction is made at the example's tick
//! (the decision tick) but filled at the price `latency_ticks` later (the
//! execution tick). One unit is bought on an Up prediction and sold on a
//! Down prediction. Any open position is closed at the first tick the loop
//! did not consume.

use tracing::{debug, info};

use super::classifier::{Classifier, DirectionModel, check_training_set};
use super::dataset::{Direction, build_examples, minimum_ticks};
use super::error::LatencyWarsError;
use super::ledger::{TradeLedger, TradeRecord};
use super::price_series::PriceSeries;

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub window_size: usize,
    pub train_ratio: f64,
    pub latency_ticks: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            window_size: 10,
            train_ratio: 0.7,
            latency_ticks: 100,
        }
    }
}

impl SimulationConfig {
    pub fn with_latency(&self, latency_ticks: usize) -> Self {
        SimulationConfig {
            latency_ticks,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), LatencyWarsError> {
        if self.window_size == 0 {
            return Err(LatencyWarsError::invalid_config(
                "window_size",
                "window_size must be positive",
            ));
        }
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(LatencyWarsError::invalid_config(
                "train_ratio",
                format!("train_ratio must be in (0, 1), got {}", self.train_ratio),
            ));
        }
        Ok(())
    }
}

/// Maps a test-set offset to series ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMapping {
    /// Series tick of the first test example.
    pub test_start: usize,
    pub latency: usize,
}

impl TickMapping {
    pub fn new(split_index: usize, window_size: usize, latency: usize) -> Self {
        TickMapping {
            test_start: split_index + window_size,
            latency,
        }
    }

    pub fn decision_tick(&self, offset: usize) -> usize {
        self.test_start + offset
    }

    pub fn execution_tick(&self, offset: usize) -> usize {
        self.decision_tick(offset) + self.latency
    }

    /// Number of test examples whose execution tick stays inside the test
    /// range; zero when the latency swallows the whole test set.
    pub fn trade_count(&self, test_len: usize) -> usize {
        test_len.saturating_sub(self.latency)
    }

    /// First tick not consumed by the trading loop.
    pub fn close_tick(&self, trades: usize) -> usize {
        self.test_start + trades
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub pnl: f64,
    pub ledger: TradeLedger,
    /// Position before the final forced close.
    pub final_position: i64,
    pub mapping: TickMapping,
    pub train_examples: usize,
    pub test_examples: usize,
}

/// Train `classifier` on the train prefix and replay the test suffix with
/// `config.latency_ticks` of execution delay.
pub fn simulate<C: Classifier>(
    series: &PriceSeries,
    config: &SimulationConfig,
    classifier: &C,
) -> Result<SimulationResult, LatencyWarsError> {
    config.validate()?;

    if series.len() < minimum_ticks(config.window_size) {
        return Err(LatencyWarsError::InsufficientData {
            ticks: series.len(),
            minimum: minimum_ticks(config.window_size),
        });
    }

    let examples = build_examples(series, config.window_size)?;
    let split = examples.split(config.train_ratio)?;

    if split.train.is_empty() || split.test.is_empty() {
        return Err(LatencyWarsError::EmptyPartition {
            partition: if split.train.is_empty() { "train" } else { "test" },
            examples: examples.len(),
            split_index: split.split_index,
        });
    }
    check_training_set(split.train)?;

    let model = classifier.fit(split.train)?;
    let mapping = TickMapping::new(split.split_index, config.window_size, config.latency_ticks);
    let trades = mapping.trade_count(split.test.len());

    debug!(
        train = split.train.len(),
        test = split.test.len(),
        test_start = mapping.test_start,
        latency = config.latency_ticks,
        trades,
        "replaying test set"
    );

    let mut position: i64 = 0;
    let mut cash = 0.0_f64;
    let mut ledger = TradeLedger::with_capacity(trades);

    for (offset, example) in split.test.iter().take(trades).enumerate() {
        let decision_tick = mapping.decision_tick(offset);
        let execution_tick = mapping.execution_tick(offset);
        debug_assert_eq!(example.tick, decision_tick);

        let direction = model.predict(&example.window)?;
        let predict_price = series.price_at(decision_tick)?;
        let exec_price = series.price_at(execution_tick)?;

        match direction {
            Direction::Up => {
                cash -= exec_price;
                position += 1;
            }
            Direction::Down => {
                cash += exec_price;
                position -= 1;
            }
        }

        ledger.push(TradeRecord {
            execution_tick,
            decision_tick,
            direction,
            predict_price,
            exec_price,
            position,
        });
    }

    let final_position = position;
    if let Some(close_price) = series.get(mapping.close_tick(trades)) {
        cash += position as f64 * close_price;
    }

    info!(
        latency = config.latency_ticks,
        trades = ledger.len(),
        pnl = cash,
        "simulation complete"
    );

    Ok(SimulationResult {
        pnl: cash,
        ledger,
        final_position,
        mapping,
        train_examples: split.train.len(),
        test_examples: split.test.len(),
    })
}
