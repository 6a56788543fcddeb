//! Latency sweep: the baseline once, the simulator once per latency.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::baseline::momentum_baseline;
use super::classifier::Classifier;
use super::error::LatencyWarsError;
use super::execution::{SimulationConfig, simulate};
use super::ledger::TradeLedger;
use super::metrics::TradeStats;
use super::price_series::PriceSeries;

pub const DEFAULT_LATENCIES: [usize; 16] = [
    1, 5, 10, 20, 50, 100, 150, 200, 300, 400, 500, 600, 700, 800, 900, 1000,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyResult {
    pub latency: usize,
    pub pnl: f64,
    pub stats: TradeStats,
    #[serde(skip)]
    pub ledger: TradeLedger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub baseline_pnl: f64,
    pub classifier: String,
    pub window_size: usize,
    pub train_ratio: f64,
    pub rows: Vec<LatencyResult>,
}

impl EvaluationReport {
    pub fn row(&self, latency: usize) -> Option<&LatencyResult> {
        self.rows.iter().find(|r| r.latency == latency)
    }

    /// Row with the highest PnL; ties keep the lowest latency.
    pub fn best(&self) -> Option<&LatencyResult> {
        self.rows
            .iter()
            .fold(None, |best: Option<&LatencyResult>, row| match best {
                Some(b) if b.pnl >= row.pnl => Some(b),
                _ => Some(row),
            })
    }
}

/// Runs a simulation per latency, each with its own freshly fit model.
///
/// The series is shared read-only; runs are independent, so they are
/// spread over the rayon pool unless parallelism is turned off. Rows come
/// back in the order the latencies were given either way, and a failing
/// sweep reports the error of the earliest failing latency.
pub struct LatencySweep<'a, C> {
    series: &'a PriceSeries,
    config: SimulationConfig,
    classifier: &'a C,
    parallel: bool,
}

impl<'a, C> LatencySweep<'a, C>
where
    C: Classifier + Sync,
{
    pub fn new(series: &'a PriceSeries, config: SimulationConfig, classifier: &'a C) -> Self {
        LatencySweep {
            series,
            config,
            classifier,
            parallel: true,
        }
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run(&self, latencies: &[usize]) -> Result<EvaluationReport, LatencyWarsError> {
        self.config.validate()?;

        let baseline_pnl = momentum_baseline(self.series);
        info!(pnl = baseline_pnl, "baseline complete");

        let rows = self.for_each_latency(latencies, |latency| self.run_one(latency))?;

        Ok(EvaluationReport {
            baseline_pnl,
            classifier: self.classifier.name().to_string(),
            window_size: self.config.window_size,
            train_ratio: self.config.train_ratio,
            rows,
        })
    }

    fn for_each_latency<T, F>(&self, latencies: &[usize], run: F) -> Result<Vec<T>, LatencyWarsError>
    where
        T: Send,
        F: Fn(usize) -> Result<T, LatencyWarsError> + Sync,
    {
        if !self.parallel {
            return latencies.iter().map(|&latency| run(latency)).collect();
        }
        // collected in full so the earliest error wins, not the first to finish
        let results: Vec<_> = latencies.par_iter().map(|&latency| run(latency)).collect();
        results.into_iter().collect()
    }

    fn run_one(&self, latency: usize) -> Result<LatencyResult, LatencyWarsError> {
        let result = simulate(
            self.series,
            &self.config.with_latency(latency),
            self.classifier,
        )?;
        let stats = TradeStats::compute(&result.ledger);
        Ok(LatencyResult {
            latency,
            pnl: result.pnl,
            stats,
            ledger: result.ledger,
        })
    }
}
