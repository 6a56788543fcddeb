//! Seeded Gaussian random-walk tick generator.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::domain::error::LatencyWarsError;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::PriceDataPort;

/// Generator parameters. `price[t] = start_price + sum of t+1 draws from
/// N(0, volatility)`, one tick per millisecond from `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub num_ticks: usize,
    pub start_price: f64,
    pub volatility: f64,
    pub start_time: NaiveDateTime,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        SyntheticConfig {
            seed: 90,
            num_ticks: 10_000,
            start_price: 100.0,
            volatility: 0.1,
            start_time: default_start_time(),
        }
    }
}

fn default_start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 4)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

pub struct SyntheticAdapter {
    config: SyntheticConfig,
}

impl SyntheticAdapter {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self) -> Result<Vec<Tick>, LatencyWarsError> {
        let cfg = &self.config;
        if !cfg.start_price.is_finite() {
            return Err(LatencyWarsError::Data {
                reason: format!("start_price {} is not finite", cfg.start_price),
            });
        }
        let step = Normal::new(0.0, cfg.volatility).map_err(|e| LatencyWarsError::Data {
            reason: format!("volatility {}: {e}", cfg.volatility),
        })?;

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut price = cfg.start_price;
        let mut ticks = Vec::with_capacity(cfg.num_ticks);
        for i in 0..cfg.num_ticks {
            price += step.sample(&mut rng);
            ticks.push(Tick {
                timestamp: cfg.start_time + TimeDelta::milliseconds(i as i64),
                price,
            });
        }

        debug!(
            seed = cfg.seed,
            ticks = ticks.len(),
            last = ?ticks.last().map(|t| t.price),
            "generated synthetic ticks"
        );
        Ok(ticks)
    }
}

impl PriceDataPort for SyntheticAdapter {
    fn load_prices(&self) -> Result<PriceSeries, LatencyWarsError> {
        let prices = self.generate()?.into_iter().map(|t| t.price).collect();
        PriceSeries::new(prices)
    }

    fn describe(&self) -> String {
        format!(
            "synthetic walk (seed {}, {} ticks)",
            self.config.seed, self.config.num_ticks
        )
    }
}
