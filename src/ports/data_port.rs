//! Price data source port.

use crate::domain::error::LatencyWarsError;
use crate::domain::price_series::PriceSeries;

/// Anything that can produce an ordered tick series: a CSV file, the
/// synthetic generator, an in-memory fixture.
pub trait PriceDataPort {
    fn load_prices(&self) -> Result<PriceSeries, LatencyWarsError>;

    /// Human-readable origin, used in progress output.
    fn describe(&self) -> String {
        "price data".to_string()
    }
}
