//! Immutable tick-indexed price series.

use super::error::LatencyWarsError;

/// Ordered sequence of prices, one per tick `0..len`.
///
/// There is no mutating API: once built, a series is shared read-only
/// between every run that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a series, rejecting NaN and infinite prices.
    pub fn new(prices: Vec<f64>) -> Result<Self, LatencyWarsError> {
        if let Some((tick, &value)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(LatencyWarsError::InvalidPrice { tick, value });
        }
        Ok(Self { prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }

    pub fn get(&self, tick: usize) -> Option<f64> {
        self.prices.get(tick).copied()
    }

    /// Price at `tick`, or [`LatencyWarsError::IndexOutOfBounds`].
    pub fn price_at(&self, tick: usize) -> Result<f64, LatencyWarsError> {
        self.get(tick).ok_or(LatencyWarsError::IndexOutOfBounds {
            tick,
            len: self.len(),
        })
    }

    pub fn last(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_finite_prices() {
        let series = PriceSeries::new(vec![100.0, 101.5, 99.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.last(), Some(99.0));
    }

    #[test]
    fn new_rejects_nan() {
        let err = PriceSeries::new(vec![100.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, LatencyWarsError::InvalidPrice { tick: 1, .. }));
    }

    #[test]
    fn new_rejects_infinity() {
        let err = PriceSeries::new(vec![f64::INFINITY]).unwrap_err();
        assert!(matches!(err, LatencyWarsError::InvalidPrice { tick: 0, .. }));
    }

    #[test]
    fn price_at_out_of_range() {
        let series = PriceSeries::new(vec![1.0, 2.0]).unwrap();
        assert_eq!(series.price_at(1).unwrap(), 2.0);
        let err = series.price_at(2).unwrap_err();
        assert!(matches!(
            err,
            LatencyWarsError::IndexOutOfBounds { tick: 2, len: 2 }
        ));
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::new(vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.last(), None);
    }
}
