//! Zero-latency momentum baseline.
//!
//! Buys one unit on every up-tick and sells one on every down-tick at that
//! tick's price; unchanged prices are skipped. Whatever is left is closed at
//! the last price.

use super::price_series::PriceSeries;

/// Final cash of the momentum baseline. An empty series yields 0.
pub fn momentum_baseline(series: &PriceSeries) -> f64 {
    let prices = series.as_slice();
    let mut position: i64 = 0;
    let mut cash = 0.0;

    for pair in prices.windows(2) {
        let (prev, price) = (pair[0], pair[1]);
        if price > prev {
            cash -= price;
            position += 1;
        } else if price < prev {
            cash += price;
            position -= 1;
        }
    }

    if let Some(last) = series.last() {
        cash += position as f64 * last;
    }
    cash
}
