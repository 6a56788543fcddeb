//! Trade records produced by the execution simulator.

use serde::{Deserialize, Serialize};

use super::dataset::Direction;

/// One executed decision. Serialised field names match the exported ledger
/// CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(rename = "timestamp_index")]
    pub execution_tick: usize,
    #[serde(rename = "decision_index")]
    pub decision_tick: usize,
    #[serde(rename = "predicted_direction")]
    pub direction: Direction,
    pub predict_price: f64,
    pub exec_price: f64,
    /// Net position after this trade.
    pub position: i64,
}

impl TradeRecord {
    /// Price change between decision and execution, signed by the prediction.
    pub fn profit(&self) -> f64 {
        match self.direction {
            Direction::Up => self.exec_price - self.predict_price,
            Direction::Down => self.predict_price - self.exec_price,
        }
    }

    pub fn latency(&self) -> usize {
        self.execution_tick - self.decision_tick
    }
}

/// Ordered trade records of a single simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TradeLedger {
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, record: TradeRecord) {
        debug_assert!(
            self.records
                .last()
                .is_none_or(|prev| prev.decision_tick < record.decision_tick),
            "decision ticks must be strictly increasing"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TradeRecord> {
        self.records.last()
    }
}

impl From<Vec<TradeRecord>> for TradeLedger {
    fn from(records: Vec<TradeRecord>) -> Self {
        TradeLedger { records }
    }
}

impl<'a> IntoIterator for &'a TradeLedger {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(direction: Direction, predict_price: f64, exec_price: f64) -> TradeRecord {
        TradeRecord {
            execution_tick: 12,
            decision_tick: 10,
            direction,
            predict_price,
            exec_price,
            position: 1,
        }
    }

    #[test]
    fn profit_up_prediction() {
        assert!((record(Direction::Up, 100.0, 101.5).profit() - 1.5).abs() < 1e-12);
        assert!((record(Direction::Up, 100.0, 99.0).profit() - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn profit_down_prediction() {
        assert!((record(Direction::Down, 100.0, 99.0).profit() - 1.0).abs() < 1e-12);
        assert!((record(Direction::Down, 100.0, 100.25).profit() - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn latency_is_tick_gap() {
        assert_eq!(record(Direction::Up, 1.0, 1.0).latency(), 2);
    }

    #[test]
    fn ledger_preserves_order() {
        let mut ledger = TradeLedger::new();
        for tick in [3, 4, 5] {
            ledger.push(TradeRecord {
                execution_tick: tick,
                decision_tick: tick,
                direction: Direction::Up,
                predict_price: 1.0,
                exec_price: 1.0,
                position: 0,
            });
        }
        let ticks: Vec<usize> = ledger.iter().map(|r| r.decision_tick).collect();
        assert_eq!(ticks, vec![3, 4, 5]);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.last().map(|r| r.execution_tick), Some(5));
    }
}
