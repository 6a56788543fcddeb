//! Trade ledger statistics.

use serde::Serialize;

use super::ledger::TradeLedger;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeStats {
    pub total_profit: f64,
    pub num_trades: usize,
    pub avg_profit: f64,
    pub win_rate: f64,
}

impl TradeStats {
    pub fn compute(ledger: &TradeLedger) -> Self {
        let mut total_profit = 0.0_f64;
        let mut wins = 0usize;

        for record in ledger {
            let profit = record.profit();
            total_profit += profit;
            if profit > 0.0 {
                wins += 1;
            }
        }

        let num_trades = ledger.len();
        let (avg_profit, win_rate) = if num_trades > 0 {
            (
                total_profit / num_trades as f64,
                wins as f64 / num_trades as f64,
            )
        } else {
            (0.0, 0.0)
        };

        TradeStats {
            total_profit,
            num_trades,
            avg_profit,
            win_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Direction;
    use crate::domain::ledger::TradeRecord;
    use approx::assert_relative_eq;

    fn make_trade(tick: usize, direction: Direction, predict: f64, exec: f64) -> TradeRecord {
        TradeRecord {
            execution_tick: tick,
            decision_tick: tick,
            direction,
            predict_price: predict,
            exec_price: exec,
            position: 0,
        }
    }

    #[test]
    fn empty_ledger() {
        let stats = TradeStats::compute(&TradeLedger::new());
        assert_eq!(stats.num_trades, 0);
        assert_eq!(stats.total_profit, 0.0);
        assert_eq!(stats.avg_profit, 0.0);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn all_winners() {
        let ledger = TradeLedger::from(vec![
            make_trade(1, Direction::Up, 100.0, 101.0),
            make_trade(2, Direction::Down, 101.0, 100.5),
        ]);
        let stats = TradeStats::compute(&ledger);
        assert_eq!(stats.num_trades, 2);
        assert_relative_eq!(stats.win_rate, 1.0);
        assert_relative_eq!(stats.total_profit, 1.5);
        assert_relative_eq!(stats.avg_profit, 0.75);
    }

    #[test]
    fn breakeven_is_not_a_win() {
        let ledger = TradeLedger::from(vec![
            make_trade(1, Direction::Up, 100.0, 100.0),
            make_trade(2, Direction::Up, 100.0, 102.0),
            make_trade(3, Direction::Down, 100.0, 101.0),
            make_trade(4, Direction::Down, 100.0, 100.0),
        ]);
        let stats = TradeStats::compute(&ledger);
        assert_relative_eq!(stats.win_rate, 0.25);
        assert_relative_eq!(stats.total_profit, 1.0);
        assert_relative_eq!(stats.avg_profit, 0.25);
    }
}
