//! JSON report adapter.
//!
//! Document shape:
//! `{ "bot_b_pnl": f64, "bot_a_results": [{ latency, pnl, num_trades, avg_profit, win_rate }] }`
//! where `bot_b` is the momentum baseline and `bot_a` the classifier run.

use serde::Serialize;

use crate::domain::error::LatencyWarsError;
use crate::domain::evaluation::EvaluationReport;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct JsonReport {
    bot_b_pnl: f64,
    bot_a_results: Vec<JsonRow>,
}

#[derive(Serialize)]
struct JsonRow {
    latency: usize,
    pnl: f64,
    num_trades: usize,
    avg_profit: f64,
    win_rate: f64,
}

impl From<&EvaluationReport> for JsonReport {
    fn from(report: &EvaluationReport) -> Self {
        JsonReport {
            bot_b_pnl: report.baseline_pnl,
            bot_a_results: report
                .rows
                .iter()
                .map(|r| JsonRow {
                    latency: r.latency,
                    pnl: r.pnl,
                    num_trades: r.stats.num_trades,
                    avg_profit: r.stats.avg_profit,
                    win_rate: r.stats.win_rate,
                })
                .collect(),
        }
    }
}

pub struct JsonReportAdapter {
    pretty: bool,
}

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &EvaluationReport) -> Result<String, LatencyWarsError> {
        let doc = JsonReport::from(report);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        };
        rendered.map_err(|e| LatencyWarsError::Report {
            reason: format!("failed to serialise report: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::LatencyResult;
    use crate::domain::ledger::TradeLedger;
    use crate::domain::metrics::TradeStats;
    use tempfile::TempDir;

    fn report() -> EvaluationReport {
        EvaluationReport {
            baseline_pnl: -2.0,
            classifier: "logistic".into(),
            window_size: 10,
            train_ratio: 0.7,
            rows: vec![LatencyResult {
                latency: 5,
                pnl: 1.5,
                stats: TradeStats {
                    total_profit: 1.25,
                    num_trades: 4,
                    avg_profit: 0.3125,
                    win_rate: 0.75,
                },
                ledger: TradeLedger::new(),
            }],
        }
    }

    #[test]
    fn renders_expected_shape() {
        let text = JsonReportAdapter::compact().render(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["bot_b_pnl"], -2.0);
        let row = &value["bot_a_results"][0];
        assert_eq!(row["latency"], 5);
        assert_eq!(row["pnl"], 1.5);
        assert_eq!(row["num_trades"], 4);
        assert_eq!(row["avg_profit"], 0.3125);
        assert_eq!(row["win_rate"], 0.75);
        assert_eq!(row.as_object().unwrap().len(), 5);
    }

    #[test]
    fn write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let path_str = path.to_str().unwrap();
        JsonReportAdapter::new().write(&report(), path_str).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"bot_a_results\""));
    }

    #[test]
    fn write_to_missing_dir_is_report_error() {
        let err = JsonReportAdapter::new()
            .write(&report(), "/nonexistent/dir/report.json")
            .unwrap_err();
        assert!(matches!(err, LatencyWarsError::Report { .. }));
    }
}
