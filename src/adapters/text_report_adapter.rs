//! Plain-text grid table report.

use crate::domain::error::LatencyWarsError;
use crate::domain::evaluation::EvaluationReport;
use crate::ports::report_port::ReportPort;

const HEADERS: [&str; 5] = [
    "Latency (ticks)",
    "PnL",
    "Number of Trades",
    "Avg Profit/Trade",
    "Win Rate",
];

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!(" {cell:>w$} "))
        .collect();
    format!("|{}|\n", cells.join("|"))
}

fn format_rule(widths: &[usize], fill: char) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|&w| fill.to_string().repeat(w + 2))
        .collect();
    format!("+{}+\n", segments.join("+"))
}

/// Formats rows as a boxed grid with a double rule under the header.
pub fn format_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!(" {h:<w$} "))
        .collect();

    let mut output = format_rule(&widths, '-');
    output.push_str(&format!("|{}|\n", header_cells.join("|")));
    output.push_str(&format_rule(&widths, '='));
    for row in rows {
        output.push_str(&format_row(row, &widths));
        output.push_str(&format_rule(&widths, '-'));
    }
    output
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &EvaluationReport) -> Result<String, LatencyWarsError> {
        let rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.latency.to_string(),
                    format!("{:.2}", r.pnl),
                    r.stats.num_trades.to_string(),
                    format!("{:.4}", r.stats.avg_profit),
                    format!("{:.2}%", r.stats.win_rate * 100.0),
                ]
            })
            .collect();

        let mut output = format!(
            "Baseline momentum PnL: {:.2}\nClassifier: {} (window {}, train ratio {})\n\n",
            report.baseline_pnl, report.classifier, report.window_size, report.train_ratio
        );
        output.push_str(&format_grid(&HEADERS, &rows));
        if let Some(best) = report.best() {
            output.push_str(&format!(
                "\nBest latency: {} ticks ({:.2} vs baseline {:.2})\n",
                best.latency, best.pnl, report.baseline_pnl
            ));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::LatencyResult;
    use crate::domain::ledger::TradeLedger;
    use crate::domain::metrics::TradeStats;

    fn report() -> EvaluationReport {
        let row = |latency, pnl, num_trades, avg_profit, win_rate| LatencyResult {
            latency,
            pnl,
            stats: TradeStats {
                total_profit: pnl,
                num_trades,
                avg_profit,
                win_rate,
            },
            ledger: TradeLedger::new(),
        };
        EvaluationReport {
            baseline_pnl: -2.0,
            classifier: "logistic".into(),
            window_size: 10,
            train_ratio: 0.7,
            rows: vec![row(1, 3.456, 100, 0.03456, 0.52), row(1000, 0.0, 0, 0.0, 0.0)],
        }
    }

    #[test]
    fn grid_aligns_columns() {
        let grid = format_grid(&["a", "bb"], &[vec!["123".into(), "4".into()]]);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[0], "+-----+----+");
        assert_eq!(lines[1], "| a   | bb |");
        assert_eq!(lines[2], "+=====+====+");
        assert_eq!(lines[3], "| 123 |  4 |");
        assert_eq!(lines[4], "+-----+----+");
    }

    #[test]
    fn render_formats_values() {
        let text = TextReportAdapter::new().render(&report()).unwrap();
        assert!(text.starts_with("Baseline momentum PnL: -2.00\n"));
        assert!(text.contains("Latency (ticks)"));
        assert!(text.contains(" 3.46 |"));
        assert!(text.contains(" 0.0346 |"));
        assert!(text.contains(" 52.00% |"));
        assert!(text.contains("Best latency: 1 ticks"));
    }

    #[test]
    fn render_without_rows_has_header_only() {
        let mut empty = report();
        empty.rows.clear();
        let text = TextReportAdapter::new().render(&empty).unwrap();
        assert!(text.contains("Win Rate"));
        assert!(!text.contains("Best latency"));
    }
}
