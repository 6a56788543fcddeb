//! CSV price loader and writers for tick data and trade ledgers.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::synthetic_adapter::Tick;
use crate::domain::error::LatencyWarsError;
use crate::domain::ledger::TradeLedger;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::PriceDataPort;

const PRICE_COLUMN: &str = "price";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Reads the `price` column of a headed CSV file; other columns are ignored.
pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn data_err(&self, reason: impl std::fmt::Display) -> LatencyWarsError {
        LatencyWarsError::Data {
            reason: format!("{}: {}", self.path.display(), reason),
        }
    }
}

impl PriceDataPort for CsvAdapter {
    fn load_prices(&self) -> Result<PriceSeries, LatencyWarsError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.data_err(format!("failed to open: {e}")))?;

        let headers = rdr
            .headers()
            .map_err(|e| self.data_err(format!("failed to read header: {e}")))?;
        let column = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(PRICE_COLUMN))
            .ok_or_else(|| self.data_err("missing price column"))?;

        let mut prices = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.data_err(format!("CSV parse error: {e}")))?;
            let raw = record
                .get(column)
                .ok_or_else(|| self.data_err(format!("row {}: missing price", row + 1)))?;
            let price: f64 = raw
                .parse()
                .map_err(|e| self.data_err(format!("row {}: invalid price '{raw}': {e}", row + 1)))?;
            prices.push(price);
        }

        debug!(path = %self.path.display(), ticks = prices.len(), "loaded prices");
        PriceSeries::new(prices)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes generated ticks as `timestamp,price`.
pub fn write_ticks(path: &Path, ticks: &[Tick]) -> Result<(), LatencyWarsError> {
    let io_err = |e: csv::Error| LatencyWarsError::Data {
        reason: format!("failed to write {}: {e}", path.display()),
    };
    let mut wtr = csv::Writer::from_path(path).map_err(io_err)?;
    wtr.write_record(["timestamp", PRICE_COLUMN]).map_err(io_err)?;
    for tick in ticks {
        wtr.write_record([
            tick.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            tick.price.to_string(),
        ])
        .map_err(io_err)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one row per trade record, headed by the record's field names.
pub fn write_ledger(path: &Path, ledger: &TradeLedger) -> Result<(), LatencyWarsError> {
    let report_err = |e: csv::Error| LatencyWarsError::Report {
        reason: format!("failed to write ledger {}: {e}", path.display()),
    };
    let mut wtr = csv::Writer::from_path(path).map_err(report_err)?;
    if ledger.is_empty() {
        wtr.write_record([
            "timestamp_index",
            "decision_index",
            "predicted_direction",
            "predict_price",
            "exec_price",
            "position",
        ])
        .map_err(report_err)?;
    }
    for record in ledger {
        wtr.serialize(record).map_err(report_err)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::synthetic_adapter::{SyntheticAdapter, SyntheticConfig};
    use crate::domain::dataset::Direction;
    use crate::domain::ledger::TradeRecord;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_prices_reads_price_column_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ticks.csv",
            "timestamp,price\n\
             2025-08-04 09:30:00.000,100.5\n\
             2025-08-04 09:30:00.001,100.25\n\
             2025-08-04 09:30:00.002,101\n",
        );
        let series = CsvAdapter::new(path).load_prices().unwrap();
        assert_eq!(series.as_slice(), &[100.5, 100.25, 101.0]);
    }

    #[test]
    fn load_prices_accepts_any_column_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ticks.csv", "Price, volume\n 1.5 ,10\n2.5,20\n");
        let series = CsvAdapter::new(path).load_prices().unwrap();
        assert_eq!(series.as_slice(), &[1.5, 2.5]);
    }

    #[test]
    fn missing_price_column_is_data_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ticks.csv", "timestamp,close\nx,1.0\n");
        let err = CsvAdapter::new(path).load_prices().unwrap_err();
        assert!(matches!(err, LatencyWarsError::Data { ref reason } if reason.contains("price column")));
    }

    #[test]
    fn unparseable_price_is_data_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ticks.csv", "price\n1.0\nabc\n");
        let err = CsvAdapter::new(path).load_prices().unwrap_err();
        assert!(matches!(err, LatencyWarsError::Data { ref reason } if reason.contains("row 2")));
    }

    #[test]
    fn non_finite_price_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ticks.csv", "price\n1.0\nNaN\n");
        let err = CsvAdapter::new(path).load_prices().unwrap_err();
        assert!(matches!(err, LatencyWarsError::InvalidPrice { tick: 1, .. }));
    }

    #[test]
    fn missing_file_is_data_error() {
        let err = CsvAdapter::new(PathBuf::from("/nonexistent/ticks.csv"))
            .load_prices()
            .unwrap_err();
        assert!(matches!(err, LatencyWarsError::Data { .. }));
    }

    #[test]
    fn written_ticks_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("synthetic.csv");
        let adapter = SyntheticAdapter::new(SyntheticConfig {
            num_ticks: 50,
            ..Default::default()
        });
        let ticks = adapter.generate().unwrap();
        write_ticks(&path, &ticks).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("timestamp,price"));
        assert!(lines.next().unwrap().starts_with("2025-08-04 09:30:00.000,"));

        let loaded = CsvAdapter::new(path).load_prices().unwrap();
        assert_eq!(loaded, adapter.load_prices().unwrap());
    }

    #[test]
    fn ledger_csv_has_expected_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.csv");
        let ledger = TradeLedger::from(vec![TradeRecord {
            execution_tick: 12,
            decision_tick: 10,
            direction: Direction::Up,
            predict_price: 100.0,
            exec_price: 100.5,
            position: 1,
        }]);
        write_ledger(&path, &ledger).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp_index,decision_index,predicted_direction,predict_price,exec_price,position"
        );
        assert_eq!(lines[1], "12,10,1,100.0,100.5,1");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_ledger_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.csv");
        write_ledger(&path, &TradeLedger::new()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("timestamp_index,"));
    }
}
