//! Evaluation report port.

use std::fs;

use crate::domain::error::LatencyWarsError;
use crate::domain::evaluation::EvaluationReport;

/// Port for rendering and writing latency sweep reports.
pub trait ReportPort {
    fn render(&self, report: &EvaluationReport) -> Result<String, LatencyWarsError>;

    /// Default implementation: renders and writes the whole document to `output_path`.
    fn write(&self, report: &EvaluationReport, output_path: &str) -> Result<(), LatencyWarsError> {
        let rendered = self.render(report)?;
        fs::write(output_path, rendered).map_err(|e| LatencyWarsError::Report {
            reason: format!("failed to write {output_path}: {e}"),
        })
    }
}
