//! JSON report adapter implementing ReportPort.
//!
//! Serializes the aggregate report (plus the run's window) for downstream
//! tooling; undefined metrics come through as `null`.

use crate::domain::error::PulsetraderError;
use crate::domain::evaluate::Evaluation;
use crate::domain::metrics::PerformanceReport;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub struct JsonReportAdapter;

#[derive(Serialize)]
struct JsonReport<'a> {
    ticker: &'a str,
    start_date: String,
    end_date: String,
    bars: usize,
    report: &'a PerformanceReport,
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, evaluation: &Evaluation, output_path: &Path) -> Result<(), PulsetraderError> {
        let series = &evaluation.series;
        let body = JsonReport {
            ticker: series.ticker(),
            start_date: series.first_date().to_string(),
            end_date: series.last_date().to_string(),
            bars: series.len(),
            report: &evaluation.report,
        };
        let json = serde_json::to_string_pretty(&body).map_err(std::io::Error::other)?;
        fs::write(output_path, json)?;
        Ok(())
    }
}
