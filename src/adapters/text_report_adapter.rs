//! Plain-text report adapter implementing ReportPort.

use crate::domain::error::PulsetraderError;
use crate::domain::evaluate::Evaluation;
use crate::ports::report_port::ReportPort;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Rows of the signal log, matching the terminal's "most recent signals"
/// table.
pub const SIGNAL_LOG_ROWS: usize = 10;

pub struct TextReportAdapter;

/// Render the full evaluation as the text report body. Shared between the
/// file adapter and the CLI summary so both show identical numbers.
pub fn render(evaluation: &Evaluation) -> String {
    let report = &evaluation.report;
    let series = &evaluation.series;
    let mut out = String::new();

    let _ = writeln!(out, "=== Strategy Evaluation: {} ===", series.ticker());
    let _ = writeln!(
        out,
        "Window:         {} to {} ({} bars)",
        series.first_date(),
        series.last_date(),
        series.len()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Return:   {:.2}%", report.total_return * 100.0);
    let _ = writeln!(out, "Sharpe Ratio:   {}", fmt_ratio(report.sharpe_ratio));
    let _ = writeln!(out, "Max Drawdown:   {:.2}%", report.max_drawdown * 100.0);
    let _ = writeln!(out, "Trade Count:    {}", report.trade_count);
    let _ = writeln!(out, "Win Rate:       {}", fmt_pct(report.win_rate));
    let _ = writeln!(out, "CAGR:           {:.2}%", report.cagr * 100.0);

    let rows = evaluation.recent_signals(SIGNAL_LOG_ROWS);
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Recent Signals (last {}) ===", SIGNAL_LOG_ROWS);
    if rows.is_empty() {
        let _ = writeln!(out, "(no buy/sell signals in window)");
    } else {
        let _ = writeln!(out, "date        close      short EMA  long EMA   RSI     signal");
        for row in rows {
            let _ = writeln!(
                out,
                "{}  {:>9.2}  {:>9.2}  {:>9.2}  {:>6.2}  {}",
                row.bar.date, row.bar.close, row.short_ema, row.long_ema, row.rsi, row.signal
            );
        }
    }

    out
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "N/A".to_string(),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "N/A".to_string(),
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, evaluation: &Evaluation, output_path: &Path) -> Result<(), PulsetraderError> {
        fs::write(output_path, render(evaluation))?;
        Ok(())
    }
}
