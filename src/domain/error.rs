//! Domain error types.
//!
//! Input-shape problems (bad config, bad date range, empty or unordered data)
//! abort a run before any computation. Numeric degeneracies inside the engine
//! (zero-loss RSI, zero-variance Sharpe, zero trades) are report states, not
//! errors, and never appear here.

use chrono::NaiveDate;

/// Top-level error type for pulsetrader.
#[derive(Debug, thiserror::Error)]
pub enum PulsetraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid date range: start {start} must be before end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("unsorted data for {ticker}: date {date} does not advance")]
    UnsortedData { ticker: String, date: NaiveDate },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PulsetraderError> for std::process::ExitCode {
    fn from(err: &PulsetraderError) -> Self {
        let code: u8 = match err {
            PulsetraderError::Io(_) => 1,
            PulsetraderError::ConfigParse { .. }
            | PulsetraderError::ConfigMissing { .. }
            | PulsetraderError::ConfigInvalid { .. } => 2,
            PulsetraderError::InvalidDateRange { .. } => 3,
            PulsetraderError::DataSource { .. } => 4,
            PulsetraderError::NoData { .. } | PulsetraderError::UnsortedData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_date_range() {
        let err = PulsetraderError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: start 2024-06-01 must be before end 2024-01-01"
        );
    }

    #[test]
    fn display_no_data() {
        let err = PulsetraderError::NoData {
            ticker: "AAPL".into(),
        };
        assert_eq!(err.to_string(), "no data for AAPL");
    }

    #[test]
    fn display_config_missing() {
        let err = PulsetraderError::ConfigMissing {
            section: "strategy".into(),
            key: "short_period".into(),
        };
        assert_eq!(err.to_string(), "missing config key [strategy] short_period");
    }
}
