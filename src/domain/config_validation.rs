//! Configuration validation.
//!
//! All config fields are validated up front, before any data is read; a run
//! never starts on a half-valid configuration.

use crate::domain::error::PulsetraderError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_evaluation_config(config: &dyn ConfigPort) -> Result<(), PulsetraderError> {
    validate_csv_dir(config)?;
    validate_ticker(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), PulsetraderError> {
    validate_period(config, "short_period", 20)?;
    validate_period(config, "long_period", 50)?;
    validate_period(config, "rsi_period", 14)?;
    validate_threshold(config, "overbought", 70.0)?;
    validate_threshold(config, "oversold", 30.0)?;
    validate_execution_mode(config)?;
    Ok(())
}

fn validate_csv_dir(config: &dyn ConfigPort) -> Result<(), PulsetraderError> {
    match config.get_string("data", "csv_dir") {
        Some(_) => Ok(()),
        None => Err(PulsetraderError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        }),
    }
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), PulsetraderError> {
    match config.get_string("evaluation", "ticker") {
        Some(t) if !t.trim().is_empty() => Ok(()),
        Some(_) => Err(PulsetraderError::ConfigInvalid {
            section: "evaluation".to_string(),
            key: "ticker".to_string(),
            reason: "ticker must not be empty".to_string(),
        }),
        None => Err(PulsetraderError::ConfigMissing {
            section: "evaluation".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), PulsetraderError> {
    let start_str = config.get_string("evaluation", "start_date");
    let end_str = config.get_string("evaluation", "end_date");

    let start = parse_date(start_str.as_deref(), "start_date")?;
    let end = parse_date(end_str.as_deref(), "end_date")?;

    if start >= end {
        return Err(PulsetraderError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, key: &str) -> Result<NaiveDate, PulsetraderError> {
    let value = value.ok_or_else(|| PulsetraderError::ConfigMissing {
        section: "evaluation".to_string(),
        key: key.to_string(),
    })?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PulsetraderError::ConfigInvalid {
        section: "evaluation".to_string(),
        key: key.to_string(),
        reason: "invalid date format (expected YYYY-MM-DD)".to_string(),
    })
}

fn validate_period(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<(), PulsetraderError> {
    let value = config.get_int("strategy", key, default);
    if value < 1 {
        return Err(PulsetraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a positive integer"),
        });
    }
    Ok(())
}

fn validate_threshold(
    config: &dyn ConfigPort,
    key: &str,
    default: f64,
) -> Result<(), PulsetraderError> {
    let value = config.get_double("strategy", key, default);
    if value <= 0.0 || value >= 100.0 {
        return Err(PulsetraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be strictly between 0 and 100"),
        });
    }
    Ok(())
}

fn validate_execution_mode(config: &dyn ConfigPort) -> Result<(), PulsetraderError> {
    if let Some(raw) = config.get_string("strategy", "execution_mode") {
        raw.parse::<crate::domain::execution::ExecutionMode>()
            .map_err(|reason| PulsetraderError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "execution_mode".to_string(),
                reason,
            })?;
    }
    Ok(())
}
