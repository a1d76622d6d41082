#![allow(dead_code)]

use chrono::NaiveDate;
use pulsetrader::domain::error::PulsetraderError;
use pulsetrader::domain::execution::ExecutionMode;
pub use pulsetrader::domain::ohlcv::{PriceBar, PriceSeries};
use pulsetrader::domain::strategy::StrategyParams;
use pulsetrader::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, PulsetraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(PulsetraderError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PulsetraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(PulsetraderError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).and_then(|bars| {
            bars.first()
                .map(|first| (first.date, bars[bars.len() - 1].date, bars.len()))
        }))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day_offset: i64, close: f64) -> PriceBar {
    PriceBar {
        date: date(2024, 1, 1) + chrono::Duration::days(day_offset),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

pub fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i as i64, close))
        .collect();
    PriceSeries::new(ticker.to_string(), bars).unwrap()
}

/// Short periods so small fixtures produce crossovers quickly.
pub fn fast_params(mode: ExecutionMode) -> StrategyParams {
    StrategyParams {
        short_period: 2,
        long_period: 3,
        rsi_period: 2,
        overbought: 70.0,
        oversold: 30.0,
        execution_mode: mode,
    }
}
