//! Daily price bars and the validated series the engine runs on.

use crate::domain::error::PulsetraderError;
use chrono::NaiveDate;

/// One daily OHLCV record. Only `close` feeds the engine; the remaining
/// fields pass through untouched for reporting.
#[derive(Debug, Clone)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// A non-empty sequence of bars for one ticker, strictly increasing by date.
///
/// Both invariants are enforced at construction so every downstream stage
/// can index freely without re-checking.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: String, bars: Vec<PriceBar>) -> Result<Self, PulsetraderError> {
        if bars.is_empty() {
            return Err(PulsetraderError::NoData { ticker });
        }
        for window in bars.windows(2) {
            if window[1].date <= window[0].date {
                return Err(PulsetraderError::UnsortedData {
                    ticker,
                    date: window[1].date,
                });
            }
        }
        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    /// Calendar days between the first and last bar. Zero for a single bar.
    pub fn calendar_days(&self) -> i64 {
        self.last_date().signed_duration_since(self.first_date()).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(date: &str, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn new_accepts_ordered_bars() {
        let series = PriceSeries::new(
            "AAPL".into(),
            vec![make_bar("2024-01-02", 100.0), make_bar("2024-01-03", 101.0)],
        )
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.ticker(), "AAPL");
    }

    #[test]
    fn new_rejects_empty() {
        let err = PriceSeries::new("AAPL".into(), vec![]).unwrap_err();
        assert!(matches!(err, PulsetraderError::NoData { .. }));
    }

    #[test]
    fn new_rejects_duplicate_date() {
        let err = PriceSeries::new(
            "AAPL".into(),
            vec![make_bar("2024-01-02", 100.0), make_bar("2024-01-02", 101.0)],
        )
        .unwrap_err();
        assert!(matches!(err, PulsetraderError::UnsortedData { .. }));
    }

    #[test]
    fn new_rejects_regressing_date() {
        let err = PriceSeries::new(
            "AAPL".into(),
            vec![make_bar("2024-01-03", 100.0), make_bar("2024-01-02", 101.0)],
        )
        .unwrap_err();
        match err {
            PulsetraderError::UnsortedData { date, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn calendar_days_span() {
        let series = PriceSeries::new(
            "AAPL".into(),
            vec![make_bar("2024-01-01", 100.0), make_bar("2024-01-11", 105.0)],
        )
        .unwrap();
        assert_eq!(series.calendar_days(), 10);
    }

    #[test]
    fn calendar_days_single_bar() {
        let series =
            PriceSeries::new("AAPL".into(), vec![make_bar("2024-01-01", 100.0)]).unwrap();
        assert_eq!(series.calendar_days(), 0);
    }

    #[test]
    fn closes_extracts_close_column() {
        let series = PriceSeries::new(
            "AAPL".into(),
            vec![make_bar("2024-01-02", 100.0), make_bar("2024-01-03", 101.5)],
        )
        .unwrap();
        assert_eq!(series.closes(), vec![100.0, 101.5]);
    }
}
