//! Market-data access port trait.
//!
//! Stands in for the external price supplier: a synchronous call that either
//! returns daily bars for one ticker over a closed date range or reports a
//! failure. The engine itself never performs I/O.

use crate::domain::error::PulsetraderError;
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily bars for `ticker` with dates in `[start, end]`, sorted by date.
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, PulsetraderError>;

    /// Available date range and row count for `ticker`, or `None` when the
    /// source has no rows at all.
    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PulsetraderError>;
}
