//! CSV file data adapter.
//!
//! One file per ticker under a base directory: `<dir>/<TICKER>.csv` with a
//! `Date,Open,High,Low,Close,Volume` header. Columns are located by header
//! name (case-insensitive), so extra columns and reordered files both work.

use crate::domain::error::PulsetraderError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }

    fn read_bars(&self, ticker: &str) -> Result<Vec<PriceBar>, PulsetraderError> {
        let path = self.csv_path(ticker);
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| PulsetraderError::DataSource {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let headers = rdr.headers().map_err(|e| PulsetraderError::DataSource {
            reason: format!("failed to read header: {e}"),
        })?;
        let columns = map_columns(headers)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| PulsetraderError::DataSource {
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = field(&record, columns.date, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                PulsetraderError::DataSource {
                    reason: format!("invalid date '{date_str}': {e}"),
                }
            })?;

            bars.push(PriceBar {
                date,
                open: parse_f64(&record, columns.open, "open")?,
                high: parse_f64(&record, columns.high, "high")?,
                low: parse_f64(&record, columns.low, "low")?,
                close: parse_f64(&record, columns.close, "close")?,
                volume: parse_i64(&record, columns.volume, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn map_columns(headers: &csv::StringRecord) -> Result<ColumnMap, PulsetraderError> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| PulsetraderError::DataSource {
                reason: format!("missing column '{name}' in CSV header"),
            })
    };

    Ok(ColumnMap {
        date: find("date")?,
        open: find("open")?,
        high: find("high")?,
        low: find("low")?,
        close: find("close")?,
        volume: find("volume")?,
    })
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, PulsetraderError> {
    record.get(index).ok_or_else(|| PulsetraderError::DataSource {
        reason: format!("row too short: missing {name} field"),
    })
}

fn parse_f64(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<f64, PulsetraderError> {
    field(record, index, name)?
        .trim()
        .parse()
        .map_err(|e| PulsetraderError::DataSource {
            reason: format!("invalid {name} value: {e}"),
        })
}

fn parse_i64(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<i64, PulsetraderError> {
    field(record, index, name)?
        .trim()
        .parse()
        .map_err(|e| PulsetraderError::DataSource {
            reason: format!("invalid {name} value: {e}"),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, PulsetraderError> {
        let bars = self.read_bars(ticker)?;
        Ok(bars
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect())
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PulsetraderError> {
        let bars = self.read_bars(ticker)?;
        Ok(bars
            .first()
            .map(|first| (first.date, bars[bars.len() - 1].date, bars.len())))
    }
}
