//! Evaluation entry point: prices in, report out.

use crate::domain::execution::{resolve_positions, Stance};
use crate::domain::indicator::{compute_indicators, IndicatorFrame};
use crate::domain::metrics::PerformanceReport;
use crate::domain::ohlcv::{PriceBar, PriceSeries};
use crate::domain::signal::{generate_signals, Signal};
use crate::domain::strategy::StrategyParams;
use chrono::NaiveDate;

/// What to evaluate: one ticker over a closed date range. Built from config
/// before any data access; `start < end` has already been validated.
#[derive(Debug, Clone)]
pub struct EvaluationWindow {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Everything one run produces. The frame, signals, and stances are exposed
/// alongside the report so a presentation layer can chart the EMA/RSI
/// overlays and mark buy/sell points; all four are index-aligned with the
/// input bars and immutable once built.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub series: PriceSeries,
    pub frame: IndicatorFrame,
    pub signals: Vec<Signal>,
    pub stances: Vec<Stance>,
    pub report: PerformanceReport,
}

/// One non-Hold row, as surfaced in the signal log.
#[derive(Debug, Clone)]
pub struct SignalRow<'a> {
    pub bar: &'a PriceBar,
    pub short_ema: f64,
    pub long_ema: f64,
    pub rsi: f64,
    pub signal: Signal,
}

impl Evaluation {
    /// The most recent `count` bars that emitted a Buy or Sell signal,
    /// oldest first.
    pub fn recent_signals(&self, count: usize) -> Vec<SignalRow<'_>> {
        let mut rows: Vec<SignalRow<'_>> = self
            .signals
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, &signal)| SignalRow {
                bar: &self.series.bars()[i],
                short_ema: self.frame.short_ema[i],
                long_ema: self.frame.long_ema[i],
                rsi: self.frame.rsi[i],
                signal,
            })
            .collect();
        if rows.len() > count {
            rows.drain(..rows.len() - count);
        }
        rows
    }
}

/// Run the full pipeline on one validated series: indicators, signals,
/// lagged positions, performance report. Pure and stateless; two concurrent
/// runs with their own inputs cannot interfere.
pub fn evaluate_strategy(series: PriceSeries, params: &StrategyParams) -> Evaluation {
    let frame = compute_indicators(&series, params);
    let signals = generate_signals(&frame, params);
    let stances = resolve_positions(&signals, params.execution_mode);
    let report = PerformanceReport::compute(&series, &signals, &stances);

    Evaluation {
        series,
        frame,
        signals,
        stances,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::ExecutionMode;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect();
        PriceSeries::new("TEST".into(), bars).unwrap()
    }

    fn fast_params() -> StrategyParams {
        StrategyParams {
            short_period: 2,
            long_period: 3,
            rsi_period: 2,
            overbought: 70.0,
            oversold: 30.0,
            execution_mode: ExecutionMode::HoldUntilExit,
        }
    }

    #[test]
    fn artifacts_are_aligned() {
        let series = make_series(&[100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 115.0]);
        let n = series.len();
        let evaluation = evaluate_strategy(series, &fast_params());
        assert_eq!(evaluation.frame.len(), n);
        assert_eq!(evaluation.signals.len(), n);
        assert_eq!(evaluation.stances.len(), n);
    }

    #[test]
    fn single_bar_degenerate_run() {
        let evaluation = evaluate_strategy(make_series(&[100.0]), &fast_params());
        assert_eq!(evaluation.frame.short_ema, vec![100.0]);
        assert_eq!(evaluation.frame.long_ema, vec![100.0]);
        assert_eq!(evaluation.signals, vec![Signal::Hold]);
        assert_eq!(evaluation.stances, vec![Stance::Flat]);
        assert_eq!(evaluation.report.total_return, 0.0);
    }

    #[test]
    fn recent_signals_filters_and_truncates() {
        let series = make_series(&[100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 115.0]);
        let evaluation = evaluate_strategy(series, &fast_params());
        let all: Vec<_> = evaluation.recent_signals(usize::MAX);
        let capped = evaluation.recent_signals(2);
        assert!(all.iter().all(|row| row.signal.is_active()));
        assert!(capped.len() <= 2);
        if all.len() >= 2 {
            // Capped view keeps the most recent rows, oldest first.
            assert_eq!(
                capped.last().unwrap().bar.date,
                all.last().unwrap().bar.date
            );
        }
    }

    #[test]
    fn idempotent_for_identical_input() {
        let closes = [100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 115.0];
        let a = evaluate_strategy(make_series(&closes), &fast_params());
        let b = evaluate_strategy(make_series(&closes), &fast_params());
        assert_eq!(a.frame.short_ema, b.frame.short_ema);
        assert_eq!(a.frame.long_ema, b.frame.long_ema);
        assert_eq!(a.frame.rsi, b.frame.rsi);
        assert_eq!(a.signals, b.signals);
        assert_eq!(a.report, b.report);
    }
}
