//! Performance accounting: return, risk, and trade statistics.

use crate::domain::execution::Stance;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::Signal;
use serde::{Deserialize, Serialize};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Aggregate statistics for one evaluation run. `None` means the metric's
/// denominator was degenerate (zero variance, zero trades) and is rendered
/// as "N/A", never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_return: f64,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: f64,
    pub trade_count: usize,
    pub win_rate: Option<f64>,
    pub cagr: f64,
}

impl PerformanceReport {
    /// Single deterministic pass over closes, signals, and lagged stances.
    pub fn compute(series: &PriceSeries, signals: &[Signal], stances: &[Stance]) -> Self {
        let strat_returns = strategy_returns(&series.closes(), stances);
        let defined: Vec<f64> = strat_returns
            .iter()
            .copied()
            .filter(|r| r.is_finite())
            .collect();

        let total_return = defined.iter().map(|r| 1.0 + r).product::<f64>() - 1.0;

        let trade_count = signals.iter().filter(|s| s.is_active()).count();
        let wins = signals
            .iter()
            .zip(&strat_returns)
            .filter(|(s, r)| s.is_active() && **r > 0.0)
            .count();
        let win_rate = if trade_count > 0 {
            Some(wins as f64 / trade_count as f64)
        } else {
            None
        };

        let cagr = compute_cagr(total_return, series.calendar_days());

        PerformanceReport {
            total_return,
            sharpe_ratio: compute_sharpe(&defined),
            max_drawdown: compute_drawdown(&defined),
            trade_count,
            win_rate,
            cagr,
        }
    }
}

/// Per-bar strategy return: simple close-to-close return times the stance
/// held during the bar. Index 0 has no prior close and stays NaN; it is
/// filtered out of every aggregate, never multiplied into them.
fn strategy_returns(closes: &[f64], stances: &[Stance]) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    for t in 1..closes.len() {
        let ret = closes[t] / closes[t - 1] - 1.0;
        out[t] = ret * stances[t].direction();
    }
    out
}

/// Annualized mean/stdev ratio. Sample standard deviation (n-1 divisor);
/// undefined with fewer than two returns or zero variance.
fn compute_sharpe(returns: &[f64]) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();
    if stddev == 0.0 {
        return None;
    }
    Some(mean / stddev * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Largest drop of the running peak of *cumulative summed* returns below
/// itself. The additive curve is a known approximation of compounded
/// equity, kept deliberately: the reported numbers are part of the
/// engine's contract and must not shift to the textbook definition.
fn compute_drawdown(returns: &[f64]) -> f64 {
    let mut cumulative = 0.0;
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0;

    for r in returns {
        cumulative += r;
        if cumulative > peak {
            peak = cumulative;
        }
        let dd = peak - cumulative;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

/// Annualizes the total return over the calendar span. A zero-day span
/// (single bar) reports exactly 0 rather than dividing by zero.
fn compute_cagr(total_return: f64, calendar_days: i64) -> f64 {
    if calendar_days <= 0 {
        return 0.0;
    }
    (1.0 + total_return).powf(365.0 / calendar_days as f64) - 1.0
}
