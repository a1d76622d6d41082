//! EMA and RSI recurrences and the frame that aligns them to the bars.
//!
//! Both indicators seed from the first close and produce one value per input
//! bar, with no warm-up gap: `ema[0] = close[0]`, and every later value
//! follows `ema[t] = k*close[t] + (1-k)*ema[t-1]` with `k = 2/(period+1)`.
//! The RSI applies the same recurrence to the gain and loss halves of the
//! per-bar close delta (the delta at index 0 is taken as zero).

use crate::domain::ohlcv::PriceSeries;
use crate::domain::strategy::StrategyParams;

/// Stand-in for an infinite gain/loss ratio when the smoothed loss is zero.
/// Keeps the oscillator finite: 100 - 100/(1 + 1e10) lands a hair under 100,
/// so RSI saturates near the top of its range instead of dividing by zero.
pub const ZERO_LOSS_SENTINEL: f64 = 1e10;

/// Price series extended with the three derived channels, index-aligned
/// with the bars that produced it. Read-only once built.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub short_ema: Vec<f64>,
    pub long_ema: Vec<f64>,
    pub rsi: Vec<f64>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }
}

/// Exponential moving average with smoothing factor k = 2/(period+1),
/// seeded with the first value.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = 0.0;

    for (i, &value) in values.iter().enumerate() {
        let smoothed = if i == 0 {
            value
        } else {
            value * k + prev * (1.0 - k)
        };
        out.push(smoothed);
        prev = smoothed;
    }

    out
}

/// Relative strength index over EMA-smoothed gains and losses, bounded to
/// [0, 100] for any finite input. Never NaN: a zero smoothed loss takes
/// [`ZERO_LOSS_SENTINEL`] as the gain/loss ratio instead of dividing.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let delta = if i == 0 { 0.0 } else { close - closes[i - 1] };
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gain = ema(&gains, period);
    let avg_loss = ema(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            let rs = if loss == 0.0 {
                ZERO_LOSS_SENTINEL
            } else {
                gain / loss
            };
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}

/// Compute the full frame for one evaluation run.
pub fn compute_indicators(series: &PriceSeries, params: &StrategyParams) -> IndicatorFrame {
    let closes = series.closes();
    IndicatorFrame {
        short_ema: ema(&closes, params.short_period),
        long_ema: ema(&closes, params.long_period),
        rsi: rsi(&closes, params.rsi_period),
    }
}
