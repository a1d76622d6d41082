//! Discrete per-bar trade signals derived from indicator state.

use crate::domain::indicator::IndicatorFrame;
use crate::domain::strategy::StrategyParams;
use std::fmt;

/// Trade intent for one bar. Evaluated row-by-row with no lookback:
/// the two live conditions require strictly opposite EMA orderings, so at
/// most one can fire; an exact EMA tie falls through to `Hold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn is_active(self) -> bool {
        self != Signal::Hold
    }

    /// Signed direction: +1 buy, 0 hold, -1 sell.
    pub fn direction(self) -> f64 {
        match self {
            Signal::Buy => 1.0,
            Signal::Hold => 0.0,
            Signal::Sell => -1.0,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Hold => write!(f, "Hold"),
            Signal::Sell => write!(f, "Sell"),
        }
    }
}

/// One signal per bar, aligned with the frame's index.
pub fn generate_signals(frame: &IndicatorFrame, params: &StrategyParams) -> Vec<Signal> {
    frame
        .short_ema
        .iter()
        .zip(&frame.long_ema)
        .zip(&frame.rsi)
        .map(|((&short, &long), &rsi)| {
            if short > long && rsi < params.overbought {
                Signal::Buy
            } else if short < long && rsi > params.oversold {
                Signal::Sell
            } else {
                Signal::Hold
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(short: Vec<f64>, long: Vec<f64>, rsi: Vec<f64>) -> IndicatorFrame {
        IndicatorFrame {
            short_ema: short,
            long_ema: long,
            rsi,
        }
    }

    fn params(overbought: f64, oversold: f64) -> StrategyParams {
        StrategyParams {
            overbought,
            oversold,
            ..StrategyParams::default()
        }
    }

    #[test]
    fn buy_when_short_above_long_and_rsi_below_overbought() {
        let f = frame(vec![101.0], vec![100.0], vec![50.0]);
        assert_eq!(generate_signals(&f, &params(70.0, 30.0)), vec![Signal::Buy]);
    }

    #[test]
    fn no_buy_when_rsi_at_or_above_overbought() {
        let f = frame(vec![101.0, 101.0], vec![100.0, 100.0], vec![70.0, 85.0]);
        assert_eq!(
            generate_signals(&f, &params(70.0, 30.0)),
            vec![Signal::Hold, Signal::Hold]
        );
    }

    #[test]
    fn sell_when_short_below_long_and_rsi_above_oversold() {
        let f = frame(vec![99.0], vec![100.0], vec![50.0]);
        assert_eq!(generate_signals(&f, &params(70.0, 30.0)), vec![Signal::Sell]);
    }

    #[test]
    fn no_sell_when_rsi_at_or_below_oversold() {
        let f = frame(vec![99.0, 99.0], vec![100.0, 100.0], vec![30.0, 12.0]);
        assert_eq!(
            generate_signals(&f, &params(70.0, 30.0)),
            vec![Signal::Hold, Signal::Hold]
        );
    }

    #[test]
    fn ema_tie_is_hold() {
        let f = frame(vec![100.0], vec![100.0], vec![50.0]);
        assert_eq!(generate_signals(&f, &params(70.0, 30.0)), vec![Signal::Hold]);
    }

    #[test]
    fn each_row_independent() {
        let f = frame(
            vec![101.0, 99.0, 100.0],
            vec![100.0, 100.0, 100.0],
            vec![50.0, 50.0, 50.0],
        );
        assert_eq!(
            generate_signals(&f, &params(70.0, 30.0)),
            vec![Signal::Buy, Signal::Sell, Signal::Hold]
        );
    }

    #[test]
    fn direction_values() {
        assert_eq!(Signal::Buy.direction(), 1.0);
        assert_eq!(Signal::Hold.direction(), 0.0);
        assert_eq!(Signal::Sell.direction(), -1.0);
    }

    #[test]
    fn display_labels() {
        assert_eq!(Signal::Buy.to_string(), "Buy");
        assert_eq!(Signal::Sell.to_string(), "Sell");
        assert_eq!(Signal::Hold.to_string(), "Hold");
    }
}
