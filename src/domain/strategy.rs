//! Strategy parameter set.

use crate::domain::execution::ExecutionMode;

/// Immutable parameters for one evaluation run. Each run gets its own copy;
/// nothing here is shared or mutated, so concurrent evaluations with
/// different parameter sets cannot interfere.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub short_period: usize,
    pub long_period: usize,
    pub rsi_period: usize,
    pub overbought: f64,
    pub oversold: f64,
    pub execution_mode: ExecutionMode,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            short_period: 20,
            long_period: 50,
            rsi_period: 14,
            overbought: 70.0,
            oversold: 30.0,
            execution_mode: ExecutionMode::HoldUntilExit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = StrategyParams::default();
        assert_eq!(p.short_period, 20);
        assert_eq!(p.long_period, 50);
        assert_eq!(p.rsi_period, 14);
        assert!((p.overbought - 70.0).abs() < f64::EPSILON);
        assert!((p.oversold - 30.0).abs() < f64::EPSILON);
        assert_eq!(p.execution_mode, ExecutionMode::HoldUntilExit);
    }

    #[test]
    fn params_are_plain_data() {
        let p = StrategyParams {
            short_period: 2,
            long_period: 3,
            rsi_period: 2,
            ..StrategyParams::default()
        };
        let q = p.clone();
        assert_eq!(p, q);
    }
}
