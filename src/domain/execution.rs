//! Signal-to-position translation under the two execution policies.
//!
//! Both policies produce a pre-shift stance per bar, then the whole sequence
//! is delayed by exactly one bar: the stance held during bar t was decided
//! from the signal at t-1 (next-bar execution). Index 0 therefore carries no
//! prior information and is always `Flat`.

use crate::domain::signal::Signal;
use std::fmt;
use std::str::FromStr;

/// How signals become positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Position mirrors the raw signal bar-for-bar; a Hold signal goes flat.
    FlipOnSignal,
    /// Position carries the most recent non-Hold signal forward; a Hold
    /// signal leaves the held position unchanged.
    HoldUntilExit,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::FlipOnSignal => write!(f, "flip_on_signal"),
            ExecutionMode::HoldUntilExit => write!(f, "hold_until_exit"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flip_on_signal" => Ok(ExecutionMode::FlipOnSignal),
            "hold_until_exit" => Ok(ExecutionMode::HoldUntilExit),
            other => Err(format!(
                "unknown execution mode '{other}' (expected flip_on_signal or hold_until_exit)"
            )),
        }
    }
}

/// Market exposure held during one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Long,
    Flat,
    Short,
}

impl Stance {
    /// Signed exposure: +1 long, 0 flat, -1 short.
    pub fn direction(self) -> f64 {
        match self {
            Stance::Long => 1.0,
            Stance::Flat => 0.0,
            Stance::Short => -1.0,
        }
    }
}

impl From<Signal> for Stance {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Buy => Stance::Long,
            Signal::Hold => Stance::Flat,
            Signal::Sell => Stance::Short,
        }
    }
}

/// One stance per bar, already lagged one bar behind the signals.
///
/// HoldUntilExit is the one genuinely sequential step in the engine: an
/// explicit fold over the signals with a single last-active-signal
/// accumulator, never vectorized across time.
pub fn resolve_positions(signals: &[Signal], mode: ExecutionMode) -> Vec<Stance> {
    let pre_shift: Vec<Stance> = match mode {
        ExecutionMode::FlipOnSignal => signals.iter().map(|&s| Stance::from(s)).collect(),
        ExecutionMode::HoldUntilExit => {
            let mut held = Stance::Flat;
            signals
                .iter()
                .map(|&signal| {
                    if signal.is_active() {
                        held = Stance::from(signal);
                    }
                    held
                })
                .collect()
        }
    };

    let mut positions = Vec::with_capacity(signals.len());
    if !pre_shift.is_empty() {
        positions.push(Stance::Flat);
        positions.extend_from_slice(&pre_shift[..pre_shift.len() - 1]);
    }
    positions
}
