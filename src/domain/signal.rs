//! The strategy capability the engine consumes.
//!
//! A strategy is a decision oracle over a read-only window of bars ending at
//! the current one. The engine depends on nothing else about it; a registry
//! outside the engine maps string identifiers to implementations.

use std::fmt;

use super::bar::PriceBar;

/// Discrete action emitted for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// A strategy failure on one bar. The engine recovers it as HOLD; it never
/// aborts a run.
#[derive(Debug, Clone, thiserror::Error)]
#[error("strategy error: {message}")]
pub struct StrategyError {
    pub message: String,
}

impl StrategyError {
    pub fn new(message: impl Into<String>) -> Self {
        StrategyError {
            message: message.into(),
        }
    }
}

/// Pluggable signal function: `(window ending at bar i) -> {BUY, SELL, HOLD}`.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Decide an action from the bars up to and including the current one.
    /// Must not assume any particular window length.
    fn signal(&self, window: &[PriceBar]) -> Result<Signal, StrategyError>;
}
