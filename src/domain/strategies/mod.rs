//! Built-in strategies and the id → implementation registry.
//!
//! The engine never sees these by name; callers resolve an identifier here
//! and hand the boxed [`Strategy`] to the engine.

pub mod sma_crossover;
pub mod rsi_reversion;
pub mod bb_breakout;

pub use bb_breakout::BbBreakout;
pub use rsi_reversion::RsiReversion;
pub use sma_crossover::SmaCrossover;

use super::signal::Strategy;

/// Identifiers accepted by [`from_id`].
pub const STRATEGY_IDS: &[&str] = &["sma_crossover", "rsi_reversion", "bb_breakout"];

/// Resolve a strategy identifier to a default-parameter implementation.
pub fn from_id(id: &str) -> Option<Box<dyn Strategy>> {
    match id {
        "sma_crossover" => Some(Box::new(SmaCrossover::default())),
        "rsi_reversion" => Some(Box::new(RsiReversion::default())),
        "bb_breakout" => Some(Box::new(BbBreakout::default())),
        _ => None,
    }
}
