//! Backtest run parameters.

use serde::{Deserialize, Serialize};

use super::error::CandlelabError;

/// How the quantity of a new position is derived from capital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSizing {
    /// `position_size × initial_capital / price` — constant notional per trade.
    Fixed,
    /// `position_size × current_cash / price` — compounds with the account.
    Percentage,
}

/// Immutable parameters for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    /// Commission as a fraction of notional, e.g. 0.001 = 0.1%.
    pub commission_rate: f64,
    /// Slippage as a fraction of price, applied against the trader on both sides.
    pub slippage_rate: f64,
    pub position_sizing: PositionSizing,
    /// Fraction of capital per trade, in (0, 1].
    pub position_size: f64,
    pub max_positions: usize,
    /// Fixed-percentage stop distance, e.g. 0.02 = 2% below entry.
    pub stop_loss_pct: f64,
    /// Fixed-percentage target distance, e.g. 0.04 = 4% above entry.
    pub take_profit_pct: f64,
    /// When true, stops are scaled from ATR(14) instead of fixed percentages.
    pub use_atr_stops: bool,
    pub atr_stop_multiplier: f64,
    pub atr_profit_multiplier: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 10_000.0,
            commission_rate: 0.001,
            slippage_rate: 0.0005,
            position_sizing: PositionSizing::Fixed,
            position_size: 0.1,
            max_positions: 1,
            stop_loss_pct: 0.02,
            take_profit_pct: 0.04,
            use_atr_stops: true,
            atr_stop_multiplier: 2.0,
            atr_profit_multiplier: 3.0,
        }
    }
}

impl BacktestConfig {
    /// Reject malformed parameters before a run starts.
    pub fn validate(&self) -> Result<(), CandlelabError> {
        fn invalid(field: &str, reason: &str) -> CandlelabError {
            CandlelabError::ConfigInvalid {
                field: field.into(),
                reason: reason.into(),
            }
        }

        if !(self.initial_capital > 0.0) {
            return Err(invalid("initial_capital", "must be positive"));
        }
        if self.commission_rate < 0.0 {
            return Err(invalid("commission_rate", "must be non-negative"));
        }
        if self.slippage_rate < 0.0 {
            return Err(invalid("slippage_rate", "must be non-negative"));
        }
        if !(self.position_size > 0.0 && self.position_size <= 1.0) {
            return Err(invalid("position_size", "must be in (0, 1]"));
        }
        if self.max_positions == 0 {
            return Err(invalid("max_positions", "must be at least 1"));
        }
        if self.stop_loss_pct < 0.0 {
            return Err(invalid("stop_loss_pct", "must be non-negative"));
        }
        if self.take_profit_pct < 0.0 {
            return Err(invalid("take_profit_pct", "must be non-negative"));
        }
        if self.atr_stop_multiplier < 0.0 {
            return Err(invalid("atr_stop_multiplier", "must be non-negative"));
        }
        if self.atr_profit_multiplier < 0.0 {
            return Err(invalid("atr_profit_multiplier", "must be non-negative"));
        }
        Ok(())
    }
}
