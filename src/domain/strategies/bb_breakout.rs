//! Band breakout out of a squeeze.
//!
//! Buys a close above the upper band when the previous bar's normalized band
//! width was below the squeeze threshold; sells symmetric below the lower
//! band. A squeeze marks compressed volatility — range expansion out of it
//! tends to follow through.

use crate::domain::bar::{closes, PriceBar};
use crate::domain::indicator::bollinger;
use crate::domain::signal::{Signal, Strategy, StrategyError};

#[derive(Debug, Clone)]
pub struct BbBreakout {
    pub window: usize,
    pub k: f64,
    pub squeeze: f64,
}

impl Default for BbBreakout {
    fn default() -> Self {
        BbBreakout {
            window: 20,
            k: 2.0,
            squeeze: 0.06,
        }
    }
}

impl BbBreakout {
    pub fn new(window: usize, k: f64, squeeze: f64) -> Self {
        BbBreakout { window, k, squeeze }
    }
}

impl Strategy for BbBreakout {
    fn name(&self) -> &'static str {
        "bb_breakout"
    }

    fn signal(&self, window: &[PriceBar]) -> Result<Signal, StrategyError> {
        if self.window < 2 {
            return Err(StrategyError::new("band window must be at least 2"));
        }
        let n = window.len();
        if n < 2 {
            return Ok(Signal::Hold);
        }

        let prices = closes(window);
        let bands = bollinger(&prices, self.window, self.k);
        let prev_width = bands.width[n - 2];
        if bands.upper[n - 1].is_nan() || prev_width.is_nan() {
            return Ok(Signal::Hold);
        }

        let close = prices[n - 1];
        let squeezed = prev_width < self.squeeze;

        Ok(if squeezed && close > bands.upper[n - 1] {
            Signal::Buy
        } else if squeezed && close < bands.lower[n - 1] {
            Signal::Sell
        } else {
            Signal::Hold
        })
    }
}
