//! SMA crossover: buy on golden cross, sell on dead cross.

use crate::domain::bar::{closes, PriceBar};
use crate::domain::indicator::sma;
use crate::domain::signal::{Signal, Strategy, StrategyError};

#[derive(Debug, Clone)]
pub struct SmaCrossover {
    pub short: usize,
    pub long: usize,
}

impl Default for SmaCrossover {
    fn default() -> Self {
        SmaCrossover { short: 20, long: 50 }
    }
}

impl SmaCrossover {
    pub fn new(short: usize, long: usize) -> Self {
        SmaCrossover { short, long }
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> &'static str {
        "sma_crossover"
    }

    fn signal(&self, window: &[PriceBar]) -> Result<Signal, StrategyError> {
        if self.short >= self.long {
            return Err(StrategyError::new("short period must be below long"));
        }
        let n = window.len();
        if n < 2 {
            return Ok(Signal::Hold);
        }

        let prices = closes(window);
        let fast = sma(&prices, self.short);
        let slow = sma(&prices, self.long);

        if slow[n - 1].is_nan() {
            return Ok(Signal::Hold);
        }

        // A NaN comparison is false, so an undefined previous diff counts
        // as "not above" — the first defined bar can itself be a cross.
        let now_above = fast[n - 1] - slow[n - 1] > 0.0;
        let prev_above = fast[n - 2] - slow[n - 2] > 0.0;

        Ok(if now_above && !prev_above {
            Signal::Buy
        } else if !now_above && prev_above {
            Signal::Sell
        } else {
            Signal::Hold
        })
    }
}
