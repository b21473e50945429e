//! RSI mean reversion: buy oversold, sell overbought.

use crate::domain::bar::{closes, PriceBar};
use crate::domain::indicator::rsi;
use crate::domain::signal::{Signal, Strategy, StrategyError};

#[derive(Debug, Clone)]
pub struct RsiReversion {
    pub low: f64,
    pub high: f64,
    pub period: usize,
}

impl Default for RsiReversion {
    fn default() -> Self {
        RsiReversion {
            low: 30.0,
            high: 70.0,
            period: 14,
        }
    }
}

impl RsiReversion {
    pub fn new(low: f64, high: f64, period: usize) -> Self {
        RsiReversion { low, high, period }
    }
}

impl Strategy for RsiReversion {
    fn name(&self) -> &'static str {
        "rsi_reversion"
    }

    fn signal(&self, window: &[PriceBar]) -> Result<Signal, StrategyError> {
        if self.low >= self.high {
            return Err(StrategyError::new("low threshold must be below high"));
        }

        let prices = closes(window);
        let values = rsi(&prices, self.period);
        let Some(&value) = values.last() else {
            return Ok(Signal::Hold);
        };
        if value.is_nan() {
            return Ok(Signal::Hold);
        }

        Ok(if value <= self.low {
            Signal::Buy
        } else if value >= self.high {
            Signal::Sell
        } else {
            Signal::Hold
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_bars(prices: &[f64]) -> Vec<PriceBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(15 * i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn oversold_emits_buy() {
        let strategy = RsiReversion::default();
        let prices: Vec<f64> = (0..30).map(|i| 200.0 - 3.0 * i as f64).collect();
        let bars = make_bars(&prices);
        assert_eq!(strategy.signal(&bars).unwrap(), Signal::Buy);
    }

    #[test]
    fn overbought_emits_sell() {
        let strategy = RsiReversion::default();
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + 3.0 * i as f64).collect();
        let bars = make_bars(&prices);
        assert_eq!(strategy.signal(&bars).unwrap(), Signal::Sell);
    }

    #[test]
    fn holds_before_warmup() {
        let strategy = RsiReversion::default();
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        assert_eq!(strategy.signal(&bars).unwrap(), Signal::Hold);
    }

    #[test]
    fn holds_in_neutral_band() {
        let strategy = RsiReversion::default();
        // Balanced zig-zag keeps RSI near 50.
        let mut prices = vec![100.0];
        for i in 0..30 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        let bars = make_bars(&prices);
        assert_eq!(strategy.signal(&bars).unwrap(), Signal::Hold);
    }

    #[test]
    fn inverted_thresholds_error() {
        let strategy = RsiReversion::new(70.0, 30.0, 14);
        let bars = make_bars(&[100.0, 101.0]);
        assert!(strategy.signal(&bars).is_err());
    }
}
