//! True range and its trailing average (ATR).
//!
//! TR[i] = max(high−low, |high−prev_close|, |low−prev_close|); the first bar
//! has no prior close, so TR[0] = high − low. ATR is the trailing mean of TR
//! over `period`, NaN for the first (period-1) bars.

use crate::domain::bar::PriceBar;

use super::sma::sma;

/// Per-bar true range.
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}

/// Trailing mean of true range — the volatility unit for ATR-scaled stops.
pub fn atr(bars: &[PriceBar], period: usize) -> Vec<f64> {
    sma(&true_range(bars), period)
}
