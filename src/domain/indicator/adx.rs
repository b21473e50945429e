//! Trend-strength oscillator (ADX-style).
//!
//! +DM[i] = max(high[i] − high[i-1], 0), −DM[i] = max(low[i-1] − low[i], 0).
//! DI = 100 · rolling-sum(DM, period) / rolling-sum(TR, period);
//! DX = 100 · |+DI − −DI| / (+DI + −DI), NaN where the TR sum or the
//! directional sum is zero. ADX is the trailing mean of DX over `period`,
//! defined only where the whole DX window is defined — so the full warmup
//! is roughly 2·period bars.

use crate::domain::bar::PriceBar;

use super::atr::true_range;

pub fn adx(bars: &[PriceBar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut out = vec![f64::NAN; n];
    if period == 0 || n < period {
        return out;
    }

    let tr = true_range(bars);
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    for i in 1..n {
        plus_dm[i] = (bars[i].high - bars[i - 1].high).max(0.0);
        minus_dm[i] = (bars[i - 1].low - bars[i].low).max(0.0);
    }

    let mut dx = vec![f64::NAN; n];
    for i in (period - 1)..n {
        let s = i + 1 - period;
        let tr_sum: f64 = tr[s..=i].iter().sum();
        if tr_sum == 0.0 {
            continue;
        }
        let plus_di = 100.0 * plus_dm[s..=i].iter().sum::<f64>() / tr_sum;
        let minus_di = 100.0 * minus_dm[s..=i].iter().sum::<f64>() / tr_sum;
        let di_sum = plus_di + minus_di;
        if di_sum == 0.0 {
            continue;
        }
        dx[i] = (plus_di - minus_di).abs() / di_sum * 100.0;
    }

    for i in (period - 1)..n {
        let window = &dx[i + 1 - period..=i];
        if window.iter().all(|v| v.is_finite()) {
            out[i] = window.iter().sum::<f64>() / period as f64;
        }
    }
    out
}
