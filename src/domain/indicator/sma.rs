//! Simple Moving Average.
//!
//! Arithmetic mean of the trailing `window` values.
//! Warmup: first (window-1) outputs are NaN.

/// Trailing-window arithmetic mean.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = sum / window as f64;
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = sum / window as f64;
    }
    out
}
