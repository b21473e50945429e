//! Relative Strength Index.
//!
//! Wilder's smoothing of average gain and loss:
//! - first averages: simple mean over the first `period` deltas
//! - then: avg = (prev_avg·(period-1) + current) / period
//!
//! RSI = 100 − 100/(1 + avg_gain/(avg_loss + ε)), ε = 1e-12 guards the
//! all-gains case. Warmup: first `period` outputs are NaN (a delta needs
//! two observations).

const EPSILON: f64 = 1e-12;

pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);
    for w in values.windows(2) {
        let change = w[1] - w[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period as f64;
    out[period] = to_rsi(avg_gain, avg_loss);

    for i in (period + 1)..values.len() {
        let d = i - 1;
        avg_gain = (avg_gain * (period - 1) as f64 + gains[d]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[d]) / period as f64;
        out[i] = to_rsi(avg_gain, avg_loss);
    }
    out
}

fn to_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / (avg_loss + EPSILON);
    100.0 - 100.0 / (1.0 + rs)
}
