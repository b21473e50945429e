//! Exponential Moving Average.
//!
//! α = 2/(span+1), seeded with the first value, no warm-up bias correction:
//! EMA[0] = x[0], EMA[i] = α·x[i] + (1-α)·EMA[i-1].
//! Defined from index 0.

/// Recursive exponential smoothing over `span`.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if span == 0 || values.is_empty() {
        return out;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut current = values[0];
    out[0] = current;
    for i in 1..values.len() {
        current = alpha * values[i] + (1.0 - alpha) * current;
        out[i] = current;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ema_seeded_with_first_value() {
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_abs_diff_eq!(out[0], 10.0);
    }

    #[test]
    fn ema_recursive_calculation() {
        let out = ema(&[10.0, 20.0, 30.0], 3);
        let alpha = 2.0 / 4.0;

        let e1 = alpha * 20.0 + (1.0 - alpha) * 10.0;
        assert_abs_diff_eq!(out[1], e1, epsilon = 1e-12);

        let e2 = alpha * 30.0 + (1.0 - alpha) * e1;
        assert_abs_diff_eq!(out[2], e2, epsilon = 1e-12);
    }

    #[test]
    fn ema_constant_series_is_constant() {
        let out = ema(&[100.0; 5], 3);
        for v in out {
            assert_abs_diff_eq!(v, 100.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn ema_span_one_tracks_input() {
        let values = [3.0, 1.0, 4.0, 1.5];
        let out = ema(&values, 1);
        for (a, b) in out.iter().zip(values.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn ema_reacts_faster_than_sma() {
        // Step up: EMA should sit above the trailing SMA after the jump.
        let values = [10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
        let e = ema(&values, 5);
        let s = super::super::sma(&values, 5);
        assert!(e[7] > s[7]);
    }

    #[test]
    fn ema_zero_span_all_nan() {
        assert!(ema(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 3).is_empty());
    }
}
