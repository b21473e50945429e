//! Volatility bands around a moving average.
//!
//! Middle = SMA(window); upper/lower = middle ± k·stddev, where stddev is
//! the sample standard deviation (N−1) of the trailing window. Width is
//! (upper − lower) / middle, the normalized band spread breakout logic uses
//! to detect a squeeze.
//!
//! Warmup: first (window-1) outputs are NaN; window must be ≥ 2 for a
//! sample deviation to exist.

use super::sma::sma;

/// Four aligned series, one value each per input index.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    pub width: Vec<f64>,
}

pub fn bollinger(values: &[f64], window: usize, k: f64) -> Bands {
    let n = values.len();
    let middle = sma(values, window);
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    let mut width = vec![f64::NAN; n];

    if window >= 2 && n >= window {
        for i in (window - 1)..n {
            let slice = &values[i + 1 - window..=i];
            let mean = middle[i];
            let variance =
                slice.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (window - 1) as f64;
            let sd = variance.sqrt();
            upper[i] = mean + k * sd;
            lower[i] = mean - k * sd;
            width[i] = (upper[i] - lower[i]) / mean;
        }
    }

    Bands {
        upper,
        middle,
        lower,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bollinger_warmup() {
        let bands = bollinger(&[10.0, 20.0, 30.0, 40.0, 50.0], 3, 2.0);
        assert!(bands.upper[0].is_nan());
        assert!(bands.upper[1].is_nan());
        assert!(bands.upper[2].is_finite());
    }

    #[test]
    fn bollinger_middle_is_sma() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let bands = bollinger(&values, 3, 2.0);
        let reference = sma(&values, 3);
        for i in 2..5 {
            assert_abs_diff_eq!(bands.middle[i], reference[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn bollinger_band_ordering() {
        let values = [10.0, 12.0, 11.0, 13.0, 12.5, 14.0];
        let bands = bollinger(&values, 3, 2.0);
        for i in 2..values.len() {
            assert!(bands.upper[i] > bands.middle[i]);
            assert!(bands.lower[i] < bands.middle[i]);
        }
    }

    #[test]
    fn bollinger_sample_stddev() {
        // window [10, 20, 30]: mean 20, sample variance (100+0+100)/2 = 100
        let bands = bollinger(&[10.0, 20.0, 30.0], 3, 2.0);
        assert_abs_diff_eq!(bands.upper[2], 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bands.lower[2], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn bollinger_width_normalized_by_middle() {
        let bands = bollinger(&[10.0, 20.0, 30.0], 3, 2.0);
        // (40 - 0) / 20 = 2.0
        assert_abs_diff_eq!(bands.width[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn bollinger_flat_series_zero_width() {
        let bands = bollinger(&[100.0; 5], 3, 2.0);
        for i in 2..5 {
            assert_abs_diff_eq!(bands.width[i], 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(bands.upper[i], bands.lower[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn bollinger_window_one_all_nan_bands() {
        let bands = bollinger(&[1.0, 2.0, 3.0], 1, 2.0);
        assert!(bands.upper.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn bollinger_output_lengths_match_input() {
        let bands = bollinger(&[1.0, 2.0, 3.0, 4.0], 2, 2.0);
        assert_eq!(bands.upper.len(), 4);
        assert_eq!(bands.middle.len(), 4);
        assert_eq!(bands.lower.len(), 4);
        assert_eq!(bands.width.len(), 4);
    }
}
