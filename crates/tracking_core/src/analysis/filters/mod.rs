//! # Signal Filters
//!
//! Building blocks of the speed-cleaning chain: quantile clipping, a
//! centered rolling median and a Savitzky–Golay smoother.
//!
//! Every filter degrades to returning its input unchanged when the sequence
//! is shorter than its window, so a short match snippet never fails the
//! whole pipeline.

pub mod rolling_median;
pub mod savgol;

pub use rolling_median::{median, rolling_median, EdgeMode};
pub use savgol::{savgol_coefficients, savgol_filter};

/// Quantile with linear interpolation between closest ranks.
///
/// Non-finite samples are ignored; an empty input yields 0.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Clamp every sample to at most `ceiling`.
pub fn clip_upper(values: &[f64], ceiling: f64) -> Vec<f64> {
    values.iter().map(|&v| v.min(ceiling)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&values, 0.5), 3.0);
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 5.0);
        // pos = 4 * 0.95 = 3.8
        assert!((quantile(&values, 0.95) - 4.8).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_ignores_nan_and_handles_empty() {
        assert_eq!(quantile(&[f64::NAN, 2.0, f64::NAN], 0.95), 2.0);
        assert_eq!(quantile(&[], 0.95), 0.0);
    }

    #[test]
    fn test_quantile_is_order_independent() {
        let a = [9.0, 1.0, 5.0, 3.0];
        let b = [1.0, 3.0, 5.0, 9.0];
        assert_eq!(quantile(&a, 0.95), quantile(&b, 0.95));
    }

    #[test]
    fn test_clip_upper() {
        assert_eq!(clip_upper(&[1.0, 10.0, 3.0], 5.0), vec![1.0, 5.0, 3.0]);
    }
}
