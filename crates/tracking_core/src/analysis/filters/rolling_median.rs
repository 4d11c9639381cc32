//! Centered rolling median.
//!
//! Resistant to isolated spikes (a single glitch frame never moves the
//! median of a 31-frame window) while keeping step edges sharper than a
//! moving average would.

use serde::{Deserialize, Serialize};

/// Treatment of samples whose centered window runs past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Use the part of the window that lies inside the sequence.
    #[default]
    Shrink,
    /// Emit 0 where the full window does not fit.
    ZeroFill,
}

/// Median of a slice (sorts a copy). Even lengths average the middle pair.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Centered rolling median over `window` samples.
///
/// Sequences shorter than the window are returned unchanged.
pub fn rolling_median(values: &[f64], window: usize, edge: EdgeMode) -> Vec<f64> {
    let n = values.len();
    if window <= 1 || n < window {
        return values.to_vec();
    }

    let half = window / 2;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let fits = i >= half && i + half < n;
        let value = match edge {
            EdgeMode::ZeroFill if !fits => 0.0,
            _ => {
                let start = i.saturating_sub(half);
                let end = (i + half + 1).min(n);
                median(&values[start..end])
            }
        };
        out.push(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_removes_single_spike() {
        let mut values = vec![20.0; 50];
        values[25] = 80.0;
        let out = rolling_median(&values, 31, EdgeMode::Shrink);
        assert!(out.iter().all(|&v| v == 20.0));
    }

    #[test]
    fn test_zero_fill_edges() {
        let values = vec![5.0; 40];
        let out = rolling_median(&values, 31, EdgeMode::ZeroFill);
        assert!(out[..15].iter().all(|&v| v == 0.0));
        assert!(out[15..25].iter().all(|&v| v == 5.0));
        assert!(out[25..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_shrink_edges_use_partial_window() {
        let values = [0.0, 10.0, 10.0, 10.0, 10.0];
        let out = rolling_median(&values, 3, EdgeMode::Shrink);
        assert_eq!(out, vec![5.0, 10.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_short_input_falls_back() {
        let values = [1.0, 9.0, 2.0];
        assert_eq!(rolling_median(&values, 31, EdgeMode::ZeroFill), values.to_vec());
        assert_eq!(rolling_median(&values, 31, EdgeMode::Shrink), values.to_vec());
    }
}
