//! # Speed Zones
//!
//! Work-rate distribution: the share of a player's distance covered in each
//! of the five speed bands.
//!
//! | Zone      | km/h       |
//! |-----------|------------|
//! | Walking   | [0, 7)     |
//! | Jogging   | [7, 15)    |
//! | Running   | [15, 20)   |
//! | HSR       | [20, 25)   |
//! | Sprinting | [25, ∞)    |

use super::round2;
use crate::config::AggregationConfig;
use crate::models::{DerivedSeries, SpeedZone, ZoneBreakdown};

/// Zone of a single speed sample under configured bounds.
pub fn classify(speed_kmh: f64, bounds: &[f64; 4]) -> SpeedZone {
    SpeedZone::classify_with(speed_kmh, bounds)
}

/// Lower/upper bound of a zone under configured bounds.
pub fn zone_range(zone: SpeedZone, bounds: &[f64; 4]) -> (f64, f64) {
    zone.bounds_with(bounds)
}

/// Percentage of total distance covered in each zone, rounded to 2 decimals.
///
/// A player who never moved gets 0.0 in every zone.
pub fn zone_percentages(series: &DerivedSeries, cfg: &AggregationConfig) -> ZoneBreakdown {
    let total = series.total_distance_m();
    if !(total > 0.0) {
        return ZoneBreakdown::default();
    }

    let mut sums = [0.0f64; 5];
    for (&d, &s) in series.distance.iter().zip(&series.speed) {
        let zone = classify(s, &cfg.zone_bounds_kmh);
        sums[zone as usize] += d;
    }
    ZoneBreakdown::from_array(sums.map(|sum| round2(sum / total * 100.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: [f64; 4] = [7.0, 15.0, 20.0, 25.0];

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0, &BOUNDS), SpeedZone::Walking);
        assert_eq!(classify(6.99, &BOUNDS), SpeedZone::Walking);
        assert_eq!(classify(7.0, &BOUNDS), SpeedZone::Jogging);
        assert_eq!(classify(15.0, &BOUNDS), SpeedZone::Running);
        assert_eq!(classify(20.0, &BOUNDS), SpeedZone::Hsr);
        assert_eq!(classify(24.999, &BOUNDS), SpeedZone::Hsr);
        assert_eq!(classify(25.0, &BOUNDS), SpeedZone::Sprinting);
        assert_eq!(classify(450.0, &BOUNDS), SpeedZone::Sprinting);
        assert_eq!(classify(f64::NAN, &BOUNDS), SpeedZone::Walking);
    }

    #[test]
    fn test_zone_range() {
        assert_eq!(zone_range(SpeedZone::Walking, &BOUNDS), (0.0, 7.0));
        assert_eq!(zone_range(SpeedZone::Hsr, &BOUNDS), (20.0, 25.0));
        assert_eq!(zone_range(SpeedZone::Sprinting, &BOUNDS), (25.0, f64::INFINITY));
    }

    #[test]
    fn test_percentages_split_by_distance() {
        let series = DerivedSeries::new(
            vec![0.0, 1.0, 1.0, 2.0],
            vec![0.0, 5.0, 10.0, 30.0],
        )
        .unwrap();
        let zones = zone_percentages(&series, &AggregationConfig::default());
        assert_eq!(zones.walking, 25.0);
        assert_eq!(zones.jogging, 25.0);
        assert_eq!(zones.running, 0.0);
        assert_eq!(zones.hsr, 0.0);
        assert_eq!(zones.sprinting, 50.0);
    }

    #[test]
    fn test_zero_distance_reports_zero_everywhere() {
        let series = DerivedSeries::new(vec![0.0; 10], vec![0.0; 10]).unwrap();
        let zones = zone_percentages(&series, &AggregationConfig::default());
        assert_eq!(zones, ZoneBreakdown::default());
        assert_eq!(zone_percentages(&DerivedSeries::default(), &AggregationConfig::default()).total(), 0.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let series = DerivedSeries::new(vec![1.0, 1.0, 1.0], vec![1.0, 8.0, 16.0]).unwrap();
        let zones = zone_percentages(&series, &AggregationConfig::default());
        assert_eq!(zones.walking, 33.33);
        assert_eq!(zones.jogging, 33.33);
        assert_eq!(zones.running, 33.33);
        assert!((zones.total() - 100.0).abs() <= 0.5);
    }
}
