//! Property tests for the kinematics pipeline and aggregator invariants.

use proptest::prelude::*;
use tracking_core::analysis::filters::{clip_upper, quantile};
use tracking_core::analysis::kinematics::{clip_ceiling, raw_speeds, step_distances};
use tracking_core::config::{AggregationConfig, KinematicsConfig};
use tracking_core::{
    extract, ranked_leaderboard, zone_percentages, PlayerId, PlayerTrack, TeamId, TrackingTable,
};

fn walk(steps: &[(f64, f64)]) -> PlayerTrack {
    let mut x = vec![52.5];
    let mut y = vec![34.0];
    for &(dx, dy) in steps {
        x.push(x[x.len() - 1] + dx);
        y.push(y[y.len() - 1] + dy);
    }
    PlayerTrack::new(TeamId::Home, PlayerId(1), x, y).unwrap()
}

fn steps_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1.5f64..1.5, -1.5f64..1.5), 0..400)
}

proptest! {
    /// Property: derived series are aligned with positions, finite and non-negative
    #[test]
    fn prop_series_shape(steps in steps_strategy()) {
        let track = walk(&steps);
        let series = extract(&track, &KinematicsConfig::default());

        prop_assert_eq!(series.distance.len(), track.len());
        prop_assert_eq!(series.speed.len(), track.len());
        prop_assert_eq!(series.distance[0], 0.0);
        prop_assert!(series.distance.iter().all(|d| d.is_finite() && *d >= 0.0));
        prop_assert!(series.speed.iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    /// Property: extraction is idempotent
    #[test]
    fn prop_extract_idempotent(steps in steps_strategy()) {
        let track = walk(&steps);
        let cfg = KinematicsConfig::default();
        let first = extract(&track, &cfg);
        let second = extract(&track, &cfg);
        prop_assert_eq!(first, second);
    }

    /// Property: nothing survives clipping above 1.5 * q95 of the raw speed
    #[test]
    fn prop_clipping_law(steps in steps_strategy()) {
        let track = walk(&steps);
        let cfg = KinematicsConfig::default();
        let raw = raw_speeds(&step_distances(&track), cfg.dt);
        let bound = 1.5 * quantile(&raw, 0.95);
        let clipped = clip_upper(&raw, clip_ceiling(&raw, &cfg));
        prop_assert!(clipped.iter().all(|&v| v <= bound));
    }

    /// Property: zone shares add up to 100 whenever the player moved
    #[test]
    fn prop_zone_percentages_sum(steps in steps_strategy()) {
        let series = extract(&walk(&steps), &KinematicsConfig::default());
        let zones = zone_percentages(&series, &AggregationConfig::default());
        if series.total_distance_m() > 0.0 {
            prop_assert!((zones.total() - 100.0).abs() <= 0.5, "total {}", zones.total());
        } else {
            prop_assert_eq!(zones.total(), 0.0);
        }
    }

    /// Property: the distance leaderboard starts with the player who covered the most ground
    #[test]
    fn prop_leaderboard_leader(scales in prop::collection::vec(0.0f64..2.0, 1..8)) {
        let frames = 80;
        let mut table = TrackingTable::new(TeamId::Away, frames);
        for (i, scale) in scales.iter().enumerate() {
            let series = tracking_core::DerivedSeries::new(
                vec![*scale; frames],
                vec![10.0; frames],
            ).unwrap();
            table.publish(PlayerId(i as u32 + 1), &series).unwrap();
        }

        let rows = ranked_leaderboard(&table, &AggregationConfig::default());
        let best = rows.iter().map(|r| r.total_distance_km).fold(f64::MIN, f64::max);
        prop_assert_eq!(rows.len(), scales.len());
        prop_assert_eq!(rows[0].total_distance_km, best);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].total_distance_km >= pair[1].total_distance_km);
            if pair[0].total_distance_km == pair[1].total_distance_km {
                prop_assert!(pair[0].player < pair[1].player);
            }
        }
    }
}
