//! Player card statistics: total distance, top speed and sprint count.

use super::round2;
use crate::config::AggregationConfig;
use crate::models::{DerivedSeries, PlayerId, PlayerSummary, TeamId};

/// Coarse sprint count used on the player card: frames strictly above the
/// sprint threshold, in blocks of `frames_per_sprint` (1 s at 25 Hz).
///
/// This measures time spent sprinting rather than discrete efforts; see
/// [`crate::analysis::events::extract_sprints`] for segment detection.
pub fn sprint_count(series: &DerivedSeries, cfg: &AggregationConfig) -> u32 {
    let frames = series
        .speed
        .iter()
        .filter(|&&s| s > cfg.sprint_threshold_kmh)
        .count();
    (frames / cfg.frames_per_sprint.max(1)) as u32
}

/// Total distance in km, 2 decimals.
pub fn total_distance_km(series: &DerivedSeries) -> f64 {
    round2(series.total_distance_m() / 1000.0)
}

/// Top speed in km/h, 2 decimals.
pub fn top_speed_kmh(series: &DerivedSeries) -> f64 {
    round2(series.top_speed_kmh())
}

pub fn player_summary(
    team: TeamId,
    player: PlayerId,
    series: &DerivedSeries,
    cfg: &AggregationConfig,
) -> PlayerSummary {
    PlayerSummary {
        team,
        player,
        total_distance_km: total_distance_km(series),
        top_speed_kmh: top_speed_kmh(series),
        sprint_count: sprint_count(series, cfg),
    }
}
