//! # Team Leaderboard
//!
//! One summary row per player with a published speed series. Players are
//! discovered from the table itself, not from a roster.

use super::player_card::player_summary;
use crate::config::AggregationConfig;
use crate::models::{PlayerSummary, TrackingTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PlayerId,
    TotalDistance,
    TopSpeed,
    SprintCount,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "player" | "player_id" | "id" => Ok(SortKey::PlayerId),
            "distance" | "total_distance" => Ok(SortKey::TotalDistance),
            "speed" | "top_speed" => Ok(SortKey::TopSpeed),
            "sprints" | "sprint_count" => Ok(SortKey::SprintCount),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Summaries for every player with a published speed series, in enumeration
/// (ascending id) order. Players whose distance column is missing are left
/// out rather than reported with partial values.
pub fn team_leaderboard(table: &TrackingTable, cfg: &AggregationConfig) -> Vec<PlayerSummary> {
    table
        .players_with_speed()
        .into_iter()
        .filter_map(|player| match table.derived(player) {
            Ok(series) => Some(player_summary(table.team(), player, &series, cfg)),
            Err(err) => {
                warn!(team = %table.team(), player = %player, error = %err, "excluded from leaderboard");
                None
            }
        })
        .collect()
}

fn compare(a: &PlayerSummary, b: &PlayerSummary, key: SortKey) -> Ordering {
    match key {
        SortKey::PlayerId => a.player.cmp(&b.player),
        SortKey::TotalDistance => a.total_distance_km.total_cmp(&b.total_distance_km),
        SortKey::TopSpeed => a.top_speed_kmh.total_cmp(&b.top_speed_kmh),
        SortKey::SprintCount => a.sprint_count.cmp(&b.sprint_count),
    }
}

/// Stable sort: rows that compare equal keep their current order.
pub fn sort_leaderboard(rows: &mut [PlayerSummary], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => rows.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Descending => rows.sort_by(|a, b| compare(b, a, key)),
    }
}

/// Dashboard default: most distance first.
pub fn ranked_leaderboard(table: &TrackingTable, cfg: &AggregationConfig) -> Vec<PlayerSummary> {
    let mut rows = team_leaderboard(table, cfg);
    sort_leaderboard(&mut rows, SortKey::TotalDistance, SortOrder::Descending);
    rows
}
