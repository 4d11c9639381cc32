//! JSON API for the dashboard.
//!
//! Requests carry one team's columns by provider name (`Home_11_x`,
//! `Period`, ...); missing samples are `null`. Position columns are run
//! through the kinematics pipeline before aggregation, so callers may send
//! raw positions, already-derived `dist`/`speed` columns, or both. A `null`
//! in a derived column counts as 0.
//!
//! The player report also carries the player's positions with the second
//! half mirrored, so a heatmap shows both halves attacking the same way.

use crate::analysis::events::{extract_sprints, movement_intensity, MovementIntensity, SprintEvent};
use crate::analysis::halves::{flip_second_half, half_distances, split_halves, HalfDistances};
use crate::analysis::kinematics::extract_team;
use crate::analysis::metrics::{
    player_summary, sort_leaderboard, team_leaderboard, zone_percentages, SortKey, SortOrder,
};
use crate::config::PipelineConfig;
use crate::models::{PlayerId, PlayerSummary, PlayerTrack, TeamId, TrackingTable, ZoneBreakdown};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const API_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReportRequest {
    pub schema_version: u8,
    pub team: TeamId,
    pub player: PlayerId,
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
    #[serde(default)]
    pub config: Option<PipelineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReportResponse {
    pub schema_version: u8,
    pub minutes_played: u32,
    pub summary: PlayerSummary,
    pub zones: ZoneBreakdown,
    pub halves: HalfDistances,
    pub intensity: MovementIntensity,
    pub sprints: Vec<SprintEvent>,
    /// Positions with the second half mirrored. `None` without x/y columns.
    pub heatmap: Option<PlayerTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRequest {
    pub schema_version: u8,
    pub team: TeamId,
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
    #[serde(default)]
    pub sort_by: Option<SortKey>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub config: Option<PipelineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub schema_version: u8,
    pub team: TeamId,
    pub minutes_played: u32,
    pub rows: Vec<PlayerSummary>,
}

fn check_schema(version: u8) -> Result<(), String> {
    if version != API_SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", version));
    }
    Ok(())
}

fn resolve_config(config: Option<PipelineConfig>) -> Result<PipelineConfig, String> {
    let config = config.unwrap_or_default();
    config.validate().map_err(|e| format!("Invalid config: {}", e))?;
    Ok(config)
}

fn prepare_table(
    team: TeamId,
    columns: BTreeMap<String, Vec<Option<f64>>>,
    config: &PipelineConfig,
) -> Result<TrackingTable, String> {
    let named = columns
        .into_iter()
        .map(|(name, values)| (name, values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect::<Vec<f64>>()));
    let mut table =
        TrackingTable::from_named_columns(team, named).map_err(|e| format!("Invalid table: {}", e))?;
    let extracted =
        extract_team(&mut table, &config.kinematics).map_err(|e| format!("Extraction failed: {}", e))?;
    debug!(team = %team, extracted, frames = table.frames(), "prepared table");
    Ok(table)
}

fn heatmap_track(
    table: &TrackingTable,
    player: PlayerId,
    config: &PipelineConfig,
) -> Option<PlayerTrack> {
    let track = table.track(player).ok()?;
    let [_, second_half] = split_halves(table);
    Some(flip_second_half(&track, second_half, &config.pitch))
}

/// Player card, zone split, halves and sprint events for one player.
pub fn player_report_json(request_json: &str) -> Result<String, String> {
    let request: PlayerReportRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let config = resolve_config(request.config)?;
    let table = prepare_table(request.team, request.columns, &config)?;
    let series = table.derived(request.player).map_err(|e| {
        format!("Unknown player {}_{}: {}", request.team, request.player, e)
    })?;

    let dt = config.kinematics.dt;
    let segment = &config.aggregation.sprint_segment;
    let response = PlayerReportResponse {
        schema_version: API_SCHEMA_VERSION,
        minutes_played: table.minutes_played(dt),
        summary: player_summary(request.team, request.player, &series, &config.aggregation),
        zones: zone_percentages(&series, &config.aggregation),
        halves: half_distances(&table, request.player).map_err(|e| e.to_string())?,
        intensity: movement_intensity(&series, dt, segment),
        sprints: extract_sprints(&series, dt, segment),
        heatmap: heatmap_track(&table, request.player, &config),
    };
    info!(
        player = %response.summary.full_id(),
        total_km = response.summary.total_distance_km,
        top_kmh = response.summary.top_speed_kmh,
        "player report"
    );

    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}

/// Team leaderboard, sorted by the requested column (default: distance, descending).
pub fn team_leaderboard_json(request_json: &str) -> Result<String, String> {
    let request: LeaderboardRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let config = resolve_config(request.config)?;
    let table = prepare_table(request.team, request.columns, &config)?;

    let mut rows = team_leaderboard(&table, &config.aggregation);
    sort_leaderboard(
        &mut rows,
        request.sort_by.unwrap_or(SortKey::TotalDistance),
        request.order.unwrap_or_default(),
    );
    info!(team = %request.team, players = rows.len(), "team leaderboard");

    let response = LeaderboardResponse {
        schema_version: API_SCHEMA_VERSION,
        team: request.team,
        minutes_played: table.minutes_played(config.kinematics.dt),
        rows,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}
