//! # Kinematics Extractor
//!
//! Converts raw per-frame positions into step distance (m) and a cleaned
//! speed series (km/h).
//!
//! ## Algorithm
//! 1. Euclidean step distance between consecutive frames, 0 for frame 0
//!    and for steps touching a missing sample
//! 2. Raw speed = distance / dt * 3.6
//! 3. Clip at `q95(raw) * 1.5` to bound teleports and occlusion jumps
//! 4. Centered rolling median (31 frames). By default the window shrinks
//!    at the sequence edges, so a constant pace stays flat end to end.
//!    `EdgeMode::ZeroFill` instead sets the first and last 15 medians to 0,
//!    matching the dashboard's numbers (`PipelineConfig::dashboard()`)
//! 5. Savitzky–Golay (21 frames, cubic)
//! 6. Scrub non-finite values and floor at 0

use super::filters::{clip_upper, quantile, rolling_median, savgol_filter};
use crate::config::{KinematicsConfig, MPS_TO_KMH};
use crate::error::Result;
use crate::models::{DerivedSeries, PlayerId, PlayerTrack, TrackingTable};
use rayon::prelude::*;
use tracing::{debug, info};

/// Step distance per frame in meters. `distance[0]` is always 0.
pub fn step_distances(track: &PlayerTrack) -> Vec<f64> {
    let n = track.len();
    let mut distance = Vec::with_capacity(n);
    if n == 0 {
        return distance;
    }
    distance.push(0.0);
    for i in 1..n {
        let dx = track.x[i] - track.x[i - 1];
        let dy = track.y[i] - track.y[i - 1];
        let d = (dx * dx + dy * dy).sqrt();
        distance.push(if d.is_finite() { d } else { 0.0 });
    }
    distance
}

/// Step distance → instantaneous speed in km/h.
pub fn raw_speeds(distance: &[f64], dt: f64) -> Vec<f64> {
    distance.iter().map(|d| d / dt * MPS_TO_KMH).collect()
}

/// Upper bound applied to the raw speed before smoothing.
pub fn clip_ceiling(raw_speed: &[f64], cfg: &KinematicsConfig) -> f64 {
    quantile(raw_speed, cfg.clip_quantile) * cfg.clip_multiplier
}

/// Clip, median-smooth and Savitzky–Golay-smooth a raw speed series.
pub fn clean_speed(raw_speed: &[f64], cfg: &KinematicsConfig) -> Vec<f64> {
    let clipped = clip_upper(raw_speed, clip_ceiling(raw_speed, cfg));
    let median = rolling_median(&clipped, cfg.median_window, cfg.median_edge);
    savgol_filter(&median, cfg.savgol_window, cfg.savgol_order)
        .into_iter()
        .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect()
}

/// Derive distance and cleaned speed for one player.
///
/// Pure and deterministic: the same track always yields bit-identical output.
pub fn extract(track: &PlayerTrack, cfg: &KinematicsConfig) -> DerivedSeries {
    let distance = step_distances(track);
    let speed = clean_speed(&raw_speeds(&distance, cfg.dt), cfg);
    debug!(
        team = %track.team,
        player = %track.player,
        frames = distance.len(),
        "extracted kinematics"
    );
    DerivedSeries { distance, speed }
}

/// Extract every tracked player of a table and publish the derived columns.
///
/// Players are independent, so extraction runs in parallel; publishing
/// happens afterwards on the calling thread. Returns the number of players
/// published.
pub fn extract_team(table: &mut TrackingTable, cfg: &KinematicsConfig) -> Result<usize> {
    let tracks = table
        .tracked_players()
        .into_iter()
        .map(|player| table.track(player))
        .collect::<Result<Vec<_>>>()?;

    let derived: Vec<(PlayerId, DerivedSeries)> = tracks
        .par_iter()
        .map(|track| (track.player, extract(track, cfg)))
        .collect();

    for (player, series) in &derived {
        table.publish(*player, series)?;
    }

    info!(
        team = %table.team(),
        players = derived.len(),
        frames = table.frames(),
        "published derived series"
    );
    Ok(derived.len())
}
