//! Match halves.
//!
//! The `Period` column marks the half of each frame. Without it (or when it
//! only ever holds one value) the sequence is split at its midpoint.
//!
//! Teams swap ends at half time, so positional views that want both halves
//! attacking the same direction mirror second-half positions through the
//! pitch centre. Positions are meters from the corner origin.

use super::metrics::round2;
use crate::config::PitchDimensions;
use crate::error::Result;
use crate::models::{PlayerId, PlayerTrack, TrackingTable};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Frame ranges of the first and second half.
pub fn split_halves(table: &TrackingTable) -> [Range<usize>; 2] {
    let frames = table.frames();
    let split = table
        .period()
        .and_then(|period| {
            let first = *period.first()?;
            period.iter().position(|&p| p != first)
        })
        .unwrap_or(frames / 2);
    [0..split, split..frames]
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HalfDistances {
    pub first_half_km: f64,
    pub second_half_km: f64,
}

/// Distance per half in km (2 decimals) from the published `dist` column.
pub fn half_distances(table: &TrackingTable, player: PlayerId) -> Result<HalfDistances> {
    let series = table.derived(player)?;
    let [first, second] = split_halves(table);
    let km = |range: Range<usize>| round2(series.distance[range].iter().sum::<f64>() / 1000.0);
    Ok(HalfDistances {
        first_half_km: km(first),
        second_half_km: km(second),
    })
}

/// Mirror positions in `second_half` through the pitch centre.
pub fn flip_second_half(
    track: &PlayerTrack,
    second_half: Range<usize>,
    pitch: &PitchDimensions,
) -> PlayerTrack {
    let mut flipped = track.clone();
    let end = second_half.end.min(track.len());
    for i in second_half.start.min(end)..end {
        flipped.x[i] = pitch.length_m - track.x[i];
        flipped.y[i] = pitch.width_m - track.y[i];
    }
    flipped
}
