use super::key::{PlayerId, TeamId};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Raw positions of one player, aligned 1:1 with the table's frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTrack {
    pub team: TeamId,
    pub player: PlayerId,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PlayerTrack {
    pub fn new(team: TeamId, player: PlayerId, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(CoreError::LengthMismatch {
                what: format!("{}_{} positions", team, player),
                expected: x.len(),
                found: y.len(),
            });
        }
        Ok(Self { team, player, x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Per-frame step distance (m) and cleaned speed (km/h).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub distance: Vec<f64>,
    pub speed: Vec<f64>,
}

impl DerivedSeries {
    pub fn new(distance: Vec<f64>, speed: Vec<f64>) -> Result<Self> {
        if distance.len() != speed.len() {
            return Err(CoreError::LengthMismatch {
                what: "derived series".to_string(),
                expected: distance.len(),
                found: speed.len(),
            });
        }
        Ok(Self { distance, speed })
    }

    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Total distance in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.distance.iter().sum()
    }

    /// Highest speed sample, 0 for an empty series.
    pub fn top_speed_kmh(&self) -> f64 {
        self.speed.iter().copied().fold(0.0, f64::max)
    }
}
