use super::key::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bounds (km/h) of Jogging, Running, HSR and Sprinting.
pub const DEFAULT_ZONE_BOUNDS_KMH: [f64; 4] = [7.0, 15.0, 20.0, 25.0];

/// Work-rate band of the speed domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedZone {
    Walking,
    Jogging,
    Running,
    #[serde(rename = "HSR")]
    Hsr,
    Sprinting,
}

impl SpeedZone {
    pub const ALL: [SpeedZone; 5] = [
        SpeedZone::Walking,
        SpeedZone::Jogging,
        SpeedZone::Running,
        SpeedZone::Hsr,
        SpeedZone::Sprinting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpeedZone::Walking => "Walking",
            SpeedZone::Jogging => "Jogging",
            SpeedZone::Running => "Running",
            SpeedZone::Hsr => "HSR",
            SpeedZone::Sprinting => "Sprinting",
        }
    }

    /// `[low, high)` km/h under the default bounds.
    pub fn bounds(self) -> (f64, f64) {
        self.bounds_with(&DEFAULT_ZONE_BOUNDS_KMH)
    }

    pub fn bounds_with(self, bounds: &[f64; 4]) -> (f64, f64) {
        let idx = self.index();
        let low = if idx == 0 { 0.0 } else { bounds[idx - 1] };
        let high = bounds.get(idx).copied().unwrap_or(f64::INFINITY);
        (low, high)
    }

    /// Zone of a single speed sample under the default bounds.
    pub fn classify(speed_kmh: f64) -> Self {
        Self::classify_with(speed_kmh, &DEFAULT_ZONE_BOUNDS_KMH)
    }

    /// Anything below the first bound, NaN included, is Walking.
    pub fn classify_with(speed_kmh: f64, bounds: &[f64; 4]) -> Self {
        let idx = bounds.iter().take_while(|&&b| speed_kmh >= b).count();
        Self::ALL[idx]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SpeedZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Share of total distance (percent, 2 decimals) covered in each zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneBreakdown {
    #[serde(rename = "Walking")]
    pub walking: f64,
    #[serde(rename = "Jogging")]
    pub jogging: f64,
    #[serde(rename = "Running")]
    pub running: f64,
    #[serde(rename = "HSR")]
    pub hsr: f64,
    #[serde(rename = "Sprinting")]
    pub sprinting: f64,
}

impl ZoneBreakdown {
    pub fn from_array(values: [f64; 5]) -> Self {
        let [walking, jogging, running, hsr, sprinting] = values;
        Self {
            walking,
            jogging,
            running,
            hsr,
            sprinting,
        }
    }

    pub fn to_array(&self) -> [f64; 5] {
        [self.walking, self.jogging, self.running, self.hsr, self.sprinting]
    }

    pub fn get(&self, zone: SpeedZone) -> f64 {
        self.to_array()[zone.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeedZone, f64)> {
        SpeedZone::ALL.into_iter().zip(self.to_array())
    }

    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }
}

/// Player card / leaderboard row. Always derived from a published series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub team: TeamId,
    pub player: PlayerId,
    pub total_distance_km: f64,
    pub top_speed_kmh: f64,
    pub sprint_count: u32,
}

impl PlayerSummary {
    /// `Home_11` style identifier shown in tables.
    pub fn full_id(&self) -> String {
        format!("{}_{}", self.team, self.player)
    }
}
