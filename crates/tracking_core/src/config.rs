//! # Pipeline Configuration
//!
//! All tuning constants of the kinematics pipeline and the aggregator live
//! here, with the dashboard values as defaults.
//!
//! ```rust
//! use tracking_core::config::PipelineConfig;
//!
//! let config = PipelineConfig::default();
//! assert_eq!(config.kinematics.median_window, 31);
//!
//! let tuned = PipelineConfig::from_yaml_str("kinematics:\n  dt: 0.1\n").unwrap();
//! assert_eq!(tuned.kinematics.dt, 0.1);
//! assert_eq!(tuned.kinematics.savgol_window, 21);
//! ```

use crate::analysis::filters::EdgeMode;
use crate::error::{CoreError, Result};
use crate::models::DEFAULT_ZONE_BOUNDS_KMH;
use serde::{Deserialize, Serialize};

/// Default sampling interval: 25 Hz.
pub const DEFAULT_DT: f64 = 0.04;

/// m/s → km/h.
pub const MPS_TO_KMH: f64 = 3.6;

/// Kinematics Extractor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Sampling interval in seconds
    pub dt: f64,
    /// Quantile of the raw speed used as the clipping reference
    pub clip_quantile: f64,
    /// Ceiling = reference quantile * multiplier
    pub clip_multiplier: f64,
    /// Centered rolling-median window (frames, odd)
    pub median_window: usize,
    /// How the median treats samples whose window does not fit
    pub median_edge: EdgeMode,
    /// Savitzky–Golay window length (frames, odd)
    pub savgol_window: usize,
    /// Savitzky–Golay polynomial order
    pub savgol_order: usize,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            clip_quantile: 0.95,
            clip_multiplier: 1.5,
            median_window: 31,
            median_edge: EdgeMode::Shrink,
            savgol_window: 21,
            savgol_order: 3,
        }
    }
}

/// Hysteresis used to cut discrete sprint segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintSegmentConfig {
    /// Segment starts at or above this speed
    pub entry_kmh: f64,
    /// Segment continues while at or above this speed
    pub exit_kmh: f64,
    /// Shorter segments are discarded
    pub min_duration_s: f64,
}

impl Default for SprintSegmentConfig {
    fn default() -> Self {
        Self {
            entry_kmh: 25.2,
            exit_kmh: 19.8,
            min_duration_s: 0.5,
        }
    }
}

/// Aggregator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Lower bounds of Jogging, Running, HSR and Sprinting (km/h)
    pub zone_bounds_kmh: [f64; 4],
    /// Frames strictly above this speed count towards the card sprint count
    pub sprint_threshold_kmh: f64,
    /// Sprinting frames per counted sprint on the player card
    pub frames_per_sprint: usize,
    pub sprint_segment: SprintSegmentConfig,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            zone_bounds_kmh: DEFAULT_ZONE_BOUNDS_KMH,
            sprint_threshold_kmh: 25.2,
            frames_per_sprint: 25,
            sprint_segment: SprintSegmentConfig::default(),
        }
    }
}

/// Pitch size in meters, used to mirror second-half positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchDimensions {
    pub length_m: f64,
    pub width_m: f64,
}

impl Default for PitchDimensions {
    fn default() -> Self {
        Self {
            length_m: 105.0,
            width_m: 68.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub kinematics: KinematicsConfig,
    pub aggregation: AggregationConfig,
    pub pitch: PitchDimensions,
}

impl PipelineConfig {
    /// Same numbers as the default, with boundary medians (where the centered
    /// window does not fit) set to zero instead of shrunk.
    pub fn dashboard() -> Self {
        let mut cfg = Self::default();
        cfg.kinematics.median_edge = EdgeMode::ZeroFill;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let k = &self.kinematics;
        if !(k.dt.is_finite() && k.dt > 0.0) {
            return Err(invalid(format!("dt must be positive, got {}", k.dt)));
        }
        if !(0.0..=1.0).contains(&k.clip_quantile) {
            return Err(invalid(format!(
                "clip_quantile must be within [0, 1], got {}",
                k.clip_quantile
            )));
        }
        if !(k.clip_multiplier >= 1.0) {
            return Err(invalid(format!(
                "clip_multiplier must be >= 1, got {}",
                k.clip_multiplier
            )));
        }
        if k.median_window == 0 || k.median_window % 2 == 0 {
            return Err(invalid(format!(
                "median_window must be odd, got {}",
                k.median_window
            )));
        }
        if k.savgol_window == 0 || k.savgol_window % 2 == 0 {
            return Err(invalid(format!(
                "savgol_window must be odd, got {}",
                k.savgol_window
            )));
        }
        if k.savgol_order >= k.savgol_window {
            return Err(invalid(format!(
                "savgol_order {} must be below savgol_window {}",
                k.savgol_order, k.savgol_window
            )));
        }

        let a = &self.aggregation;
        let bounds = a.zone_bounds_kmh;
        if bounds[0] <= 0.0 || bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid(format!(
                "zone bounds must be positive and increasing, got {:?}",
                bounds
            )));
        }
        if a.frames_per_sprint == 0 {
            return Err(invalid("frames_per_sprint must be positive".to_string()));
        }
        if a.sprint_segment.exit_kmh > a.sprint_segment.entry_kmh {
            return Err(invalid(format!(
                "sprint exit speed {} exceeds entry speed {}",
                a.sprint_segment.exit_kmh, a.sprint_segment.entry_kmh
            )));
        }

        if !(self.pitch.length_m > 0.0 && self.pitch.width_m > 0.0) {
            return Err(invalid("pitch dimensions must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> CoreError {
    CoreError::InvalidParameter(msg)
}
