//! # Analysis Module
//!
//! The physics/statistics core.
//!
//! ## Submodules
//!
//! - `filters` - Quantile clipping, rolling median, Savitzky–Golay
//! - `kinematics` - Positions → step distance and cleaned speed
//! - `metrics` - Zone distribution, player card, leaderboard
//! - `events` - Sprint segment extraction
//! - `halves` - Half splitting and second-half mirroring

pub mod events;
pub mod filters;
pub mod halves;
pub mod kinematics;
pub mod metrics;

pub use kinematics::{extract, extract_team};
