//! # tracking_core - Match Physicals From Positional Tracking
//!
//! Turns per-frame player positions into cleaned speed/distance series and
//! the work-rate statistics shown on a match dashboard.
//!
//! ## Pipeline
//! - Kinematics: step distance → raw speed → quantile clip → rolling median
//!   → Savitzky–Golay
//! - Aggregation: zone distribution, player card, team leaderboard
//! - Sprint segments and half splits on top of the derived series
//!
//! Everything here is pure and deterministic: the same table and config
//! always produce bit-identical output.

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Loop style - index loops mirror the filter formulas
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;

pub use analysis::events::{extract_sprints, SprintEvent};
pub use analysis::kinematics::{extract, extract_team};
pub use analysis::metrics::{
    player_summary, ranked_leaderboard, sort_leaderboard, team_leaderboard, zone_percentages,
    SortKey, SortOrder,
};
pub use api::{player_report_json, team_leaderboard_json};
pub use config::PipelineConfig;
pub use error::{CoreError, Result};
pub use models::{
    ColumnKey, DerivedSeries, FieldKind, PlayerId, PlayerSummary, PlayerTrack, SpeedZone, TeamId,
    TrackingTable, ZoneBreakdown,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
