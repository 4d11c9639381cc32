//! Data model: typed column keys, tracking tables, per-player series and
//! the fixed-shape summary records handed to the presentation layer.

pub mod key;
pub mod series;
pub mod summary;
pub mod table;

pub use key::{ColumnKey, FieldKind, PlayerId, TeamId, BALL_TOKEN};
pub use series::{DerivedSeries, PlayerTrack};
pub use summary::{PlayerSummary, SpeedZone, ZoneBreakdown, DEFAULT_ZONE_BOUNDS_KMH};
pub use table::{TrackingTable, PERIOD_COLUMN};
