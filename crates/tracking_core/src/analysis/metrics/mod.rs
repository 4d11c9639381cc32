//! # Metrics Module
//!
//! Aggregates derived series into the numbers the dashboard shows.
//!
//! - `zones` - Distance share per speed zone
//! - `player_card` - Total distance, top speed, sprint count
//! - `leaderboard` - Team-wide summary table

pub mod leaderboard;
pub mod player_card;
pub mod zones;

pub use leaderboard::*;
pub use player_card::*;
pub use zones::*;

/// Round to 2 decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
