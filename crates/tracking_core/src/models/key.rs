//! # Column Keys
//!
//! Tracking tables name their columns `{team}_{playerId}_{field}`
//! (e.g. `Home_11_x`, `Away_3_speed`). This module parses those names once,
//! at the loading boundary, into a typed [`ColumnKey`] so the rest of the
//! crate never does string surgery on column names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token used by tracking providers for the ball channel.
pub const BALL_TOKEN: &str = "ball";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamId {
    Home,
    Away,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::Home, TeamId::Away];

    pub fn label(self) -> &'static str {
        match self {
            TeamId::Home => "Home",
            TeamId::Away => "Away",
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TeamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(TeamId::Home),
            "away" => Ok(TeamId::Away),
            other => Err(format!("unknown team label '{}'", other)),
        }
    }
}

/// Numeric shirt/tracking identifier of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = String;

    /// Rejects the ball channel and anything that is not an unsigned integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case(BALL_TOKEN) {
            return Err("ball channel is not a player".to_string());
        }
        token
            .parse::<u32>()
            .map(PlayerId)
            .map_err(|_| format!("player id '{}' is not numeric", token))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    X,
    Y,
    Dist,
    Speed,
}

impl FieldKind {
    pub fn suffix(self) -> &'static str {
        match self {
            FieldKind::X => "x",
            FieldKind::Y => "y",
            FieldKind::Dist => "dist",
            FieldKind::Speed => "speed",
        }
    }

    pub fn is_position(self) -> bool {
        matches!(self, FieldKind::X | FieldKind::Y)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(FieldKind::X),
            "y" => Ok(FieldKind::Y),
            "dist" => Ok(FieldKind::Dist),
            "speed" => Ok(FieldKind::Speed),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Structured replacement for `{team}_{playerId}_{field}` column names.
///
/// Ordering is team, then player id (numeric), then field, which is the
/// enumeration order used for tables and leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnKey {
    pub team: TeamId,
    pub player: PlayerId,
    pub field: FieldKind,
}

impl ColumnKey {
    pub fn new(team: TeamId, player: PlayerId, field: FieldKind) -> Self {
        Self { team, player, field }
    }

    /// Parse a provider column name.
    ///
    /// Returns `None` for anything that is not a player column: ball
    /// channels, non-numeric ids, frame/time/period columns.
    pub fn parse(name: &str) -> Option<Self> {
        let mut parts = name.trim().split('_');
        let team = parts.next()?.parse::<TeamId>().ok()?;
        let player = parts.next()?.parse::<PlayerId>().ok()?;
        let field = parts.next()?.parse::<FieldKind>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { team, player, field })
    }

    pub fn with_field(self, field: FieldKind) -> Self {
        Self { field, ..self }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}_{}", self.team, self.player, self.field)
    }
}
