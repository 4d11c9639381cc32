//! # Tracking Table
//!
//! One team's frame sequence: every player column for that team, keyed by
//! [`ColumnKey`], plus the optional per-frame `Period` indicator.
//!
//! Frames are never reordered or deduplicated. Derived series are published
//! back into the same column store under `dist`/`speed` keys, so a player
//! is "on the leaderboard" exactly when a speed column exists for them.

use super::key::{ColumnKey, FieldKind, PlayerId, TeamId};
use super::series::{DerivedSeries, PlayerTrack};
use crate::error::{CoreError, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Column name carrying the half indicator.
pub const PERIOD_COLUMN: &str = "Period";

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingTable {
    team: TeamId,
    frames: usize,
    period: Option<Vec<u8>>,
    columns: BTreeMap<ColumnKey, Vec<f64>>,
}

impl TrackingTable {
    pub fn new(team: TeamId, frames: usize) -> Self {
        Self {
            team,
            frames,
            period: None,
            columns: BTreeMap::new(),
        }
    }

    /// Build a table from provider-named columns.
    ///
    /// Columns belonging to the other team, the ball channel, and names that
    /// do not follow `{team}_{playerId}_{field}` are skipped. The frame count
    /// is taken from the first accepted column; any later column of a
    /// different length is rejected.
    pub fn from_named_columns<I, S>(team: TeamId, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: AsRef<str>,
    {
        let mut frames: Option<usize> = None;
        let mut period = None;
        let mut store = BTreeMap::new();

        for (name, values) in columns {
            let name = name.as_ref();
            let is_period = name.trim().eq_ignore_ascii_case(PERIOD_COLUMN);
            let key = ColumnKey::parse(name);

            if !is_period && key.map(|k| k.team != team).unwrap_or(true) {
                debug!(column = name, team = %team, "skipping non-player column");
                continue;
            }

            let expected = *frames.get_or_insert(values.len());
            if values.len() != expected {
                return Err(CoreError::LengthMismatch {
                    what: name.to_string(),
                    expected,
                    found: values.len(),
                });
            }

            match key {
                Some(key) if !is_period => {
                    store.insert(key, scrub_derived(key, values));
                }
                _ => period = Some(period_values(&values)),
            }
        }

        Ok(Self {
            team,
            frames: frames.unwrap_or(0),
            period,
            columns: store,
        })
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    /// Number of frames in the sequence.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn period(&self) -> Option<&[u8]> {
        self.period.as_deref()
    }

    pub fn set_period(&mut self, period: Vec<u8>) -> Result<()> {
        self.check_len("Period", period.len())?;
        self.period = Some(period);
        Ok(())
    }

    pub fn insert(&mut self, key: ColumnKey, values: Vec<f64>) -> Result<()> {
        if key.team != self.team {
            return Err(CoreError::InvalidParameter(format!(
                "column {} does not belong to the {} table",
                key, self.team
            )));
        }
        self.check_len(&key.to_string(), values.len())?;
        self.columns.insert(key, scrub_derived(key, values));
        Ok(())
    }

    pub fn column(&self, key: ColumnKey) -> Result<&[f64]> {
        self.columns
            .get(&key)
            .map(Vec::as_slice)
            .ok_or(CoreError::MissingColumn(key))
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.columns.keys()
    }

    fn key(&self, player: PlayerId, field: FieldKind) -> ColumnKey {
        ColumnKey::new(self.team, player, field)
    }

    fn players_with(&self, field: FieldKind) -> Vec<PlayerId> {
        self.columns
            .keys()
            .filter(|k| k.field == field)
            .map(|k| k.player)
            .collect()
    }

    /// Players with both position axes, ascending by id.
    pub fn tracked_players(&self) -> Vec<PlayerId> {
        self.players_with(FieldKind::X)
            .into_iter()
            .filter(|&p| self.columns.contains_key(&self.key(p, FieldKind::Y)))
            .collect()
    }

    /// Players with a published speed series, ascending by id.
    pub fn players_with_speed(&self) -> Vec<PlayerId> {
        self.players_with(FieldKind::Speed)
    }

    pub fn track(&self, player: PlayerId) -> Result<PlayerTrack> {
        let x = self.column(self.key(player, FieldKind::X))?;
        let y = self.column(self.key(player, FieldKind::Y))?;
        PlayerTrack::new(self.team, player, x.to_vec(), y.to_vec())
    }

    /// Attach a player's derived series as `dist`/`speed` columns.
    pub fn publish(&mut self, player: PlayerId, series: &DerivedSeries) -> Result<()> {
        let dist_key = self.key(player, FieldKind::Dist);
        let speed_key = self.key(player, FieldKind::Speed);
        self.check_len(&dist_key.to_string(), series.distance.len())?;
        self.check_len(&speed_key.to_string(), series.speed.len())?;
        self.columns
            .insert(dist_key, scrub_derived(dist_key, series.distance.clone()));
        self.columns
            .insert(speed_key, scrub_derived(speed_key, series.speed.clone()));
        Ok(())
    }

    pub fn derived(&self, player: PlayerId) -> Result<DerivedSeries> {
        let distance = self.column(self.key(player, FieldKind::Dist))?;
        let speed = self.column(self.key(player, FieldKind::Speed))?;
        DerivedSeries::new(distance.to_vec(), speed.to_vec())
    }

    /// Whole minutes covered by the sequence at sampling interval `dt`.
    /// Half minutes round to even (90.5 -> 90, 91.5 -> 92).
    pub fn minutes_played(&self, dt: f64) -> u32 {
        (self.frames as f64 * dt / 60.0).round_ties_even() as u32
    }

    fn check_len(&self, what: &str, found: usize) -> Result<()> {
        if found != self.frames {
            return Err(CoreError::LengthMismatch {
                what: what.to_string(),
                expected: self.frames,
                found,
            });
        }
        Ok(())
    }
}

/// Published `dist`/`speed` columns are always finite: a missing derived
/// sample counts as 0. Positions keep their NaN gaps.
fn scrub_derived(key: ColumnKey, mut values: Vec<f64>) -> Vec<f64> {
    if key.field.is_position() {
        return values;
    }
    let mut scrubbed = 0usize;
    for v in values.iter_mut().filter(|v| !v.is_finite()) {
        *v = 0.0;
        scrubbed += 1;
    }
    if scrubbed > 0 {
        debug!(column = %key, scrubbed, "non-finite derived samples set to 0");
    }
    values
}

fn period_values(values: &[f64]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| if v.is_finite() && v > 0.0 { v.round().min(u8::MAX as f64) as u8 } else { 0 })
        .collect()
}
