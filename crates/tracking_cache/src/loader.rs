//! Tracking CSV Loader
//!
//! One file per team, one row per frame, one column per channel:
//!
//! ```text
//! Period,Frame,Time [s],Home_1_x,Home_1_y,Home_11_x,Home_11_y,ball_x,ball_y
//! 1,1,0.04,12.1,30.5,40.0,22.3,52.5,34.0
//! ```
//!
//! Only the requested team's `{team}_{id}_{field}` columns and `Period` are
//! kept; every other header is counted and dropped. Empty cells become NaN
//! (players off the pitch); cells that do not parse as numbers also become
//! NaN and are counted as failures. Precomputed `dist`/`speed` columns are
//! stored by the table with those gaps set to 0.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};
use tracking_core::models::PERIOD_COLUMN;
use tracking_core::{ColumnKey, TeamId, TrackingTable};

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    /// Rows with a different field count than the header (padded with NaN).
    pub ragged: u32,
    /// Non-empty cells that are not numbers.
    pub failed_cells: u32,
    pub kept_columns: u32,
    pub skipped_columns: u32,
}

fn keep_column(name: &str, team: TeamId) -> bool {
    if name.trim().eq_ignore_ascii_case(PERIOD_COLUMN) {
        return true;
    }
    matches!(ColumnKey::parse(name), Some(key) if key.team == team)
}

fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

/// Load one team's tracking table from a CSV file.
pub fn load_tracking_csv(path: &Path, team: TeamId) -> Result<(TrackingTable, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open tracking CSV: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();

    let mut stats = ParseStats::default();
    let mut selected: Vec<(usize, String)> = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if keep_column(name, team) {
            selected.push((idx, name.to_string()));
        } else {
            debug!(column = name, "dropping column");
            stats.skipped_columns += 1;
        }
    }
    stats.kept_columns = selected.len() as u32;

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); selected.len()];

    for (row_idx, record) in reader.records().enumerate() {
        stats.total_rows += 1;
        let record = record.with_context(|| {
            format!("Failed to read row {} of {}", row_idx + 2, path.display())
        })?;

        if record.len() != headers.len() {
            stats.ragged += 1;
            warn!(
                row = row_idx + 2,
                fields = record.len(),
                expected = headers.len(),
                "ragged row"
            );
        }

        for ((col_idx, name), column) in selected.iter().zip(values.iter_mut()) {
            let cell = record.get(*col_idx).unwrap_or("");
            let value = match parse_cell(cell) {
                Some(v) => v,
                None => {
                    stats.failed_cells += 1;
                    debug!(row = row_idx + 2, column = name.as_str(), cell, "unparsable cell");
                    f64::NAN
                }
            };
            column.push(value);
        }
        stats.parsed += 1;
    }

    if stats.failed_cells > 0 {
        warn!(
            file = %path.display(),
            failed = stats.failed_cells,
            "cells could not be parsed and were treated as missing"
        );
    }

    let columns = selected.into_iter().map(|(_, name)| name).zip(values);
    let mut table = TrackingTable::from_named_columns(team, columns)
        .with_context(|| format!("Invalid tracking table in {}", path.display()))?;

    // no accepted columns: the row count is still the frame count
    if table.frames() == 0 && stats.parsed > 0 {
        table = TrackingTable::new(team, stats.parsed as usize);
    }

    info!(
        file = %path.display(),
        team = %team,
        frames = table.frames(),
        players = table.tracked_players().len(),
        "tracking table loaded"
    );

    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracking_core::{player_summary, zone_percentages, FieldKind, PipelineConfig, PlayerId};

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_team_columns_and_period() -> Result<()> {
        let file = write_csv(
            "Period,Frame,Time [s],Home_1_x,Home_1_y,Away_2_x,Away_2_y,ball_x,ball_y\n\
             1,1,0.04,10.0,20.0,50.0,30.0,52.5,34.0\n\
             1,2,0.08,10.5,20.0,50.0,30.0,52.5,34.0\n\
             2,3,0.12,11.0,20.5,50.0,30.0,52.5,34.0\n",
        );

        let (table, stats) = load_tracking_csv(file.path(), TeamId::Home)?;

        assert_eq!(table.frames(), 3);
        assert_eq!(table.period(), Some(&[1u8, 1, 2][..]));
        assert_eq!(table.tracked_players(), vec![PlayerId(1)]);
        assert_eq!(
            table.column(ColumnKey::new(TeamId::Home, PlayerId(1), FieldKind::X))?,
            &[10.0, 10.5, 11.0]
        );
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.kept_columns, 3);
        assert_eq!(stats.skipped_columns, 6);
        Ok(())
    }

    #[test]
    fn test_empty_and_bad_cells_become_nan() -> Result<()> {
        let file = write_csv(
            "Away_7_x,Away_7_y\n\
             1.0,2.0\n\
             ,2.0\n\
             oops,2.0\n",
        );

        let (table, stats) = load_tracking_csv(file.path(), TeamId::Away)?;
        let x = table.column(ColumnKey::new(TeamId::Away, PlayerId(7), FieldKind::X))?;

        assert_eq!(x[0], 1.0);
        assert!(x[1].is_nan());
        assert!(x[2].is_nan());
        assert_eq!(stats.failed_cells, 1);
        Ok(())
    }

    #[test]
    fn test_blank_derived_cells_count_as_zero() -> Result<()> {
        let file = write_csv(
            "Home_1_dist,Home_1_speed\n\
             0.0,0.0\n\
             500.0,10.0\n\
             ,\n\
             700.0,30.0\n",
        );

        let (table, _) = load_tracking_csv(file.path(), TeamId::Home)?;
        let series = table.derived(PlayerId(1))?;
        let aggregation = PipelineConfig::default().aggregation;

        assert_eq!(series.distance, vec![0.0, 500.0, 0.0, 700.0]);
        let card = player_summary(TeamId::Home, PlayerId(1), &series, &aggregation);
        assert_eq!(card.total_distance_km, 1.2);
        let zones = zone_percentages(&series, &aggregation);
        assert_eq!(zones.jogging, 41.67);
        assert_eq!(zones.sprinting, 58.33);
        Ok(())
    }

    #[test]
    fn test_short_rows_are_padded() -> Result<()> {
        let file = write_csv("Home_4_x,Home_4_y\n1.0,2.0\n3.0\n");

        let (table, stats) = load_tracking_csv(file.path(), TeamId::Home)?;
        let y = table.column(ColumnKey::new(TeamId::Home, PlayerId(4), FieldKind::Y))?;

        assert_eq!(stats.ragged, 1);
        assert_eq!(y[0], 2.0);
        assert!(y[1].is_nan());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_tracking_csv(Path::new("/nonexistent/tracking.csv"), TeamId::Home)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open tracking CSV"));
    }
}
