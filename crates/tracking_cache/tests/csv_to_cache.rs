//! CSV on disk → prepared table → leaderboard, and the same leaderboard again
//! from the persisted series cache.

use anyhow::Result;
use std::fmt::Write as _;
use std::fs;
use tempfile::TempDir;
use tracking_cache::{build_series_cache, load_series_cache, verify_cache, DatasetCache};
use tracking_core::{ranked_leaderboard, PipelineConfig, PlayerId, TeamId};

const FRAMES: usize = 250;

fn match_csv() -> String {
    let mut csv = String::from("Period,Frame,Away_3_x,Away_3_y,Away_8_x,Away_8_y,Home_1_x,Home_1_y\n");
    for i in 0..FRAMES {
        let period = if i < FRAMES / 2 { 1 } else { 2 };
        // player 8 jogs twice as fast as player 3; the home player is ignored
        writeln!(
            csv,
            "{},{},{:.3},30.0,{:.3},40.0,50.0,34.0",
            period,
            i + 1,
            i as f64 * 0.1,
            i as f64 * 0.2
        )
        .unwrap();
    }
    csv
}

#[test]
fn leaderboard_survives_the_series_cache() -> Result<()> {
    let dir = TempDir::new()?;
    let csv_path = dir.path().join("Away_Tracking.csv");
    fs::write(&csv_path, match_csv())?;

    let mut cache = DatasetCache::new(PipelineConfig::default());
    let aggregation = cache.config().aggregation.clone();
    let dataset = cache.get_or_load(&csv_path, TeamId::Away)?;

    assert_eq!(dataset.stats.parsed as usize, FRAMES);
    assert_eq!(dataset.stats.skipped_columns, 3);

    let live = ranked_leaderboard(&dataset.table, &aggregation);
    let ids: Vec<PlayerId> = live.iter().map(|r| r.player).collect();
    assert_eq!(ids, vec![PlayerId(8), PlayerId(3)]);

    let out = dir.path().join("cache/away.v1.msgpack.lz4");
    let meta = build_series_cache(&dataset.table, &out, "v1")?;
    assert!(verify_cache(&out, &meta.checksum)?);

    let restored = load_series_cache(&out)?.into_table()?;
    assert_eq!(ranked_leaderboard(&restored, &aggregation), live);
    assert_eq!(restored.period(), dataset.table.period());
    Ok(())
}
