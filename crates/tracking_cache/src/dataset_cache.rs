//! Session cache of prepared tracking tables.
//!
//! Entries are keyed by `(path, team)` and remember the file's modification
//! time. A lookup whose file has been touched since it was loaded reloads and
//! re-extracts; everything else is served from memory.

use crate::loader::{load_tracking_csv, ParseStats};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};
use tracking_core::{extract_team, PipelineConfig, TeamId, TrackingTable};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    pub path: PathBuf,
    pub team: TeamId,
}

impl DatasetKey {
    pub fn new(path: &Path, team: TeamId) -> Self {
        Self {
            path: path.to_path_buf(),
            team,
        }
    }
}

/// A loaded and extracted table.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub modified: SystemTime,
    pub table: TrackingTable,
    pub stats: ParseStats,
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    config: PipelineConfig,
    entries: FxHashMap<DatasetKey, CachedDataset>,
}

fn modified_time(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("Failed to stat dataset: {}", path.display()))
}

fn prepare(path: &Path, team: TeamId, config: &PipelineConfig) -> Result<(TrackingTable, ParseStats)> {
    let (mut table, stats) = load_tracking_csv(path, team)?;
    extract_team(&mut table, &config.kinematics)
        .with_context(|| format!("Failed to extract kinematics for {}", path.display()))?;
    Ok((table, stats))
}

impl DatasetCache {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            entries: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Prepared table for `path`, reloading when the file changed on disk.
    pub fn get_or_load(&mut self, path: &Path, team: TeamId) -> Result<&CachedDataset> {
        let modified = modified_time(path)?;
        let key = DatasetKey::new(path, team);

        let entry = match self.entries.entry(key) {
            Entry::Occupied(e) if e.get().modified == modified => {
                debug!(file = %path.display(), team = %team, "dataset cache hit");
                e.into_mut()
            }
            Entry::Occupied(mut e) => {
                info!(file = %path.display(), team = %team, "dataset changed on disk, reloading");
                let (table, stats) = prepare(path, team, &self.config)?;
                e.insert(CachedDataset { modified, table, stats });
                e.into_mut()
            }
            Entry::Vacant(v) => {
                let (table, stats) = prepare(path, team, &self.config)?;
                v.insert(CachedDataset { modified, table, stats })
            }
        };

        Ok(entry)
    }

    /// Drop every team entry loaded from `path`. Returns how many were removed.
    pub fn invalidate(&mut self, path: &Path) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.path != path);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
