//! Tracking Cache Library
//!
//! Everything around the core pipeline that touches the filesystem:
//! - `loader` - team tracking CSV → `TrackingTable`
//! - `dataset_cache` - session cache of prepared tables, invalidated on file change
//! - series cache - derived dist/speed series → MessagePack → LZ4, with SHA256 checksum

pub mod dataset_cache;
pub mod loader;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::info;
use tracking_core::{DerivedSeries, PipelineConfig, PlayerId, TeamId, TrackingTable};

pub use dataset_cache::{CachedDataset, DatasetCache, DatasetKey};
pub use loader::{load_tracking_csv, ParseStats};

/// Cache metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 of the compressed file (hex)
    pub checksum: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    /// MessagePack size before compression (bytes)
    pub original_size: u64,
    /// Size on disk (bytes)
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
}

/// One player's published series as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSeries {
    pub player: PlayerId,
    pub series: DerivedSeries,
}

/// Contents of a series cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCache {
    pub schema_version: String,
    pub team: TeamId,
    pub frames: usize,
    pub period: Option<Vec<u8>>,
    pub players: Vec<CachedSeries>,
}

impl SeriesCache {
    /// Snapshot every player with a published speed series.
    pub fn from_table(table: &TrackingTable, schema_version: &str) -> Result<Self> {
        let players = table
            .players_with_speed()
            .into_iter()
            .map(|player| -> Result<CachedSeries> {
                let series = table
                    .derived(player)
                    .with_context(|| format!("Incomplete series for {}_{}", table.team(), player))?;
                Ok(CachedSeries { player, series })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            schema_version: schema_version.to_string(),
            team: table.team(),
            frames: table.frames(),
            period: table.period().map(<[u8]>::to_vec),
            players,
        })
    }

    /// Rebuild a table holding only the derived columns.
    pub fn into_table(self) -> Result<TrackingTable> {
        let mut table = TrackingTable::new(self.team, self.frames);
        if let Some(period) = self.period {
            table.set_period(period).context("Cached period has the wrong length")?;
        }
        for entry in &self.players {
            table
                .publish(entry.player, &entry.series)
                .with_context(|| format!("Cached series for player {} is corrupt", entry.player))?;
        }
        Ok(table)
    }
}

/// Read a pipeline config file. `.json` is parsed as JSON, anything else as
/// YAML. `None` gives the default config.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let parsed = if is_json {
        PipelineConfig::from_json_str(&text)
    } else {
        PipelineConfig::from_yaml_str(&text)
    };
    parsed.with_context(|| format!("Invalid config file: {}", path.display()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Persist a prepared table's derived series.
///
/// Pipeline: TrackingTable → SeriesCache → MessagePack → LZ4 → file
///
/// # Arguments
///
/// * `table` - Table after `extract_team`
/// * `output_msgpack_lz4` - Output file path
/// * `schema_version` - Schema version string stored in the file and metadata
pub fn build_series_cache(
    table: &TrackingTable,
    output_msgpack_lz4: &Path,
    schema_version: &str,
) -> Result<CacheMetadata> {
    let cache = SeriesCache::from_table(table, schema_version)?;
    if cache.players.is_empty() {
        bail!("No derived series to cache for team {}", table.team());
    }

    let msgpack_bytes =
        rmp_serde::to_vec(&cache).context("Failed to serialize series to MessagePack")?;
    let original_size = msgpack_bytes.len() as u64;

    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    let checksum = sha256_hex(&compressed);

    if let Some(parent) = output_msgpack_lz4.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(output_msgpack_lz4, &compressed).with_context(|| {
        format!(
            "Failed to write output file: {}",
            output_msgpack_lz4.display()
        )
    })?;

    let compression_ratio = compressed_size as f64 / original_size as f64;

    info!(
        file = %output_msgpack_lz4.display(),
        players = cache.players.len(),
        original = %human_bytes(original_size),
        compressed = %human_bytes(compressed_size),
        "series cache written"
    );

    Ok(CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio,
    })
}

/// Check a cache file against the checksum recorded at build time.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Pipeline: file → LZ4 decompress → MessagePack → SeriesCache
pub fn load_series_cache(cache_file: &Path) -> Result<SeriesCache> {
    let compressed = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize series cache")
}

/// Human-readable byte size formatting
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}
