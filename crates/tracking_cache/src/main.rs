//! Match physicals CLI
//!
//! Team leaderboard and player cards straight from a tracking CSV, plus a
//! builder for the derived-series cache.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracking_core::analysis::halves::half_distances;
#[cfg(feature = "cli")]
use tracking_core::{
    extract_sprints, player_summary, sort_leaderboard, team_leaderboard, zone_percentages,
    PlayerId, SortKey, SortOrder, TeamId,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "match-physicals")]
#[command(about = "Work-rate statistics from positional tracking data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Team leaderboard: distance, top speed and sprints per player
    Leaderboard {
        /// Team tracking CSV
        #[arg(long)]
        csv: PathBuf,

        /// Home or Away
        #[arg(long)]
        team: TeamId,

        /// Sort column (player_id, distance, top_speed, sprints)
        #[arg(long, default_value = "distance")]
        sort: SortKey,

        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: SortOrder,

        /// Pipeline config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Player card with zone split, halves and sprint segments
    Player {
        /// Team tracking CSV
        #[arg(long)]
        csv: PathBuf,

        /// Home or Away
        #[arg(long)]
        team: TeamId,

        /// Player id as it appears in the column names
        #[arg(long)]
        id: u32,

        /// Pipeline config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Extract a team and store its derived series as MsgPack+LZ4
    BuildCache {
        /// Team tracking CSV
        #[arg(long)]
        csv: PathBuf,

        /// Home or Away
        #[arg(long)]
        team: TeamId,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version stored in the cache
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Pipeline config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard {
            csv,
            team,
            sort,
            order,
            config,
            json,
        } => {
            let mut cache = tracking_cache::DatasetCache::new(tracking_cache::load_config(
                config.as_deref(),
            )?);
            let aggregation = cache.config().aggregation.clone();
            let dataset = cache.get_or_load(&csv, team)?;

            let mut rows = team_leaderboard(&dataset.table, &aggregation);
            sort_leaderboard(&mut rows, sort, order);

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!(
                    "{:<10} {:>12} {:>14} {:>8}",
                    "Player", "Distance km", "Top km/h", "Sprints"
                );
                for row in &rows {
                    println!(
                        "{:<10} {:>12.2} {:>14.2} {:>8}",
                        row.full_id(),
                        row.total_distance_km,
                        row.top_speed_kmh,
                        row.sprint_count
                    );
                }
            }
        }

        Commands::Player {
            csv,
            team,
            id,
            config,
        } => {
            let mut cache = tracking_cache::DatasetCache::new(tracking_cache::load_config(
                config.as_deref(),
            )?);
            let cfg = cache.config().clone();
            let dataset = cache.get_or_load(&csv, team)?;
            let table = &dataset.table;
            let player = PlayerId(id);

            let series = table.derived(player)?;
            let card = player_summary(team, player, &series, &cfg.aggregation);
            let zones = zone_percentages(&series, &cfg.aggregation);
            let halves = half_distances(table, player)?;
            let sprints = extract_sprints(
                &series,
                cfg.kinematics.dt,
                &cfg.aggregation.sprint_segment,
            );

            println!("{}", card.full_id());
            println!("   Minutes:       {}", table.minutes_played(cfg.kinematics.dt));
            println!("   Distance:      {:.2} km", card.total_distance_km);
            println!(
                "   Halves:        {:.2} km / {:.2} km",
                halves.first_half_km, halves.second_half_km
            );
            println!("   Top speed:     {:.2} km/h", card.top_speed_kmh);
            println!("   Sprints:       {}", card.sprint_count);
            println!("   Zones:");
            for (zone, pct) in zones.iter() {
                println!("     {:<10} {:>6.2}%", zone.name(), pct);
            }
            println!("   Sprint segments: {}", sprints.len());
            for sprint in &sprints {
                println!(
                    "     frames {:>6}-{:<6} {:>5.1}s {:>6.1} m  max {:>5.1} km/h",
                    sprint.start_frame,
                    sprint.end_frame,
                    sprint.duration_s,
                    sprint.distance_m,
                    sprint.max_speed_kmh
                );
            }
        }

        Commands::BuildCache {
            csv,
            team,
            out,
            schema_version,
            config,
            verify,
            metadata,
        } => {
            let mut cache = tracking_cache::DatasetCache::new(tracking_cache::load_config(
                config.as_deref(),
            )?);
            let dataset = cache.get_or_load(&csv, team)?;
            let meta = tracking_cache::build_series_cache(&dataset.table, &out, &schema_version)?;

            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &tracking_cache::CacheMetadata) {
    println!("Cache built");
    println!(
        "   Original size:   {}",
        tracking_cache::human_bytes(meta.original_size)
    );
    println!(
        "   Compressed size: {}",
        tracking_cache::human_bytes(meta.compressed_size)
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    if tracking_cache::verify_cache(cache_path, checksum)? {
        tracing::info!(file = %cache_path.display(), "cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("Cache verification failed: checksum mismatch")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &tracking_cache::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    tracing::info!(file = %path.display(), "metadata saved");
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("match-physicals CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
