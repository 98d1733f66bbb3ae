//! Living World - headless runner
//!
//! Builds the standard world, runs the needs scheduler on virtual time and
//! prints the agent's status at a fixed cadence.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use living_world::core::config::WorldConfig;
use living_world::core::error::Result;
use living_world::simulation::{LogHooks, NeedsScheduler, StatusSnapshot};
use living_world::terrain::{ExclusionZones, LakeSite, TerrainGenerator};
use living_world::world::{build_occupancy, LocationTable};

/// Headless Living World runner
#[derive(Parser, Debug)]
#[command(name = "living-world")]
#[command(about = "Run the needs-driven agent on virtual time and report its status")]
struct Args {
    /// Seed for goal choice and speech (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Virtual seconds to simulate
    #[arg(long, default_value_t = 120)]
    seconds: u32,

    /// Frames per virtual second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seconds between status reports
    #[arg(long, default_value_t = 10)]
    report_every: u32,

    /// TOML config file; missing values use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("living_world=info")),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    tracing::info!(seed = config.seed, grid = config.grid.size, "Building world");

    let locations = LocationTable::default();
    locations.check_bounds(config.grid.size)?;
    let mut occupancy = build_occupancy(config.grid.size, &locations);

    let site = LakeSite::default();
    let zones = ExclusionZones::from_world(&locations, &[site]);
    let water_cells = zones.register_water(&mut occupancy);
    let lake = TerrainGenerator::new(config.terrain.clone()).lake(site);
    let water_samples: usize = lake
        .material_counts()
        .iter()
        .filter(|(material, _)| material.is_water())
        .map(|(_, n)| n)
        .sum();
    tracing::info!(
        center = %site.center,
        radius = site.radius,
        water_cells,
        water_samples,
        decorations = zones.decoration_cells(config.grid.size, 4).len(),
        "Generated lake"
    );

    let mut scheduler = NeedsScheduler::new(config, &occupancy, locations, LogHooks);
    scheduler.start();

    let frame_ms = (1000 / args.fps.max(1)).max(1);
    let total_ms = args.seconds as u64 * 1000;
    let report_ms = args.report_every.max(1) as u64 * 1000;

    let mut elapsed_ms = 0u64;
    let mut next_report_ms = 0u64;
    while elapsed_ms < total_ms {
        if elapsed_ms >= next_report_ms {
            report(&scheduler.status(), &args.format)?;
            next_report_ms += report_ms;
        }
        scheduler.advance(frame_ms);
        elapsed_ms += frame_ms as u64;
    }

    scheduler.stop();
    report(&scheduler.status(), &args.format)?;
    Ok(())
}

fn report(status: &StatusSnapshot, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string(status)?);
    } else {
        println!("{}", status);
    }
    Ok(())
}
