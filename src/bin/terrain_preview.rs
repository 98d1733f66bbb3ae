//! Terrain Preview
//!
//! Prints a lake or ground patch as ASCII, one glyph per sample.

use std::path::PathBuf;

use clap::Parser;

use living_world::core::config::WorldConfig;
use living_world::core::error::Result;
use living_world::core::types::Cell;
use living_world::terrain::{GroundPatchGenerator, LakeGenerator, LakeSite, DEFAULT_PATCH_SEED};

/// ASCII preview of procedural terrain
#[derive(Parser, Debug)]
#[command(name = "terrain_preview")]
#[command(about = "Render a lake or ground patch material map as text")]
struct Args {
    /// Feature to render: lake or patch
    #[arg(long, default_value = "lake")]
    kind: String,

    /// Noise seed (defaults to the standard lake or patch seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Feature center X in grid cells
    #[arg(long, default_value_t = 15)]
    x: i32,

    /// Feature center Y in grid cells
    #[arg(long, default_value_t = 4)]
    y: i32,

    /// Lake radius in cells
    #[arg(long, default_value_t = 2.5)]
    radius: f32,

    /// Override the configured resolution
    #[arg(long)]
    resolution: Option<usize>,

    /// TOML config file for terrain settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("living_world=info")),
        )
        .init();

    let mut terrain = match &args.config {
        Some(path) => WorldConfig::load(path)?.terrain,
        None => WorldConfig::default().terrain,
    };
    let center = Cell::new(args.x, args.y);

    let rows: Vec<String> = match args.kind.as_str() {
        "patch" => {
            if let Some(resolution) = args.resolution {
                terrain.patch_resolution = resolution.max(1);
            }
            let generator =
                GroundPatchGenerator::new(args.seed.unwrap_or(DEFAULT_PATCH_SEED), &terrain);
            let patch = generator.generate(center, 1);
            let rows: Vec<String> = patch
                .materials
                .rows()
                .map(|row| {
                    row.iter()
                        .map(|m| m.map_or(' ', |m| m.glyph()))
                        .collect()
                })
                .collect();
            rows
        }
        _ => {
            if let Some(resolution) = args.resolution {
                terrain.lake_resolution = resolution.max(1);
            }
            let seed = args.seed.unwrap_or(LakeSite::default().seed);
            let generator = LakeGenerator::new(seed, &terrain);
            let field = generator.height_field(center, args.radius);
            let materials = generator.materials(&field);
            let rows: Vec<String> = materials
                .rows()
                .map(|row| row.iter().map(|m| m.glyph()).collect())
                .collect();
            rows
        }
    };

    println!("{} at {} (seed {:?})", args.kind, center, args.seed);
    for row in rows {
        println!("|{}|", row);
    }
    Ok(())
}
