//! Worn ground under building entrances

use serde::{Deserialize, Serialize};

use crate::core::config::TerrainConfig;
use crate::core::types::Cell;
use crate::terrain::bands::{jitter, MaterialMap, PatchBands, PatchMaterial};
use crate::terrain::heightfield::{normalized, HeightField};
use crate::terrain::lake::seed_offset;
use crate::terrain::noise::{Fbm, SimplexNoise};
use crate::world::location::Location;

/// Seed shared by every ground patch in the world
pub const DEFAULT_PATCH_SEED: u64 = 42;

const EDGE_WEIGHT: f64 = 0.25;
const DETAIL_FREQUENCY: f64 = 8.0;
const DETAIL_JITTER: f32 = 0.06;
const GRAIN_FREQUENCY: f64 = 1.8;

/// A generated patch anchored on one cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundPatch {
    pub anchor: Cell,
    /// Footprint in tiles
    pub size: u8,
    pub field: HeightField,
    pub materials: MaterialMap<Option<PatchMaterial>>,
}

#[derive(Debug, Clone)]
pub struct GroundPatchGenerator {
    noise: SimplexNoise,
    resolution: usize,
    edge_scale: f64,
    bands: PatchBands,
}

impl GroundPatchGenerator {
    pub fn new(seed: u64, config: &TerrainConfig) -> Self {
        Self {
            noise: SimplexNoise::new(seed),
            resolution: config.patch_resolution,
            edge_scale: config.patch_edge_scale as f64,
            bands: PatchBands::default(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    pub fn height_field(&self, center: Cell) -> HeightField {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let res = self.resolution;

        HeightField::from_fn(res, |x, y| {
            let nx = normalized(x, res);
            let ny = normalized(y, res);
            let dist = (nx * nx + ny * ny).sqrt();
            let edge = self.noise.fbm(
                cx + nx * self.edge_scale,
                cy + ny * self.edge_scale,
                Fbm::octaves(3),
            );
            (dist + edge * EDGE_WEIGHT).clamp(0.0, 1.0) as f32
        })
    }

    /// Three tones; `None` where the patch fades into grass
    pub fn materials(&self, field: &HeightField) -> MaterialMap<Option<PatchMaterial>> {
        let res = field.resolution() as f64;
        let offset = seed_offset(self.noise.seed());

        MaterialMap::from_field(field, |x, y, value| {
            let detail = self.noise.fbm(
                x as f64 / res * DETAIL_FREQUENCY + offset,
                y as f64 / res * DETAIL_FREQUENCY - offset,
                Fbm::octaves(3),
            ) as f32;
            let grain = self
                .noise
                .noise2d(x as f64 * GRAIN_FREQUENCY, y as f64 * GRAIN_FREQUENCY)
                as f32;
            self.bands
                .classify_with_grain(jitter(value, detail, DETAIL_JITTER), grain)
        })
    }

    pub fn generate(&self, anchor: Cell, size: u8) -> GroundPatch {
        let field = self.height_field(anchor);
        let materials = self.materials(&field);
        GroundPatch {
            anchor,
            size,
            field,
            materials,
        }
    }

    /// Single-tile patch in front of a location's entrance
    pub fn for_location(&self, location: &Location) -> GroundPatch {
        self.generate(location.entry_cell(), 1)
    }
}
