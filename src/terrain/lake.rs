//! Lake height fields and shore bands

use tracing::debug;

use crate::core::config::TerrainConfig;
use crate::core::types::Cell;
use crate::terrain::bands::{jitter, LakeBands, LakeMaterial, MaterialMap};
use crate::terrain::heightfield::{normalized, HeightField};
use crate::terrain::noise::{Fbm, SimplexNoise};

const EDGE_WEIGHT: f64 = 0.3;
const INTERIOR_WEIGHT: f64 = 0.2;
const DETAIL_FREQUENCY: f64 = 7.0;
const DETAIL_JITTER: f32 = 0.05;

/// Generates one lake per seed
///
/// Height grows with distance from the center, so low values are deep water.
#[derive(Debug, Clone)]
pub struct LakeGenerator {
    noise: SimplexNoise,
    resolution: usize,
    noise_scale: f64,
    edge_scale: f64,
    bands: LakeBands,
}

impl LakeGenerator {
    pub fn new(seed: u64, config: &TerrainConfig) -> Self {
        Self {
            noise: SimplexNoise::new(seed),
            resolution: config.lake_resolution,
            noise_scale: config.lake_noise_scale as f64,
            edge_scale: config.lake_edge_scale as f64,
            bands: LakeBands::default(),
        }
    }

    pub fn with_bands(mut self, bands: LakeBands) -> Self {
        self.bands = bands;
        self
    }

    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    pub fn bands(&self) -> &LakeBands {
        &self.bands
    }

    /// Radial gradient plus an edge-warping term and a radius-scaled interior term
    pub fn height_field(&self, center: Cell, radius: f32) -> HeightField {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let interior_scale = radius as f64 * self.noise_scale;
        let res = self.resolution;

        HeightField::from_fn(res, |x, y| {
            let nx = normalized(x, res);
            let ny = normalized(y, res);
            let dist = (nx * nx + ny * ny).sqrt();

            let edge = self.noise.fbm(
                cx + nx * self.edge_scale,
                cy + ny * self.edge_scale,
                Fbm::octaves(2),
            );
            let interior = self.noise.fbm(
                cx + nx * interior_scale,
                cy + ny * interior_scale,
                Fbm::octaves(4),
            );

            (dist + edge * EDGE_WEIGHT + interior * INTERIOR_WEIGHT).clamp(0.0, 1.0) as f32
        })
    }

    /// Detail noise for one sample, used to roughen band boundaries
    fn detail(&self, x: usize, y: usize, resolution: usize) -> f32 {
        let offset = seed_offset(self.noise.seed());
        let res = resolution as f64;
        self.noise.fbm(
            x as f64 / res * DETAIL_FREQUENCY + offset,
            y as f64 / res * DETAIL_FREQUENCY - offset,
            Fbm::octaves(3),
        ) as f32
    }

    pub fn materials(&self, field: &HeightField) -> MaterialMap<LakeMaterial> {
        let res = field.resolution();
        let map = MaterialMap::from_field(field, |x, y, value| {
            let detail = self.detail(x, y, res);
            self.bands.classify(jitter(value, detail, DETAIL_JITTER))
        });
        debug!(
            seed = self.seed(),
            water = map.count(LakeMaterial::is_water),
            "Classified lake"
        );
        map
    }
}

/// Seeds are large integers; keep the detail lookup near the noise origin
pub(crate) fn seed_offset(seed: u64) -> f64 {
    (seed % 10_000) as f64
}
