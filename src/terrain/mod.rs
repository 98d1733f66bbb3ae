//! Procedural terrain: lakes and worn ground patches
//!
//! Everything here is a pure function of its seed and placement. Generators
//! hold a noise source built from their seed and nothing else, so two calls
//! with the same arguments produce bit-identical height fields.

pub mod bands;
pub mod exclusion;
pub mod ground_patch;
pub mod heightfield;
pub mod lake;
pub mod noise;

pub use bands::{LakeBands, LakeMaterial, MaterialMap, PatchBands, PatchMaterial};
pub use exclusion::{ExclusionZones, LakeSite};
pub use ground_patch::{GroundPatch, GroundPatchGenerator, DEFAULT_PATCH_SEED};
pub use heightfield::HeightField;
pub use lake::LakeGenerator;
pub use noise::{Fbm, SimplexNoise};

use crate::core::config::TerrainConfig;
use crate::core::types::Cell;
use crate::world::location::LocationTable;

/// A generated lake with its material bands
#[derive(Debug, Clone)]
pub struct Lake {
    pub site: LakeSite,
    pub field: HeightField,
    pub materials: MaterialMap<LakeMaterial>,
}

impl Lake {
    /// Samples per material, ordered from deep water to grass
    pub fn material_counts(&self) -> Vec<(LakeMaterial, usize)> {
        LakeMaterial::ALL
            .iter()
            .map(|&material| (material, self.materials.count(|m| m == material)))
            .collect()
    }
}

/// Entry point for world-build-time terrain synthesis
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Lake height field for a seed, center and radius in cells
    pub fn generate(&self, seed: u64, center: Cell, radius: f32) -> HeightField {
        LakeGenerator::new(seed, &self.config).height_field(center, radius)
    }

    /// Ground patch height field; same pipeline at a smaller scale
    pub fn generate_patch(&self, seed: u64, center: Cell) -> HeightField {
        GroundPatchGenerator::new(seed, &self.config).height_field(center)
    }

    pub fn lake(&self, site: LakeSite) -> Lake {
        let generator = LakeGenerator::new(site.seed, &self.config);
        let field = generator.height_field(site.center, site.radius);
        let materials = generator.materials(&field);
        Lake {
            site,
            field,
            materials,
        }
    }

    /// One patch per location, at its entrance
    pub fn ground_patches(&self, locations: &LocationTable) -> Vec<GroundPatch> {
        let generator = GroundPatchGenerator::new(DEFAULT_PATCH_SEED, &self.config);
        locations
            .iter()
            .map(|location| generator.for_location(location))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let terrain = TerrainGenerator::default();
        let a = terrain.generate(1337, Cell::new(15, 4), 2.5);
        let b = terrain.generate(1337, Cell::new(15, 4), 2.5);
        assert!(a.bit_identical(&b));
        assert_eq!(a.resolution(), 64);
    }

    #[test]
    fn test_seed_changes_field() {
        let terrain = TerrainGenerator::default();
        let a = terrain.generate(1, Cell::new(15, 4), 2.5);
        let b = terrain.generate(2, Cell::new(15, 4), 2.5);
        assert!(!a.bit_identical(&b));
    }

    #[test]
    fn test_patch_resolution_from_config() {
        let terrain = TerrainGenerator::new(TerrainConfig {
            patch_resolution: 16,
            ..TerrainConfig::default()
        });
        assert_eq!(terrain.generate_patch(42, Cell::new(1, 3)).resolution(), 16);
    }

    #[test]
    fn test_one_patch_per_location() {
        let terrain = TerrainGenerator::default();
        let locations = LocationTable::default();
        let patches = terrain.ground_patches(&locations);

        assert_eq!(patches.len(), locations.len());
        for (patch, location) in patches.iter().zip(locations.iter()) {
            assert_eq!(patch.anchor, location.entry_cell());
        }
    }

    #[test]
    fn test_lake_bundle_matches_field() {
        let terrain = TerrainGenerator::default();
        let lake = terrain.lake(LakeSite::default());
        assert!(lake
            .field
            .bit_identical(&terrain.generate(1337, Cell::new(15, 4), 2.5)));
        assert_eq!(lake.materials.resolution(), lake.field.resolution());
    }

    #[test]
    fn test_material_counts_cover_every_sample() {
        let terrain = TerrainGenerator::default();
        let lake = terrain.lake(LakeSite::default());
        let counts = lake.material_counts();

        assert_eq!(counts.len(), LakeMaterial::ALL.len());
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 64 * 64);
        let water: usize = counts.iter().filter(|(m, _)| m.is_water()).map(|(_, n)| n).sum();
        assert_eq!(water, lake.materials.count(LakeMaterial::is_water));
        assert!(water > 0);
    }
}
