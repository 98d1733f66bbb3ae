//! Terrain synthesis is a pure function of its inputs

use proptest::prelude::*;

use living_world::core::config::TerrainConfig;
use living_world::core::types::Cell;
use living_world::terrain::{
    ExclusionZones, GroundPatchGenerator, LakeGenerator, LakeMaterial, LakeSite, TerrainGenerator,
};
use living_world::world::{build_occupancy, LocationTable};

fn small_config() -> TerrainConfig {
    TerrainConfig {
        lake_resolution: 24,
        patch_resolution: 16,
        ..TerrainConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn lake_fields_are_bit_identical(
        seed in any::<u64>(),
        cx in -20i32..20,
        cy in -20i32..20,
        radius in 0.5f32..6.0,
    ) {
        let terrain = TerrainGenerator::new(small_config());
        let a = terrain.generate(seed, Cell::new(cx, cy), radius);
        let b = terrain.generate(seed, Cell::new(cx, cy), radius);
        prop_assert!(a.bit_identical(&b));
        prop_assert!(a.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn patch_fields_are_bit_identical(seed in any::<u64>(), cx in 0i32..12, cy in 0i32..12) {
        let terrain = TerrainGenerator::new(small_config());
        let a = terrain.generate_patch(seed, Cell::new(cx, cy));
        let b = terrain.generate_patch(seed, Cell::new(cx, cy));
        prop_assert!(a.bit_identical(&b));
    }
}

#[test]
fn test_independent_generators_agree() {
    // Generating other features in between must not disturb the result
    let config = TerrainConfig::default();
    let first = LakeGenerator::new(1337, &config).height_field(Cell::new(15, 4), 2.5);

    let patches = GroundPatchGenerator::new(42, &config);
    for x in 0..4 {
        patches.height_field(Cell::new(x, x));
    }
    let other = LakeGenerator::new(7, &config);
    other.height_field(Cell::new(-3, 2), 4.0);

    let second = LakeGenerator::new(1337, &config).height_field(Cell::new(15, 4), 2.5);
    assert!(first.bit_identical(&second));
}

#[test]
fn test_lake_materials_are_stable() {
    let config = TerrainConfig::default();
    let lake = LakeGenerator::new(1337, &config);
    let field = lake.height_field(Cell::new(15, 4), 2.5);
    assert_eq!(lake.materials(&field), lake.materials(&field));
}

#[test]
fn test_standard_world_terrain() {
    let locations = LocationTable::default();
    let terrain = TerrainGenerator::default();

    let lake = terrain.lake(LakeSite::default());
    assert!(lake.materials.count(LakeMaterial::is_water) > 0);

    let patches = terrain.ground_patches(&locations);
    assert_eq!(patches.len(), 4);
    assert!(patches.iter().all(|p| p.size == 1));

    let zones = ExclusionZones::from_world(&locations, &[LakeSite::default()]);
    let mut grid = build_occupancy(12, &locations);
    let buildings = grid.len();
    zones.register_water(&mut grid);
    assert_eq!(grid.len(), buildings);
    assert!(zones.decoration_cells(12, 4).iter().all(|c| !zones.is_in_lake(*c)));
}
