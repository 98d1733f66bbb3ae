//! Slicing height values into materials
//!
//! Lower values are closer to the feature center. A small noise jitter is
//! added before thresholding so band edges are not perfect rings.

use serde::{Deserialize, Serialize};

use crate::terrain::heightfield::HeightField;

/// Materials of a lake, from the center outward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LakeMaterial {
    DeepWater,
    MidWater,
    ShallowWater,
    WetSand,
    Sand,
    Pebbles,
    Grass,
}

impl LakeMaterial {
    pub const ALL: [LakeMaterial; 7] = [
        LakeMaterial::DeepWater,
        LakeMaterial::MidWater,
        LakeMaterial::ShallowWater,
        LakeMaterial::WetSand,
        LakeMaterial::Sand,
        LakeMaterial::Pebbles,
        LakeMaterial::Grass,
    ];

    pub fn is_water(self) -> bool {
        matches!(
            self,
            LakeMaterial::DeepWater | LakeMaterial::MidWater | LakeMaterial::ShallowWater
        )
    }

    /// One-character rendering for text previews
    pub fn glyph(self) -> char {
        match self {
            LakeMaterial::DeepWater => '#',
            LakeMaterial::MidWater => '=',
            LakeMaterial::ShallowWater => '~',
            LakeMaterial::WetSand => ':',
            LakeMaterial::Sand => '.',
            LakeMaterial::Pebbles => ',',
            LakeMaterial::Grass => ' ',
        }
    }
}

/// Upper bounds (exclusive) of each lake band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LakeBands {
    pub deep_water: f32,
    pub mid_water: f32,
    pub shallow_water: f32,
    pub wet_sand: f32,
    pub sand: f32,
    pub pebbles: f32,
}

impl Default for LakeBands {
    fn default() -> Self {
        Self {
            deep_water: 0.30,
            mid_water: 0.40,
            shallow_water: 0.50,
            wet_sand: 0.55,
            sand: 0.60,
            pebbles: 0.65,
        }
    }
}

impl LakeBands {
    pub fn classify(&self, value: f32) -> LakeMaterial {
        if value < self.deep_water {
            LakeMaterial::DeepWater
        } else if value < self.mid_water {
            LakeMaterial::MidWater
        } else if value < self.shallow_water {
            LakeMaterial::ShallowWater
        } else if value < self.wet_sand {
            LakeMaterial::WetSand
        } else if value < self.sand {
            LakeMaterial::Sand
        } else if value < self.pebbles {
            LakeMaterial::Pebbles
        } else {
            LakeMaterial::Grass
        }
    }
}

/// Worn-ground tones of a patch, from the center outward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchMaterial {
    Inner,
    Middle,
    Outer,
}

impl PatchMaterial {
    pub fn glyph(self) -> char {
        match self {
            PatchMaterial::Inner => '@',
            PatchMaterial::Middle => '+',
            PatchMaterial::Outer => '-',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchBands {
    pub inner: f32,
    pub middle: f32,
    pub outer: f32,
    /// Distance below/above the middle cutoff where grain can swap tones
    pub middle_swap_margin: f32,
    pub outer_swap_margin: f32,
}

impl Default for PatchBands {
    fn default() -> Self {
        Self {
            inner: 0.30,
            middle: 0.50,
            outer: 0.72,
            middle_swap_margin: 0.04,
            outer_swap_margin: 0.05,
        }
    }
}

impl PatchBands {
    /// Band for a jittered value; `None` outside the patch
    pub fn classify(&self, value: f32) -> Option<PatchMaterial> {
        if value < self.inner {
            Some(PatchMaterial::Inner)
        } else if value < self.middle {
            Some(PatchMaterial::Middle)
        } else if value < self.outer {
            Some(PatchMaterial::Outer)
        } else {
            None
        }
    }

    /// Classify, then let high-frequency grain break up the band edges
    pub fn classify_with_grain(&self, value: f32, grain: f32) -> Option<PatchMaterial> {
        let material = self.classify(value)?;
        Some(match material {
            PatchMaterial::Middle if grain > 0.35 && value < self.middle + self.middle_swap_margin => {
                PatchMaterial::Inner
            }
            PatchMaterial::Middle if grain < -0.35 && value > self.middle - self.middle_swap_margin => {
                PatchMaterial::Outer
            }
            PatchMaterial::Outer if grain > 0.5 && value > self.outer - self.outer_swap_margin => {
                PatchMaterial::Middle
            }
            other => other,
        })
    }
}

/// Height plus scaled detail noise, clamped to [0, 1]
pub fn jitter(value: f32, detail: f32, amount: f32) -> f32 {
    (value + detail * amount).clamp(0.0, 1.0)
}

/// Per-sample materials matching a height field's layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialMap<T> {
    resolution: usize,
    cells: Vec<T>,
}

impl<T: Copy> MaterialMap<T> {
    pub fn from_field(field: &HeightField, mut f: impl FnMut(usize, usize, f32) -> T) -> Self {
        let resolution = field.resolution();
        let cells = field
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| f(i % resolution, i / resolution, *v))
            .collect();
        Self { resolution, cells }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        self.cells.get(y * self.resolution + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.resolution.max(1))
    }

    pub fn count(&self, pred: impl Fn(T) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(**c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lake_band_order() {
        let bands = LakeBands::default();
        assert_eq!(bands.classify(0.0), LakeMaterial::DeepWater);
        assert_eq!(bands.classify(0.30), LakeMaterial::MidWater);
        assert_eq!(bands.classify(0.45), LakeMaterial::ShallowWater);
        assert_eq!(bands.classify(0.52), LakeMaterial::WetSand);
        assert_eq!(bands.classify(0.58), LakeMaterial::Sand);
        assert_eq!(bands.classify(0.64), LakeMaterial::Pebbles);
        assert_eq!(bands.classify(0.65), LakeMaterial::Grass);
        assert!(LakeMaterial::ShallowWater.is_water());
        assert!(!LakeMaterial::WetSand.is_water());
    }

    #[test]
    fn test_patch_bands() {
        let bands = PatchBands::default();
        assert_eq!(bands.classify(0.1), Some(PatchMaterial::Inner));
        assert_eq!(bands.classify(0.6), Some(PatchMaterial::Outer));
        assert_eq!(bands.classify(0.8), None);
    }

    #[test]
    fn test_grain_swaps_near_cutoffs() {
        let bands = PatchBands::default();
        assert_eq!(bands.classify_with_grain(0.45, 0.4), Some(PatchMaterial::Inner));
        assert_eq!(bands.classify_with_grain(0.47, -0.4), Some(PatchMaterial::Outer));
        assert_eq!(bands.classify_with_grain(0.40, 0.0), Some(PatchMaterial::Middle));
        assert_eq!(bands.classify_with_grain(0.70, 0.6), Some(PatchMaterial::Middle));
        assert_eq!(bands.classify_with_grain(0.60, 0.6), Some(PatchMaterial::Outer));
        assert_eq!(bands.classify_with_grain(0.90, 0.9), None);
    }

    #[test]
    fn test_jitter_clamps() {
        assert_eq!(jitter(0.98, 1.0, 0.05), 1.0);
        assert_eq!(jitter(0.01, -1.0, 0.05), 0.0);
        assert!((jitter(0.5, 0.5, 0.06) - 0.53).abs() < 1e-6);
    }

    #[test]
    fn test_material_map_layout() {
        let field = HeightField::from_fn(3, |x, y| (x + 3 * y) as f32);
        let map = MaterialMap::from_field(&field, |x, y, v| (x, y, v as usize));
        assert_eq!(map.get(2, 1), Some((2, 1, 5)));
        assert_eq!(map.rows().count(), 3);
        assert_eq!(map.count(|(x, _, _)| x == 0), 3);
    }
}
