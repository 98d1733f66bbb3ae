//! Square grids of scalar samples in [0, 1]

use serde::{Deserialize, Serialize};

/// Row-major `resolution` x `resolution` samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    resolution: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// Build by evaluating `f(x, y)` for every sample
    pub fn from_fn(resolution: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                values.push(f(x, y));
            }
        }
        Self { resolution, values }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        self.values.get(y * self.resolution + x).copied()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Sample nearest to normalized coordinates in [-1, 1)
    pub fn sample_normalized(&self, nx: f32, ny: f32) -> Option<f32> {
        if !(-1.0..1.0).contains(&nx) || !(-1.0..1.0).contains(&ny) {
            return None;
        }
        let res = self.resolution as f32;
        let x = ((nx / 2.0 + 0.5) * res) as usize;
        let y = ((ny / 2.0 + 0.5) * res) as usize;
        self.get(x, y)
    }

    /// Bitwise equality, for reproducibility checks
    pub fn bit_identical(&self, other: &HeightField) -> bool {
        self.resolution == other.resolution
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// Sample index to a coordinate in [-1, 1)
pub fn normalized(index: usize, resolution: usize) -> f64 {
    (index as f64 / resolution as f64 - 0.5) * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_row_major() {
        let field = HeightField::from_fn(4, |x, y| (y * 4 + x) as f32 / 16.0);
        assert_eq!(field.resolution(), 4);
        assert_eq!(field.get(1, 2), Some(9.0 / 16.0));
        assert_eq!(field.get(4, 0), None);
        assert_eq!(field.values().len(), 16);
    }

    #[test]
    fn test_normalized_coordinates() {
        assert_eq!(normalized(0, 64), -1.0);
        assert_eq!(normalized(32, 64), 0.0);
        assert!(normalized(63, 64) < 1.0);
    }

    #[test]
    fn test_sample_normalized() {
        let field = HeightField::from_fn(4, |x, _| x as f32);
        assert_eq!(field.sample_normalized(-1.0, 0.0), Some(0.0));
        assert_eq!(field.sample_normalized(0.0, 0.0), Some(2.0));
        assert_eq!(field.sample_normalized(0.99, 0.0), Some(3.0));
        assert_eq!(field.sample_normalized(1.0, 0.0), None);
    }

    #[test]
    fn test_bit_identical() {
        let a = HeightField::from_fn(3, |x, y| (x + y) as f32 * 0.1);
        let b = a.clone();
        let c = HeightField::from_fn(3, |x, y| (x * y) as f32 * 0.1);
        assert!(a.bit_identical(&b));
        assert!(!a.bit_identical(&c));
    }
}
