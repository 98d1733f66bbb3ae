//! Cells claimed by terrain features and buildings
//!
//! Decorations are scattered in a padding ring around the walkable grid.
//! Lakes usually sit in that ring too, so decoration placement asks here
//! before putting a tree in the water.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::Cell;
use crate::world::location::{Location, LocationTable};
use crate::world::occupancy::{GridOccupancy, Occupant};

/// A lake placed in grid space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LakeSite {
    pub center: Cell,
    /// In cells
    pub radius: f32,
    pub seed: u64,
}

impl Default for LakeSite {
    /// One lake off the north-east edge of the standard 12x12 grid
    fn default() -> Self {
        Self {
            center: Cell::new(15, 4),
            radius: 2.5,
            seed: 1337,
        }
    }
}

impl LakeSite {
    pub fn new(center: Cell, radius: f32, seed: u64) -> Self {
        Self {
            center,
            radius,
            seed,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let dx = (cell.x - self.center.x) as f32;
        let dy = (cell.y - self.center.y) as f32;
        (dx * dx + dy * dy).sqrt() < self.radius + 0.5
    }

    /// Every cell inside the lake
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let reach = self.radius.ceil() as i32 + 1;
        let center = self.center;
        (-reach..=reach)
            .flat_map(move |dy| (-reach..=reach).map(move |dx| center.offset(dx, dy)))
            .filter(move |cell| self.contains(*cell))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExclusionZones {
    lakes: Vec<LakeSite>,
    footprints: Vec<Location>,
}

impl ExclusionZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zones for a location table plus a set of lakes
    pub fn from_world(locations: &LocationTable, lakes: &[LakeSite]) -> Self {
        let mut zones = Self::new();
        for location in locations.iter() {
            zones.add_location(*location);
        }
        for lake in lakes {
            zones.add_lake(*lake);
        }
        zones
    }

    pub fn add_lake(&mut self, lake: LakeSite) {
        self.lakes.push(lake);
    }

    pub fn add_location(&mut self, location: Location) {
        self.footprints.push(location);
    }

    pub fn lakes(&self) -> &[LakeSite] {
        &self.lakes
    }

    pub fn is_in_lake(&self, cell: Cell) -> bool {
        self.lakes.iter().any(|lake| lake.contains(cell))
    }

    pub fn is_excluded(&self, cell: Cell) -> bool {
        self.is_in_lake(cell) || self.footprints.iter().any(|loc| loc.contains(cell))
    }

    /// Mark lake cells inside the grid as water; returns how many were recorded
    pub fn register_water(&self, occupancy: &mut GridOccupancy) -> usize {
        let registered = self
            .lakes
            .iter()
            .flat_map(|lake| lake.cells())
            .filter(|cell| occupancy.register(*cell, Occupant::Water))
            .count();
        debug!(registered, "Registered lake cells");
        registered
    }

    /// Free cells in the ring of width `padding` around a `size` x `size` grid,
    /// row by row
    pub fn decoration_cells(&self, size: i32, padding: i32) -> Vec<Cell> {
        let mut cells = Vec::new();
        for y in -padding..size + padding {
            for x in -padding..size + padding {
                let inside = (0..size).contains(&x) && (0..size).contains(&y);
                let cell = Cell::new(x, y);
                if !inside && !self.is_excluded(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}
