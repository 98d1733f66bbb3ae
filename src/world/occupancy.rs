//! Occupied cells for pathfinding and collision
//!
//! Sparse map from grid cell to the object occupying it. Written once per
//! object at world-build time and read many times afterward, so there is no
//! removal operation.

use ahash::AHashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::Cell;
use crate::world::location::{Location, LocationKind};

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    Building(LocationKind),
    Tree,
    Bush,
    Rock,
    Water,
}

impl Occupant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupant::Building(kind) => kind.as_str(),
            Occupant::Tree => "tree",
            Occupant::Bush => "bush",
            Occupant::Rock => "rock",
            Occupant::Water => "water",
        }
    }
}

/// Set of occupied grid cells inside a square grid
#[derive(Debug, Clone)]
pub struct GridOccupancy {
    cells: AHashMap<Cell, Occupant>,
    size: i32,
}

impl GridOccupancy {
    /// Create an empty occupancy map for a `size` x `size` grid
    pub fn new(size: i32) -> Self {
        Self {
            cells: AHashMap::new(),
            size,
        }
    }

    /// Side length of the grid in cells
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Check whether a cell lies inside the grid
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// Mark a cell as occupied
    ///
    /// Cells outside the grid are ignored; the grid edge already blocks
    /// movement there. Returns whether the cell was recorded.
    pub fn register(&mut self, cell: Cell, occupant: Occupant) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        self.cells.insert(cell, occupant);
        true
    }

    /// Mark every cell of a location's footprint as occupied by its building
    pub fn register_location(&mut self, location: &Location) {
        for cell in location.footprint() {
            self.register(cell, Occupant::Building(location.kind()));
        }
    }

    /// Check if a cell is occupied
    #[inline]
    pub fn is_cell_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Check if the cell containing a continuous position is occupied
    #[inline]
    pub fn is_occupied(&self, pos: Vec2) -> bool {
        self.is_cell_occupied(Cell::containing(pos))
    }

    /// What occupies the cell containing a continuous position
    pub fn occupant(&self, pos: Vec2) -> Option<Occupant> {
        self.occupant_at(Cell::containing(pos))
    }

    pub fn occupant_at(&self, cell: Cell) -> Option<Occupant> {
        self.cells.get(&cell).copied()
    }

    /// Iterate over all occupied cells (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Occupant)> + '_ {
        self.cells.iter().map(|(cell, occupant)| (*cell, *occupant))
    }

    /// Get the number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if there are no occupied cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let mut grid = GridOccupancy::new(12);

        assert!(grid.register(Cell::new(5, 10), Occupant::Tree));
        assert!(grid.register(Cell::new(5, 11), Occupant::Rock));

        assert!(grid.is_cell_occupied(Cell::new(5, 10)));
        assert!(grid.is_cell_occupied(Cell::new(5, 11)));
        assert!(!grid.is_cell_occupied(Cell::new(5, 9)));
        assert_eq!(grid.occupant_at(Cell::new(5, 11)), Some(Occupant::Rock));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_float_queries_floor_to_cell() {
        let mut grid = GridOccupancy::new(12);
        grid.register(Cell::new(3, 4), Occupant::Bush);

        assert!(grid.is_occupied(Vec2::new(3.0, 4.0)));
        assert!(grid.is_occupied(Vec2::new(3.99, 4.5)));
        assert!(!grid.is_occupied(Vec2::new(4.0, 4.5)));
        assert_eq!(grid.occupant(Vec2::new(3.2, 4.8)), Some(Occupant::Bush));
        assert_eq!(grid.occupant(Vec2::new(2.9, 4.8)), None);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut grid = GridOccupancy::new(12);
        assert!(!grid.register(Cell::new(-1, 0), Occupant::Tree));
        assert!(!grid.register(Cell::new(12, 3), Occupant::Tree));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_register_location_footprint() {
        let mut grid = GridOccupancy::new(12);
        let cafe = Location::new(Cell::new(6, 6), 2, LocationKind::Cafe).unwrap();
        grid.register_location(&cafe);

        assert_eq!(grid.len(), 4);
        for cell in [(6, 6), (7, 6), (6, 7), (7, 7)] {
            assert_eq!(
                grid.occupant_at(cell.into()),
                Some(Occupant::Building(LocationKind::Cafe))
            );
        }
        assert!(!grid.is_cell_occupied(Cell::new(8, 6)));
    }

    #[test]
    fn test_occupant_tag_names() {
        assert_eq!(Occupant::Building(LocationKind::Home).as_str(), "home");
        assert_eq!(Occupant::Water.as_str(), "water");
    }
}
