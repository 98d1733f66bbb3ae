//! Activity locations placed on the grid
//!
//! A location occupies a square footprint of 1x1 or 2x2 cells and is
//! immutable after placement. Its entry cell is the footprint cell with the
//! smallest screen-projected X (leftmost on an isometric screen), which is
//! the single walkable break in the otherwise blocking building.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};
use crate::core::types::{ActivityKind, Cell, NeedKind};

/// Kind of building at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Home,
    Cafe,
    Projects,
    Cases,
}

impl LocationKind {
    pub const ALL: [LocationKind; 4] = [
        LocationKind::Home,
        LocationKind::Cafe,
        LocationKind::Projects,
        LocationKind::Cases,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Home => "home",
            LocationKind::Cafe => "cafe",
            LocationKind::Projects => "projects",
            LocationKind::Cases => "cases",
        }
    }

    /// The need restored by finishing an activity here, and by how much
    pub fn replenishes(self) -> (NeedKind, f32) {
        match self {
            LocationKind::Home => (NeedKind::Energy, 40.0),
            LocationKind::Cafe => (NeedKind::Hunger, 40.0),
            LocationKind::Projects => (NeedKind::Fun, 35.0),
            LocationKind::Cases => (NeedKind::Social, 35.0),
        }
    }
}

/// A building placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    origin: Cell,
    size: u8,
    kind: LocationKind,
}

/// Unchecked wire form; deserialized locations go through `Location::new`
#[derive(Deserialize)]
struct RawLocation {
    origin: Cell,
    size: u8,
    kind: LocationKind,
}

impl TryFrom<RawLocation> for Location {
    type Error = WorldError;

    fn try_from(raw: RawLocation) -> Result<Self> {
        Location::new(raw.origin, raw.size, raw.kind)
    }
}

impl Location {
    /// Place a location with its top-left (in grid space) cell at `origin`
    ///
    /// Only 1x1 and 2x2 footprints exist.
    pub fn new(origin: Cell, size: u8, kind: LocationKind) -> Result<Self> {
        if !(1..=2).contains(&size) {
            return Err(WorldError::InvalidFootprint(size));
        }
        Ok(Self { origin, size, kind })
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// All cells in [x, x+N) x [y, y+N)
    pub fn footprint(&self) -> impl Iterator<Item = Cell> {
        let origin = self.origin;
        let n = self.size as i32;
        (0..n).flat_map(move |dx| (0..n).map(move |dy| origin.offset(dx, dy)))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let n = self.size as i32;
        cell.x >= self.origin.x
            && cell.x < self.origin.x + n
            && cell.y >= self.origin.y
            && cell.y < self.origin.y + n
    }

    /// Footprint cell with the minimum screen X; ties go to the larger y
    ///
    /// For a square footprint this is always (x, y + N - 1).
    pub fn entry_cell(&self) -> Cell {
        self.footprint()
            .min_by_key(|c| (c.screen_x_key(), -c.y))
            .unwrap_or(self.origin)
    }

    /// Fails with the first footprint cell outside a `size` x `size` grid
    pub fn check_bounds(&self, size: i32) -> Result<()> {
        match self
            .footprint()
            .find(|c| !(0..size).contains(&c.x) || !(0..size).contains(&c.y))
        {
            Some(cell) => Err(WorldError::CellOutOfBounds { cell, size }),
            None => Ok(()),
        }
    }

    /// Geometric center of the footprint
    pub fn center(&self) -> Vec2 {
        let half = self.size as f32 / 2.0;
        Vec2::new(self.origin.x as f32 + half, self.origin.y as f32 + half)
    }
}

/// The fixed set of activity locations in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationTable {
    locations: Vec<Location>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
        }
    }

    /// Add a location, replacing any earlier location of the same kind
    pub fn insert(&mut self, location: Location) {
        self.locations.retain(|l| l.kind() != location.kind());
        self.locations.push(location);
    }

    pub fn get(&self, kind: LocationKind) -> Option<&Location> {
        self.locations.iter().find(|l| l.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Check every footprint against the grid before building occupancy
    pub fn check_bounds(&self, size: i32) -> Result<()> {
        self.locations.iter().try_for_each(|l| l.check_bounds(size))
    }

    /// Where an activity takes place; `Work` has two candidates
    pub fn candidates(&self, activity: ActivityKind) -> Vec<&Location> {
        let kinds: &[LocationKind] = match activity {
            ActivityKind::Rest => &[LocationKind::Home],
            ActivityKind::Eat => &[LocationKind::Cafe],
            ActivityKind::Play => &[LocationKind::Projects],
            ActivityKind::Socialize => &[LocationKind::Cases],
            ActivityKind::Work => &[LocationKind::Projects, LocationKind::Cases],
        };
        kinds.iter().filter_map(|k| self.get(*k)).collect()
    }
}

impl Default for LocationTable {
    /// Standard layout on the 12x12 grid: four 2x2 buildings
    fn default() -> Self {
        let layout = [
            (LocationKind::Home, 6, 2),
            (LocationKind::Projects, 2, 7),
            (LocationKind::Cases, 6, 6),
            (LocationKind::Cafe, 1, 2),
        ];

        let mut table = Self::new();
        for (kind, x, y) in layout {
            table.insert(Location {
                origin: Cell::new(x, y),
                size: 2,
                kind,
            });
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_size_validated() {
        assert!(Location::new(Cell::new(0, 0), 1, LocationKind::Home).is_ok());
        assert!(Location::new(Cell::new(0, 0), 2, LocationKind::Home).is_ok());
        assert!(matches!(
            Location::new(Cell::new(0, 0), 3, LocationKind::Home),
            Err(WorldError::InvalidFootprint(3))
        ));
        assert!(Location::new(Cell::new(0, 0), 0, LocationKind::Home).is_err());
    }

    #[test]
    fn test_deserialize_validates_footprint() {
        let ok: Location =
            serde_json::from_str(r#"{"origin":{"x":1,"y":2},"size":2,"kind":"cafe"}"#).unwrap();
        assert_eq!(ok.entry_cell(), Cell::new(1, 3));

        for size in [0, 3, 7] {
            let json = format!(r#"{{"origin":{{"x":0,"y":0}},"size":{},"kind":"cafe"}}"#, size);
            assert!(serde_json::from_str::<Location>(&json).is_err(), "size {}", size);
        }

        let table = r#"{"locations":[{"origin":{"x":0,"y":0},"size":3,"kind":"home"}]}"#;
        assert!(serde_json::from_str::<LocationTable>(table).is_err());
    }

    #[test]
    fn test_footprint_must_fit_grid() {
        assert!(LocationTable::default().check_bounds(12).is_ok());

        let edge = Location::new(Cell::new(11, 5), 2, LocationKind::Home).unwrap();
        assert!(matches!(
            edge.check_bounds(12),
            Err(WorldError::CellOutOfBounds { cell, size: 12 }) if cell == Cell::new(12, 5)
        ));

        let mut table = LocationTable::default();
        table.insert(Location::new(Cell::new(-1, 0), 1, LocationKind::Cafe).unwrap());
        assert!(table.check_bounds(12).is_err());
    }

    #[test]
    fn test_entry_cell_is_leftmost_isometric() {
        let cafe = Location::new(Cell::new(6, 6), 2, LocationKind::Cafe).unwrap();
        assert_eq!(cafe.entry_cell(), Cell::new(6, 7));

        let kiosk = Location::new(Cell::new(3, 3), 1, LocationKind::Cafe).unwrap();
        assert_eq!(kiosk.entry_cell(), Cell::new(3, 3));
    }

    #[test]
    fn test_footprint_cells() {
        let home = Location::new(Cell::new(1, 2), 2, LocationKind::Home).unwrap();
        let cells: Vec<Cell> = home.footprint().collect();
        assert_eq!(cells.len(), 4);
        assert!(home.contains(Cell::new(2, 3)));
        assert!(!home.contains(Cell::new(3, 3)));
        assert_eq!(home.center(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_replenish_table() {
        assert_eq!(LocationKind::Home.replenishes(), (NeedKind::Energy, 40.0));
        assert_eq!(LocationKind::Cafe.replenishes(), (NeedKind::Hunger, 40.0));
        assert_eq!(LocationKind::Projects.replenishes(), (NeedKind::Fun, 35.0));
        assert_eq!(LocationKind::Cases.replenishes(), (NeedKind::Social, 35.0));
    }

    #[test]
    fn test_default_table_candidates() {
        let table = LocationTable::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.candidates(ActivityKind::Eat)[0].kind(), LocationKind::Cafe);

        let work: Vec<LocationKind> = table
            .candidates(ActivityKind::Work)
            .iter()
            .map(|l| l.kind())
            .collect();
        assert_eq!(work, vec![LocationKind::Projects, LocationKind::Cases]);
    }

    #[test]
    fn test_insert_replaces_same_kind() {
        let mut table = LocationTable::new();
        table.insert(Location::new(Cell::new(0, 0), 1, LocationKind::Cafe).unwrap());
        table.insert(Location::new(Cell::new(5, 5), 2, LocationKind::Cafe).unwrap());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(LocationKind::Cafe).unwrap().origin(), Cell::new(5, 5));
    }
}
