//! A* pathfinding over the occupancy grid
//!
//! Cells next to an occupied cell are treated as blocked (one-cell buffer),
//! except around the goal's entry cell, which is always walkable and does not
//! block its neighbors.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use glam::Vec2;
use ordered_float::OrderedFloat;

use crate::core::types::Cell;
use crate::navigation::path::Path;
use crate::world::location::Location;
use crate::world::occupancy::GridOccupancy;

const ORTHOGONAL_COST: f32 = 1.0;
const DIAGONAL_COST: f32 = 1.414;

/// A first waypoint closer than this (Manhattan) to the start is dropped
const FIRST_WAYPOINT_SKIP: f32 = 0.3;

/// Neighbor offsets: orthogonal first, then diagonal
const NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    cell: Cell,
    f_cost: OrderedFloat<f32>, // g_cost + heuristic
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.f_cost.cmp(&self.f_cost)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plans paths against a read-only occupancy grid
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner<'w> {
    occupancy: &'w GridOccupancy,
}

impl<'w> PathPlanner<'w> {
    pub fn new(occupancy: &'w GridOccupancy) -> Self {
        Self { occupancy }
    }

    /// Check if a cell can be entered during planning
    ///
    /// `entry` is the goal's entry cell: always walkable, and never counted as
    /// an occupied neighbor.
    pub fn is_walkable(&self, cell: Cell, entry: Option<Cell>) -> bool {
        if !self.occupancy.in_bounds(cell) {
            return false;
        }
        if entry == Some(cell) {
            return true;
        }
        if self.occupancy.is_cell_occupied(cell) {
            return false;
        }

        // Buffer zone
        cell.orthogonal_neighbors()
            .iter()
            .filter(|n| entry != Some(**n))
            .all(|n| !self.occupancy.is_cell_occupied(*n))
    }

    /// Path from a continuous position to a location's entry cell
    ///
    /// Returns an empty path when the entry cell cannot be reached.
    pub fn plan_to(&self, start: Vec2, goal: &Location) -> Path {
        let entry = goal.entry_cell();
        self.find_path(start, entry.center(), Some(entry))
    }

    /// Find path using A* algorithm
    ///
    /// Waypoints are cell centers. When start and end share a cell the path
    /// is the single exact end position. Returns an empty path if no path
    /// exists.
    pub fn find_path(&self, start: Vec2, end: Vec2, entry: Option<Cell>) -> Path {
        let start_cell = Cell::containing(start);
        let end_cell = Cell::containing(end);

        if start_cell == end_cell {
            return Path::new(vec![end]);
        }

        let mut open_set = BinaryHeap::new();
        let mut closed: AHashSet<Cell> = AHashSet::new();
        let mut came_from: AHashMap<Cell, Cell> = AHashMap::new();
        let mut g_scores: AHashMap<Cell, f32> = AHashMap::new();

        g_scores.insert(start_cell, 0.0);
        open_set.push(PathNode {
            cell: start_cell,
            f_cost: OrderedFloat(heuristic(start_cell, end_cell)),
        });

        while let Some(current) = open_set.pop() {
            if current.cell == end_cell {
                return reconstruct_path(&came_from, end_cell, start);
            }

            // Stale heap entry for an already expanded cell
            if !closed.insert(current.cell) {
                continue;
            }

            let current_g = g_scores.get(&current.cell).copied().unwrap_or(f32::INFINITY);

            for (dx, dy) in NEIGHBORS {
                let neighbor = current.cell.offset(dx, dy);

                if closed.contains(&neighbor) || !self.is_walkable(neighbor, entry) {
                    continue;
                }

                let diagonal = dx != 0 && dy != 0;
                // No cutting corners between two blocked cells
                if diagonal
                    && (!self.is_walkable(current.cell.offset(dx, 0), entry)
                        || !self.is_walkable(current.cell.offset(0, dy), entry))
                {
                    continue;
                }

                let move_cost = if diagonal { DIAGONAL_COST } else { ORTHOGONAL_COST };
                let tentative_g = current_g + move_cost;
                let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(f32::INFINITY);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.cell);
                    g_scores.insert(neighbor, tentative_g);
                    open_set.push(PathNode {
                        cell: neighbor,
                        f_cost: OrderedFloat(tentative_g + heuristic(neighbor, end_cell)),
                    });
                }
            }
        }

        tracing::debug!(
            "no path from {} to {} ({} cells expanded)",
            start_cell,
            end_cell,
            closed.len()
        );
        Path::empty()
    }
}

/// Manhattan distance
fn heuristic(a: Cell, b: Cell) -> f32 {
    a.manhattan(&b) as f32
}

/// Walk parent links back to the start, emitting cell centers
fn reconstruct_path(came_from: &AHashMap<Cell, Cell>, end: Cell, start: Vec2) -> Path {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();

    let mut waypoints: Vec<Vec2> = cells.iter().map(Cell::center).collect();

    // Avoid a zero-length first leg
    if waypoints.len() > 1 {
        let first = waypoints[0];
        let dist = (start.x - first.x).abs() + (start.y - first.y).abs();
        if dist < FIRST_WAYPOINT_SKIP {
            waypoints.remove(0);
        }
    }

    Path::new(waypoints)
}

/// Total movement cost along a sequence of waypoints
pub fn path_cost(path: &Path) -> f32 {
    path.waypoints()
        .windows(2)
        .map(|w| {
            let d = (w[1] - w[0]).abs();
            if d.x > 0.0 && d.y > 0.0 {
                DIAGONAL_COST
            } else {
                ORTHOGONAL_COST
            }
        })
        .sum()
}
