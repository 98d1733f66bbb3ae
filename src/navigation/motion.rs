//! Frame-by-frame movement along a planned path
//!
//! Positions are continuous grid coordinates. Distances that decide waypoint
//! arrival are measured in screen pixels under the isometric projection, and
//! every step is rescaled to the same on-screen length so the agent appears to
//! move at one speed in all eight directions.

use glam::Vec2;

use crate::core::config::WorldConfig;
use crate::core::types::{Cell, Facing};
use crate::navigation::path::Path;
use crate::world::occupancy::GridOccupancy;

/// Tunables for one moving agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub tile_width: f32,
    pub tile_height: f32,
    /// Grid units per frame, applied after rescaling to one tile height on screen
    pub speed: f32,
    pub collision_radius: f32,
    /// Screen pixels
    pub arrival_epsilon: f32,
}

impl MotionParams {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            tile_width: config.grid.tile_width,
            tile_height: config.grid.tile_height,
            speed: config.agent.speed,
            collision_radius: config.agent.collision_radius,
            arrival_epsilon: config.agent.arrival_epsilon,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

/// Which movement axes would collide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisCollision {
    pub x: bool,
    pub y: bool,
}

impl AxisCollision {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    pub fn both(&self) -> bool {
        self.x && self.y
    }
}

/// Result of advancing one frame along a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Position changed (possibly only on one axis, possibly not at all)
    Moved {
        position: Vec2,
        /// Where the step would have landed without collisions
        proposed: Vec2,
        facing: Facing,
        blocked_both_axes: bool,
    },
    /// An intermediate waypoint was reached; movement resumes next frame
    WaypointReached,
    /// The agent touched the goal's entry cell
    Arrived { collision_position: Vec2 },
    /// Path consumed without touching the entry cell
    PathFinished,
}

/// Held movement keys for manual control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputDirection {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputDirection {
    /// Grid delta of the pressed keys under the isometric projection
    pub fn grid_delta(&self) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta += Vec2::new(-1.0, -1.0);
        }
        if self.down {
            delta += Vec2::new(1.0, 1.0);
        }
        if self.left {
            delta += Vec2::new(-1.0, 1.0);
        }
        if self.right {
            delta += Vec2::new(1.0, -1.0);
        }
        delta
    }
}

/// Result of one manual-control frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualStep {
    pub position: Vec2,
    /// `None` when no key (or only opposing keys) is held
    pub facing: Option<Facing>,
    pub collision: AxisCollision,
}

/// Check if a circle intersects the unit square of a cell
///
/// Uses the closest point on the box to the circle center.
pub fn circle_overlaps_cell(center: Vec2, radius: f32, cell: Cell) -> bool {
    let min = Vec2::new(cell.x as f32, cell.y as f32);
    let closest = center.clamp(min, min + Vec2::ONE);
    center.distance_squared(closest) < radius * radius
}

/// Every cell whose square could intersect a circle
pub fn cells_in_radius(center: Vec2, radius: f32) -> impl Iterator<Item = Cell> {
    let min = Cell::containing(center - Vec2::splat(radius));
    let max = Cell::containing(center + Vec2::splat(radius));
    (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| Cell::new(x, y)))
}

/// Moves a position across a read-only occupancy grid
#[derive(Debug, Clone, Copy)]
pub struct MotionController<'w> {
    occupancy: &'w GridOccupancy,
    params: MotionParams,
}

impl<'w> MotionController<'w> {
    pub fn new(occupancy: &'w GridOccupancy, params: MotionParams) -> Self {
        Self { occupancy, params }
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Project a grid delta into screen pixels
    pub fn screen_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(
            (delta.x - delta.y) * self.params.tile_width / 2.0,
            (delta.x + delta.y) * self.params.tile_height / 2.0,
        )
    }

    pub fn screen_distance(&self, from: Vec2, to: Vec2) -> f32 {
        self.screen_delta(to - from).length()
    }

    /// One frame's grid displacement in the direction of `delta`
    ///
    /// Returns `None` for a delta with no screen length.
    pub fn scaled_step(&self, delta: Vec2) -> Option<Vec2> {
        let screen_len = self.screen_delta(delta).length();
        if screen_len <= f32::EPSILON {
            return None;
        }
        let scale = self.params.tile_height / screen_len;
        Some(delta * scale * self.params.speed)
    }

    /// Check if the agent's circle at `pos` overlaps a given cell
    pub fn overlaps_cell(&self, pos: Vec2, cell: Cell) -> bool {
        circle_overlaps_cell(pos, self.params.collision_radius, cell)
    }

    /// Occupied cells overlapped by the agent's circle at `pos`
    pub fn blocking_cells(&self, pos: Vec2, exclude: Option<Cell>) -> Vec<Cell> {
        let radius = self.params.collision_radius;
        cells_in_radius(pos, radius)
            .filter(|c| exclude != Some(*c))
            .filter(|c| self.occupancy.is_cell_occupied(*c))
            .filter(|c| circle_overlaps_cell(pos, radius, *c))
            .collect()
    }

    fn outside_axis(&self, coord: f32) -> bool {
        let radius = self.params.collision_radius;
        coord - radius < 0.0 || coord + radius >= self.occupancy.size() as f32
    }

    fn hits_occupied(&self, pos: Vec2, exclude: Option<Cell>) -> bool {
        let radius = self.params.collision_radius;
        cells_in_radius(pos, radius).any(|c| {
            exclude != Some(c)
                && self.occupancy.is_cell_occupied(c)
                && circle_overlaps_cell(pos, radius, c)
        })
    }

    /// Per-axis collision test for a proposed move
    ///
    /// X is tested at (proposed.x, current.y), Y at (current.x, proposed.y).
    pub fn check_collision(
        &self,
        current: Vec2,
        proposed: Vec2,
        exclude: Option<Cell>,
    ) -> AxisCollision {
        AxisCollision {
            x: self.outside_axis(proposed.x)
                || self.hits_occupied(Vec2::new(proposed.x, current.y), exclude),
            y: self.outside_axis(proposed.y)
                || self.hits_occupied(Vec2::new(current.x, proposed.y), exclude),
        }
    }

    /// Out of bounds, or overlapping any occupied cell
    pub fn is_position_blocked(&self, pos: Vec2) -> bool {
        self.outside_axis(pos.x) || self.outside_axis(pos.y) || self.hits_occupied(pos, None)
    }

    /// Apply the axes that are free
    ///
    /// When each axis is free alone but the diagonal lands on a cell corner,
    /// only X is applied.
    fn resolve(
        &self,
        current: Vec2,
        proposed: Vec2,
        exclude: Option<Cell>,
    ) -> (Vec2, AxisCollision) {
        let collision = self.check_collision(current, proposed, exclude);
        let next = match (collision.x, collision.y) {
            (false, false) if self.hits_occupied(proposed, exclude) => {
                Vec2::new(proposed.x, current.y)
            }
            (false, false) => proposed,
            (false, true) => Vec2::new(proposed.x, current.y),
            (true, false) => Vec2::new(current.x, proposed.y),
            (true, true) => current,
        };
        (next, collision)
    }

    /// Advance one frame toward the path's current waypoint
    ///
    /// `entry` is the active goal's entry cell. Touching it ends the walk, and
    /// it is ignored by collision resolution.
    pub fn step_along(&self, pos: Vec2, path: &mut Path, entry: Option<Cell>) -> StepOutcome {
        let Some(target) = path.current() else {
            return StepOutcome::PathFinished;
        };

        if self.screen_distance(pos, target) < self.params.arrival_epsilon {
            if !path.advance() {
                return StepOutcome::WaypointReached;
            }
            return match entry {
                Some(cell) if self.overlaps_cell(pos, cell) => StepOutcome::Arrived {
                    collision_position: pos,
                },
                _ => StepOutcome::PathFinished,
            };
        }

        let Some(step) = self.scaled_step(target - pos) else {
            return StepOutcome::WaypointReached;
        };
        let facing = Facing::from_velocity(step.x, step.y);
        let proposed = pos + step;

        if let Some(cell) = entry {
            if self.overlaps_cell(proposed, cell) {
                return StepOutcome::Arrived {
                    collision_position: pos,
                };
            }
        }

        let (position, collision) = self.resolve(pos, proposed, entry);
        StepOutcome::Moved {
            position,
            proposed,
            facing,
            blocked_both_axes: collision.both(),
        }
    }

    /// Move one frame from held keys, with plain collision resolution
    pub fn step_manual(&self, pos: Vec2, input: InputDirection) -> ManualStep {
        let Some(step) = self.scaled_step(input.grid_delta()) else {
            return ManualStep {
                position: pos,
                facing: None,
                collision: AxisCollision::default(),
            };
        };

        let (position, collision) = self.resolve(pos, pos + step, None);
        ManualStep {
            position,
            facing: Some(Facing::from_velocity(step.x, step.y)),
            collision,
        }
    }
}
