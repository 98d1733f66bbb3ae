//! Property tests for planning and movement against random obstacle layouts

use glam::Vec2;
use proptest::prelude::*;

use living_world::core::types::Cell;
use living_world::navigation::{InputDirection, MotionController, MotionParams, Path, PathPlanner, StepOutcome};
use living_world::world::{GridOccupancy, Occupant};

const SIZE: i32 = 12;

fn grid_with(obstacles: &[(i32, i32)]) -> GridOccupancy {
    let mut grid = GridOccupancy::new(SIZE);
    for &(x, y) in obstacles {
        grid.register(Cell::new(x, y), Occupant::Rock);
    }
    grid
}

fn obstacles() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((0..SIZE, 0..SIZE), 0..14)
}

proptest! {
    #[test]
    fn waypoints_keep_clear_of_obstacles(
        obstacles in obstacles(),
        start in (0..SIZE, 0..SIZE),
        offset in (0.05f32..0.95, 0.05f32..0.95),
        end in (0..SIZE, 0..SIZE),
        end_is_entry in any::<bool>(),
    ) {
        let grid = grid_with(&obstacles);
        let planner = PathPlanner::new(&grid);
        let start_cell = Cell::new(start.0, start.1);
        let end_cell = Cell::new(end.0, end.1);
        let entry = end_is_entry.then_some(end_cell);
        prop_assume!(planner.is_walkable(start_cell, entry));

        let start_pos = Vec2::new(start.0 as f32 + offset.0, start.1 as f32 + offset.1);
        let path = planner.find_path(start_pos, end_cell.center(), entry);

        for waypoint in path.waypoints() {
            let cell = Cell::containing(*waypoint);
            if Some(cell) == entry {
                continue;
            }
            prop_assert!(!grid.is_cell_occupied(cell), "waypoint on {}", cell);
            for neighbor in cell.orthogonal_neighbors() {
                // The goal's entry is part of its building and may border the approach
                if Some(neighbor) == entry {
                    continue;
                }
                prop_assert!(
                    !grid.is_cell_occupied(neighbor),
                    "waypoint {} touches occupied {}",
                    cell,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn reachable_entry_on_empty_grid(
        start in (0..SIZE, 0..SIZE),
        entry in (0..SIZE, 0..SIZE),
    ) {
        let grid = GridOccupancy::new(SIZE);
        let planner = PathPlanner::new(&grid);
        let entry_cell = Cell::new(entry.0, entry.1);

        let path = planner.find_path(Cell::new(start.0, start.1).center(), entry_cell.center(), Some(entry_cell));

        prop_assert!(!path.is_empty());
        prop_assert_eq!(path.last().map(Cell::containing), Some(entry_cell));
    }

    #[test]
    fn movement_never_enters_occupied_cells(
        obstacles in obstacles(),
        start in (0.2f32..11.8, 0.2f32..11.8),
        target in (0..SIZE, 0..SIZE),
        frames in 1usize..400,
    ) {
        let grid = grid_with(&obstacles);
        let motion = MotionController::new(&grid, MotionParams::default());
        let mut pos = Vec2::new(start.0, start.1);
        prop_assume!(!motion.is_position_blocked(pos));

        let mut path = Path::new(vec![Cell::new(target.0, target.1).center()]);
        for _ in 0..frames {
            match motion.step_along(pos, &mut path, None) {
                StepOutcome::Moved { position, .. } => {
                    prop_assert!(
                        !motion.is_position_blocked(position),
                        "moved from {:?} into blocked {:?}",
                        pos,
                        position
                    );
                    pos = position;
                }
                StepOutcome::WaypointReached => {}
                StepOutcome::Arrived { .. } | StepOutcome::PathFinished => break,
            }
        }
    }

    #[test]
    fn planned_walk_reaches_entry_without_sticking(
        obstacles in obstacles(),
        start in (0..SIZE, 0..SIZE),
        entry in (0..SIZE, 0..SIZE),
    ) {
        let mut grid = grid_with(&obstacles);
        let entry_cell = Cell::new(entry.0, entry.1);
        grid.register(entry_cell, Occupant::Rock);
        let start_cell = Cell::new(start.0, start.1);
        let planner = PathPlanner::new(&grid);
        prop_assume!(start_cell != entry_cell);
        prop_assume!(planner.is_walkable(start_cell, Some(entry_cell)));

        let motion = MotionController::new(&grid, MotionParams::default());
        let mut pos = start_cell.center();
        let mut path = planner.find_path(pos, entry_cell.center(), Some(entry_cell));
        prop_assume!(!path.is_empty());

        let mut arrived = false;
        for _ in 0..5_000 {
            match motion.step_along(pos, &mut path, Some(entry_cell)) {
                StepOutcome::Moved { position, blocked_both_axes, .. } => {
                    prop_assert!(!blocked_both_axes, "stuck at {:?} heading for {}", pos, entry_cell);
                    prop_assert!(motion.blocking_cells(position, Some(entry_cell)).is_empty());
                    pos = position;
                }
                StepOutcome::WaypointReached => {}
                StepOutcome::Arrived { .. } => {
                    arrived = true;
                    break;
                }
                StepOutcome::PathFinished => break,
            }
        }
        prop_assert!(arrived, "stopped at {:?} short of {}", pos, entry_cell);
    }

    #[test]
    fn manual_steps_never_enter_occupied_cells(
        obstacles in obstacles(),
        start in (0.2f32..11.8, 0.2f32..11.8),
        inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..200),
    ) {
        let grid = grid_with(&obstacles);
        let motion = MotionController::new(&grid, MotionParams::default());
        let mut pos = Vec2::new(start.0, start.1);
        prop_assume!(!motion.is_position_blocked(pos));

        for (up, down, left, right) in inputs {
            let step = motion.step_manual(pos, InputDirection { up, down, left, right });
            prop_assert!(!motion.is_position_blocked(step.position));
            pos = step.position;
        }
    }
}

#[test]
fn test_walk_to_entry_arrives_without_touching_other_buildings() {
    let grid = grid_with(&[(6, 6), (7, 6), (6, 7), (7, 7)]);
    let planner = PathPlanner::new(&grid);
    let motion = MotionController::new(&grid, MotionParams::default());
    let entry = Cell::new(6, 7);

    let mut pos = Vec2::new(2.5, 2.5);
    let mut path = planner.find_path(pos, entry.center(), Some(entry));
    assert!(!path.is_empty());

    let mut arrived = false;
    for _ in 0..2000 {
        match motion.step_along(pos, &mut path, Some(entry)) {
            StepOutcome::Moved { position, .. } => {
                assert!(motion.blocking_cells(position, Some(entry)).is_empty());
                pos = position;
            }
            StepOutcome::WaypointReached => {}
            StepOutcome::Arrived { .. } => {
                arrived = true;
                break;
            }
            StepOutcome::PathFinished => break,
        }
    }
    assert!(arrived, "stopped at {:?}", pos);
}
