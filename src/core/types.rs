//! Core type definitions used throughout the codebase

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid cell identifying one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a continuous grid position
    #[inline]
    pub fn containing(pos: Vec2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }

    /// Center of the cell in grid coordinates
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The 4 orthogonal neighbors (right, left, down, up)
    pub fn orthogonal_neighbors(&self) -> [Cell; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// Horizontal screen coordinate of the cell under the isometric projection,
    /// in half-tile units. Smaller is further left on screen.
    #[inline]
    pub fn screen_x_key(&self) -> i32 {
        self.x - self.y
    }

    pub fn manhattan(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Display-facing bucket for the agent sprite (8 directions, screen space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facing {
    Up,
    UpRight,
    Right,
    DownRight,
    #[default]
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Facing {
    /// Bucket a grid-space velocity by its angle into one of 8 sectors of 45°.
    ///
    /// Grid +x maps to screen down-right and grid +y to screen down-left, so
    /// angle 0 is `DownRight` and the sectors rotate clockwise on screen.
    pub fn from_velocity(dx: f32, dy: f32) -> Self {
        let angle = dy.atan2(dx).to_degrees();

        if (-22.5..22.5).contains(&angle) {
            Facing::DownRight
        } else if (22.5..67.5).contains(&angle) {
            Facing::Down
        } else if (67.5..112.5).contains(&angle) {
            Facing::DownLeft
        } else if (112.5..157.5).contains(&angle) {
            Facing::Left
        } else if !(-157.5..157.5).contains(&angle) {
            Facing::UpLeft
        } else if (-157.5..-112.5).contains(&angle) {
            Facing::Up
        } else if (-112.5..-67.5).contains(&angle) {
            Facing::UpRight
        } else {
            Facing::Right
        }
    }
}

/// The four decaying needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedKind {
    Energy,
    Hunger,
    Fun,
    Social,
}

impl NeedKind {
    /// Fixed evaluation order; earlier entries win ties during goal selection
    pub const ALL: [NeedKind; 4] = [
        NeedKind::Energy,
        NeedKind::Hunger,
        NeedKind::Fun,
        NeedKind::Social,
    ];

    /// Activity that addresses this need
    pub fn activity(self) -> ActivityKind {
        match self {
            NeedKind::Energy => ActivityKind::Rest,
            NeedKind::Hunger => ActivityKind::Eat,
            NeedKind::Fun => ActivityKind::Play,
            NeedKind::Social => ActivityKind::Socialize,
        }
    }
}

/// Activities the agent performs at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Work,
    Rest,
    Eat,
    Play,
    Socialize,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Work => "work",
            ActivityKind::Rest => "rest",
            ActivityKind::Eat => "eat",
            ActivityKind::Play => "play",
            ActivityKind::Socialize => "socialize",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_containing_floors_negative() {
        assert_eq!(Cell::containing(Vec2::new(2.7, 3.1)), Cell::new(2, 3));
        assert_eq!(Cell::containing(Vec2::new(-0.2, 0.0)), Cell::new(-1, 0));
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(Cell::new(6, 7).center(), Vec2::new(6.5, 7.5));
    }

    #[test]
    fn test_cell_display_is_composite_key() {
        assert_eq!(Cell::new(3, -4).to_string(), "3,-4");
    }

    #[test]
    fn test_facing_cardinal_sectors() {
        assert_eq!(Facing::from_velocity(1.0, 0.0), Facing::DownRight);
        assert_eq!(Facing::from_velocity(1.0, 1.0), Facing::Down);
        assert_eq!(Facing::from_velocity(0.0, 1.0), Facing::DownLeft);
        assert_eq!(Facing::from_velocity(-1.0, 1.0), Facing::Left);
        assert_eq!(Facing::from_velocity(-1.0, 0.0), Facing::UpLeft);
        assert_eq!(Facing::from_velocity(-1.0, -1.0), Facing::Up);
        assert_eq!(Facing::from_velocity(0.0, -1.0), Facing::UpRight);
        assert_eq!(Facing::from_velocity(1.0, -1.0), Facing::Right);
    }

    #[test]
    fn test_facing_sector_boundaries() {
        let a = 25.0_f32.to_radians();
        assert_eq!(Facing::from_velocity(a.cos(), a.sin()), Facing::Down);
        let b = 20.0_f32.to_radians();
        assert_eq!(Facing::from_velocity(b.cos(), b.sin()), Facing::DownRight);
    }

    #[test]
    fn test_need_activity_mapping() {
        assert_eq!(NeedKind::Energy.activity(), ActivityKind::Rest);
        assert_eq!(NeedKind::Hunger.activity(), ActivityKind::Eat);
        assert_eq!(NeedKind::Fun.activity(), ActivityKind::Play);
        assert_eq!(NeedKind::Social.activity(), ActivityKind::Socialize);
    }
}
