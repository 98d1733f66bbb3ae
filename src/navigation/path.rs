//! Planned paths consumed front-to-back

use glam::Vec2;

/// Ordered list of waypoints with a read index
///
/// Waypoints are fixed once planned; only the index advances. An empty path
/// signals an unreachable goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
    index: usize,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            index: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Waypoint currently being walked toward
    pub fn current(&self) -> Option<Vec2> {
        self.waypoints.get(self.index).copied()
    }

    /// Move to the next waypoint; returns whether the path is now finished
    pub fn advance(&mut self) -> bool {
        if self.index < self.waypoints.len() {
            self.index += 1;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.waypoints.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Waypoints not yet reached
    pub fn remaining(&self) -> &[Vec2] {
        &self.waypoints[self.index.min(self.waypoints.len())..]
    }

    pub fn last(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
