//! Safe placement after leaving a location

use glam::Vec2;

use crate::navigation::motion::MotionController;
use crate::world::location::Location;

/// How a respawn position was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnSource {
    /// Pushed away from the building along the arrival direction
    AwayFromContact,
    /// First free cell in the ring around the footprint
    AroundFootprint,
    /// Nothing around the location was free
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Respawn {
    pub position: Vec2,
    pub source: RespawnSource,
}

/// Cells tried around an N x N footprint, relative to its origin:
/// sides first, then corners
fn ring_offsets(size: i32) -> [(i32, i32); 8] {
    [
        (-1, 0),
        (size, 0),
        (0, -1),
        (0, size),
        (-1, -1),
        (size, -1),
        (-1, size),
        (size, size),
    ]
}

/// Find an unblocked position next to `location`
///
/// Prefers stepping `safe_distance` away from the building center through the
/// point where the agent touched it, then the centers of the cells around the
/// footprint, then `fallback`.
pub fn find_safe_position(
    motion: &MotionController<'_>,
    location: &Location,
    collision_position: Option<Vec2>,
    safe_distance: f32,
    fallback: Vec2,
) -> Respawn {
    if let Some(contact) = collision_position {
        let away = (contact - location.center()).normalize_or_zero();
        if away != Vec2::ZERO {
            let candidate = contact + away * safe_distance;
            if !motion.is_position_blocked(candidate) {
                return Respawn {
                    position: candidate,
                    source: RespawnSource::AwayFromContact,
                };
            }
        }
    }

    let origin = location.origin();
    for (dx, dy) in ring_offsets(location.size() as i32) {
        let candidate = origin.offset(dx, dy).center();
        if !motion.is_position_blocked(candidate) {
            return Respawn {
                position: candidate,
                source: RespawnSource::AroundFootprint,
            };
        }
    }

    tracing::warn!(
        "no free cell around {} at {}, respawning at fallback ({:.1}, {:.1})",
        location.kind().as_str(),
        origin,
        fallback.x,
        fallback.y
    );
    Respawn {
        position: fallback,
        source: RespawnSource::Fallback,
    }
}
