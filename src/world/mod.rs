//! Static world: activity locations and the occupancy grid built from them

pub mod location;
pub mod occupancy;

pub use location::{Location, LocationKind, LocationTable};
pub use occupancy::{GridOccupancy, Occupant};

/// Build the occupancy grid for a location table
pub fn build_occupancy(size: i32, locations: &LocationTable) -> GridOccupancy {
    let mut occupancy = GridOccupancy::new(size);
    for location in locations.iter() {
        occupancy.register_location(location);
    }
    occupancy
}
