//! Living World - a needs-driven agent on an isometric tile grid
//!
//! One agent walks between buildings, performs activities that refill its
//! needs and avoids obstacles with A* planning plus per-axis collision.
//! Terrain features are synthesized from seeded noise at world-build time.

pub mod core;
pub mod entity;
pub mod navigation;
pub mod simulation;
pub mod terrain;
pub mod world;
