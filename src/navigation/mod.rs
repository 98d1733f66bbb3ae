//! Path planning and frame-by-frame movement

pub mod motion;
pub mod path;
pub mod pathfinding;

pub use motion::{InputDirection, ManualStep, MotionController, MotionParams, StepOutcome};
pub use path::Path;
pub use pathfinding::PathPlanner;
