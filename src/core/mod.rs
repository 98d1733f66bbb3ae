pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{GameClock, TimePeriod};
pub use config::WorldConfig;
pub use error::{Result, WorldError};
pub use types::{ActivityKind, Cell, Facing, NeedKind};
