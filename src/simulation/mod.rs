//! Agent behavior: the needs scheduler and its collaborators

pub mod hooks;
pub mod respawn;
pub mod scheduler;
pub mod speech;
pub mod status;

pub use hooks::{LogHooks, NoopHooks, RecordingHooks, SceneEvent, SceneHooks};
pub use respawn::{find_safe_position, Respawn, RespawnSource};
pub use scheduler::{NeedsScheduler, INTERVAL_MS};
pub use speech::{SpeechState, SpeechUpdate};
pub use status::{StatusSnapshot, TimeSnapshot};
