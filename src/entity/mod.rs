//! Agent state and the needs that drive it

pub mod agent;
pub mod needs;

pub use agent::{AgentMode, AgentState, ModeKind};
pub use needs::{DecayRates, Needs};
