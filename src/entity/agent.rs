//! The simulated agent's mutable state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{ActivityKind, Cell, Facing};
use crate::entity::needs::Needs;
use crate::navigation::path::Path;
use crate::simulation::speech::SpeechState;
use crate::world::location::Location;

/// Behavior state; each variant carries its own countdown where it has one
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AgentMode {
    #[default]
    Idle,
    Walking,
    PerformingAction,
    Speaking(SpeechState),
}

impl AgentMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            AgentMode::Idle => ModeKind::Idle,
            AgentMode::Walking => ModeKind::Walking,
            AgentMode::PerformingAction => ModeKind::PerformingAction,
            AgentMode::Speaking(_) => ModeKind::Speaking,
        }
    }
}

/// Payload-free mirror of `AgentMode` for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Idle,
    Walking,
    PerformingAction,
    Speaking,
}

impl ModeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeKind::Idle => "idle",
            ModeKind::Walking => "walking",
            ModeKind::PerformingAction => "performing_action",
            ModeKind::Speaking => "speaking",
        }
    }
}

/// Everything the scheduler and motion controller mutate for one agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Vec2,
    pub facing: Facing,
    pub needs: Needs,
    pub mode: AgentMode,
    pub goal: Option<Location>,
    pub activity: Option<ActivityKind>,
    pub path: Path,
    /// Remaining activity time; only meaningful while performing an action
    pub action_timer_ms: i64,
    /// Where the agent stood when it touched the goal's entry cell
    pub collision_position: Option<Vec2>,
    /// Consecutive frames blocked on both axes
    pub stuck_frames: u32,
}

impl AgentState {
    pub fn new(position: Vec2, needs: Needs) -> Self {
        Self {
            position,
            facing: Facing::default(),
            needs,
            mode: AgentMode::Idle,
            goal: None,
            activity: None,
            path: Path::empty(),
            action_timer_ms: 0,
            collision_position: None,
            stuck_frames: 0,
        }
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, AgentMode::Idle)
    }

    /// Entry cell of the active goal
    pub fn entry_cell(&self) -> Option<Cell> {
        self.goal.as_ref().map(Location::entry_cell)
    }

    /// Drop goal, activity, path and arrival bookkeeping
    pub fn clear_goal(&mut self) {
        self.goal = None;
        self.activity = None;
        self.path = Path::empty();
        self.action_timer_ms = 0;
        self.collision_position = None;
        self.stuck_frames = 0;
    }
}
