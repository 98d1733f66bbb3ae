//! Read-only snapshot of the agent for the rendering side and the CLI

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::calendar::{GameClock, TimePeriod};
use crate::core::types::{ActivityKind, Facing};
use crate::entity::agent::{AgentMode, AgentState, ModeKind};
use crate::entity::needs::Needs;
use crate::world::location::LocationKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    pub hour: u32,
    pub minute: u32,
    pub day: u32,
    pub period: TimePeriod,
    pub formatted: String,
    pub total_minutes: u64,
    pub time_scale: f32,
}

impl TimeSnapshot {
    pub fn capture(clock: &GameClock) -> Self {
        Self {
            hour: clock.hour(),
            minute: clock.minute(),
            day: clock.day(),
            period: clock.period(),
            formatted: clock.formatted(),
            total_minutes: clock.total_minutes(),
            time_scale: clock.time_scale(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub state: ModeKind,
    pub activity: Option<ActivityKind>,
    /// Rounded to whole numbers
    pub needs: Needs,
    pub goal: Option<LocationKind>,
    /// Whole seconds left on the activity timer
    pub action_timer_secs: u32,
    pub stuck_frames: u32,
    pub position: [f32; 2],
    pub facing: Facing,
    /// Visible part of the phrase being spoken
    pub speech: Option<String>,
    pub running: bool,
    pub time: TimeSnapshot,
}

impl StatusSnapshot {
    pub fn capture(agent: &AgentState, clock: &GameClock, running: bool) -> Self {
        let action_timer_secs = match agent.mode {
            AgentMode::PerformingAction => (agent.action_timer_ms.max(0) as f64 / 1000.0).ceil() as u32,
            _ => 0,
        };
        let speech = match &agent.mode {
            AgentMode::Speaking(speech) => Some(speech.visible_text().to_string()),
            _ => None,
        };

        Self {
            state: agent.mode_kind(),
            activity: agent.activity,
            needs: agent.needs.rounded(),
            goal: agent.goal.map(|g| g.kind()),
            action_timer_secs,
            stuck_frames: agent.stuck_frames,
            position: agent.position.to_array(),
            facing: agent.facing,
            speech,
            running,
            time: TimeSnapshot::capture(clock),
        }
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[day {} {} {}] {:<17} pos=({:.2}, {:.2})",
            self.time.day,
            self.time.formatted,
            self.time.period.as_str(),
            self.state.as_str(),
            self.position[0],
            self.position[1],
        )?;
        if let Some(activity) = self.activity {
            write!(f, " {}", activity)?;
        }
        if let Some(goal) = self.goal {
            write!(f, "@{}", goal.as_str())?;
        }
        if self.action_timer_secs > 0 {
            write!(f, " {}s left", self.action_timer_secs)?;
        }
        write!(
            f,
            " | energy {} hunger {} fun {} social {}",
            self.needs.energy, self.needs.hunger, self.needs.fun, self.needs.social
        )?;
        if let Some(text) = &self.speech {
            write!(f, " \"{}\"", text)?;
        }
        Ok(())
    }
}
