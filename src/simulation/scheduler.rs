//! Needs-driven state machine for one agent
//!
//! Two entry points advance it: `tick_frame` runs once per rendered frame
//! (movement, speech typing, goal decisions) and `tick_interval` runs once per
//! second of real time (need decay, activity timers, the game clock).
//! `advance` drives both from a single virtual-time delta.
//!
//! ```text
//! idle -> walking -> performing_action -> idle
//!   \        \
//!    +--------+--> speaking --> idle
//! ```

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::calendar::{ClockEvents, GameClock};
use crate::core::config::WorldConfig;
use crate::core::types::{ActivityKind, Cell, NeedKind};
use crate::entity::agent::{AgentMode, AgentState};
use crate::entity::needs::{DecayRates, Needs};
use crate::navigation::motion::{InputDirection, ManualStep, MotionController, MotionParams, StepOutcome};
use crate::navigation::pathfinding::PathPlanner;
use crate::simulation::hooks::SceneHooks;
use crate::simulation::respawn::find_safe_position;
use crate::simulation::speech::{pick_phrase, SpeechState, SpeechUpdate};
use crate::simulation::status::StatusSnapshot;
use crate::world::location::LocationTable;
use crate::world::occupancy::GridOccupancy;

/// Length of one interval tick in real milliseconds
pub const INTERVAL_MS: u32 = 1000;

/// Mixed into the config seed for the speech stream
const SPEECH_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

const NEW_DAY_ENERGY: f32 = 10.0;
const NEW_DAY_FUN: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Stopped,
    Running,
    Paused,
}

/// Drives one agent through its needs cycle
pub struct NeedsScheduler<'w, H: SceneHooks> {
    config: WorldConfig,
    planner: PathPlanner<'w>,
    motion: MotionController<'w>,
    locations: LocationTable,
    hooks: H,
    agent: AgentState,
    clock: GameClock,
    decay: DecayRates,
    goal_rng: ChaCha8Rng,
    speech_rng: ChaCha8Rng,
    lifecycle: Lifecycle,
    interval_carry_ms: u32,
    speech_check_ms: u32,
}

impl<'w, H: SceneHooks> NeedsScheduler<'w, H> {
    /// Create a stopped scheduler with the agent at the configured start
    pub fn new(
        config: WorldConfig,
        occupancy: &'w GridOccupancy,
        locations: LocationTable,
        hooks: H,
    ) -> Self {
        let clock = GameClock::new(&config.clock);
        let decay = DecayRates::for_period(&config.needs, clock.period());
        let agent = AgentState::new(
            config.agent.start_position(),
            Needs::uniform(config.needs.initial.min(config.needs.ceiling)),
        );

        Self {
            planner: PathPlanner::new(occupancy),
            motion: MotionController::new(occupancy, MotionParams::from_config(&config)),
            goal_rng: ChaCha8Rng::seed_from_u64(config.seed),
            speech_rng: ChaCha8Rng::seed_from_u64(config.seed ^ SPEECH_STREAM),
            locations,
            hooks,
            agent,
            clock,
            decay,
            lifecycle: Lifecycle::Stopped,
            interval_carry_ms: 0,
            speech_check_ms: 0,
            config,
        }
    }

    // === LIFECYCLE ===

    /// Begin from a clean idle state and pick the first goal
    pub fn start(&mut self) {
        self.agent.mode = AgentMode::Idle;
        self.agent.clear_goal();
        self.interval_carry_ms = 0;
        self.speech_check_ms = 0;
        self.lifecycle = Lifecycle::Running;
        tracing::info!("scheduler started at {}", self.clock.formatted());
        self.decide_next_action();
    }

    /// Stop ticking; all agent state is kept
    pub fn stop(&mut self) {
        self.lifecycle = Lifecycle::Stopped;
        tracing::info!("scheduler stopped");
    }

    /// Suspend ticking; `resume` continues exactly where this left off
    pub fn pause(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Paused;
            tracing::debug!("scheduler paused");
        }
    }

    pub fn resume(&mut self) {
        if self.lifecycle == Lifecycle::Paused {
            self.lifecycle = Lifecycle::Running;
            tracing::debug!("scheduler resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn is_paused(&self) -> bool {
        self.lifecycle == Lifecycle::Paused
    }

    // === TICKS ===

    /// Advance virtual time: one frame of `dt_ms`, plus every interval tick
    /// that elapsed
    pub fn advance(&mut self, dt_ms: u32) {
        if !self.is_running() {
            return;
        }
        self.tick_frame(dt_ms);

        self.interval_carry_ms = self.interval_carry_ms.saturating_add(dt_ms);
        while self.interval_carry_ms >= INTERVAL_MS {
            self.interval_carry_ms -= INTERVAL_MS;
            self.tick_interval();
        }
    }

    /// Per-frame update
    pub fn tick_frame(&mut self, dt_ms: u32) {
        if !self.is_running() {
            return;
        }
        self.speech_check_ms = self.speech_check_ms.saturating_add(dt_ms);

        match self.agent.mode {
            AgentMode::PerformingAction => return,
            AgentMode::Speaking(_) => {
                self.update_speaking(dt_ms);
                return;
            }
            AgentMode::Idle | AgentMode::Walking => {}
        }

        if self.check_random_speech() {
            return;
        }

        match self.agent.mode {
            AgentMode::Idle => self.decide_next_action(),
            AgentMode::Walking => self.move_towards_target(),
            _ => {}
        }
    }

    /// Once-per-second update
    pub fn tick_interval(&mut self) {
        if !self.is_running() {
            return;
        }

        self.agent.needs.decay(&self.decay);

        if matches!(self.agent.mode, AgentMode::PerformingAction) {
            self.agent.action_timer_ms -= INTERVAL_MS as i64;
            if self.agent.action_timer_ms <= 0 {
                self.complete_action();
            }
        }

        let events = self.clock.advance_ms(INTERVAL_MS);
        self.apply_clock_events(events);
    }

    // === DECISIONS ===

    /// Pick the next goal and plan a path to it
    fn decide_next_action(&mut self) {
        let activity = self
            .agent
            .needs
            .lowest_below(self.config.needs.ceiling)
            .map_or(ActivityKind::Work, |(need, _)| need.activity());

        let candidates = self.locations.candidates(activity);
        let Some(location) = candidates.choose(&mut self.goal_rng).map(|l| **l) else {
            tracing::warn!("no location offers {}", activity);
            return;
        };

        let path = self.planner.plan_to(self.agent.position, &location);
        if path.is_empty() {
            tracing::warn!(
                "{} unreachable from ({:.2}, {:.2}), staying idle",
                location.kind().as_str(),
                self.agent.position.x,
                self.agent.position.y
            );
            self.agent.clear_goal();
            return;
        }

        tracing::debug!(
            "going to {} to {} ({} waypoints)",
            location.kind().as_str(),
            activity,
            path.len()
        );
        self.agent.goal = Some(location);
        self.agent.activity = Some(activity);
        self.agent.path = path;
        self.agent.stuck_frames = 0;
        self.agent.mode = AgentMode::Walking;
    }

    fn move_towards_target(&mut self) {
        let entry = self.agent.entry_cell();
        let position = self.agent.position;

        match self.motion.step_along(position, &mut self.agent.path, entry) {
            StepOutcome::Moved {
                position: next,
                proposed,
                facing,
                blocked_both_axes,
            } => {
                self.agent.position = next;
                self.agent.facing = facing;
                if blocked_both_axes {
                    self.agent.stuck_frames += 1;
                    tracing::debug!(
                        "stuck at {} for {} frames, target {:?}, entry {:?}, path {}/{}, blocking {:?}",
                        Cell::containing(position),
                        self.agent.stuck_frames,
                        self.agent.path.current(),
                        entry,
                        self.agent.path.index(),
                        self.agent.path.len(),
                        self.motion.blocking_cells(proposed, entry)
                    );
                } else {
                    self.agent.stuck_frames = 0;
                }
            }
            StepOutcome::WaypointReached => {}
            StepOutcome::Arrived { collision_position } => self.start_action(collision_position),
            StepOutcome::PathFinished => {
                tracing::debug!("path finished short of the entry, re-deciding");
                self.agent.mode = AgentMode::Idle;
                self.agent.clear_goal();
            }
        }
    }

    fn start_action(&mut self, collision_position: Vec2) {
        let (Some(goal), Some(activity)) = (self.agent.goal, self.agent.activity) else {
            self.agent.mode = AgentMode::Idle;
            return;
        };

        self.agent.collision_position = Some(collision_position);
        self.agent.action_timer_ms = self.config.schedule.duration_ms(activity) as i64;
        self.agent.mode = AgentMode::PerformingAction;
        self.agent.stuck_frames = 0;
        self.hooks.show_activity_indicator(&goal, activity);
        tracing::info!(
            "started {} at {} for {} ms",
            activity,
            goal.kind().as_str(),
            self.agent.action_timer_ms
        );
    }

    fn complete_action(&mut self) {
        if let Some(goal) = self.agent.goal {
            let (need, amount) = goal.kind().replenishes();
            self.agent
                .needs
                .replenish(need, amount, self.config.needs.ceiling);
            tracing::info!(
                "finished at {}, {:?} now {:.0}",
                goal.kind().as_str(),
                need,
                self.agent.needs.get(need)
            );
        }
        self.leave_location();
    }

    /// Hide the indicator and put the agent on a free spot next to its goal
    fn leave_location(&mut self) {
        self.hooks.hide_activity_indicator();
        if let Some(goal) = self.agent.goal {
            let spot = find_safe_position(
                &self.motion,
                &goal,
                self.agent.collision_position,
                self.config.agent.respawn_distance,
                self.config.agent.fallback_position(),
            );
            self.agent.position = spot.position;
        }
        self.agent.mode = AgentMode::Idle;
        self.agent.clear_goal();
    }

    // === SPEECH ===

    /// Roll for idle chatter once per check interval
    fn check_random_speech(&mut self) -> bool {
        if self.speech_check_ms < self.config.speech.check_interval_ms {
            return false;
        }
        self.speech_check_ms = 0;

        if self.speech_rng.gen::<f32>() >= self.config.speech.chance {
            return false;
        }
        let phrase = pick_phrase(
            &mut self.speech_rng,
            &self.config.speech,
            self.clock.period(),
            self.clock.day(),
        );
        self.start_speaking(phrase);
        true
    }

    /// Say something now; `None` picks a random phrase
    ///
    /// Only possible while idle or walking. Returns whether speech started.
    pub fn speak(&mut self, phrase: Option<&str>) -> bool {
        if !matches!(self.agent.mode, AgentMode::Idle | AgentMode::Walking) {
            return false;
        }
        let text = match phrase {
            Some(text) => text.to_string(),
            None => pick_phrase(
                &mut self.speech_rng,
                &self.config.speech,
                self.clock.period(),
                self.clock.day(),
            ),
        };
        self.start_speaking(text);
        true
    }

    fn start_speaking(&mut self, text: String) {
        tracing::debug!("speaking: {:?}", text);
        self.agent.mode = AgentMode::Speaking(SpeechState::new(text));
    }

    fn update_speaking(&mut self, dt_ms: u32) {
        let finished = match &mut self.agent.mode {
            AgentMode::Speaking(speech) => {
                let was_typing = speech.is_typing();
                match speech.update(dt_ms, &self.config.speech) {
                    SpeechUpdate::Revealed => {
                        self.hooks.show_speech(speech.visible_text());
                        false
                    }
                    SpeechUpdate::Unchanged => false,
                    SpeechUpdate::Finished => {
                        // Typing and hold both ran out in one long frame
                        if was_typing {
                            self.hooks.show_speech(speech.text());
                        }
                        true
                    }
                }
            }
            _ => false,
        };

        if finished {
            self.hooks.hide_speech();
            // Any path from before speaking may be stale
            self.agent.mode = AgentMode::Idle;
            self.agent.clear_goal();
        }
    }

    // === EXTERNAL CONTROL ===

    /// Cancel whatever the agent is doing and return it to idle
    ///
    /// An interrupted activity does not replenish its need.
    pub fn force_exit_action(&mut self) {
        match self.agent.mode {
            AgentMode::PerformingAction => {
                tracing::info!("activity interrupted");
                self.leave_location();
            }
            AgentMode::Speaking(_) => {
                self.hooks.hide_speech();
                self.agent.mode = AgentMode::Idle;
                self.agent.clear_goal();
            }
            AgentMode::Walking => {
                self.agent.mode = AgentMode::Idle;
                self.agent.clear_goal();
            }
            AgentMode::Idle => {}
        }
    }

    /// Move the agent one frame from held keys (manual control)
    ///
    /// Ignored unless the agent is idle; call `force_exit_action` first.
    pub fn step_manual(&mut self, input: InputDirection) -> Option<ManualStep> {
        if !self.agent.is_idle() {
            return None;
        }
        let step = self.motion.step_manual(self.agent.position, input);
        self.agent.position = step.position;
        if let Some(facing) = step.facing {
            self.agent.facing = facing;
        }
        Some(step)
    }

    // === CLOCK ===

    fn apply_clock_events(&mut self, events: ClockEvents) {
        if let Some(period) = events.period_changed {
            self.decay = DecayRates::for_period(&self.config.needs, period);
            tracing::info!(
                "{} begins at {} on day {}",
                period.as_str(),
                self.clock.formatted(),
                self.clock.day()
            );
        }

        let ceiling = self.config.needs.ceiling;
        for _ in 0..events.new_days {
            self.agent.needs.replenish(NeedKind::Energy, NEW_DAY_ENERGY, ceiling);
            self.agent.needs.replenish(NeedKind::Fun, NEW_DAY_FUN, ceiling);
        }
        if events.new_days > 0 {
            tracing::info!("day {} begins", self.clock.day());
        }
    }

    /// Jump the game clock forward (debug helper)
    pub fn skip_hours(&mut self, hours: u32) {
        let events = self.clock.skip_hours(hours);
        self.apply_clock_events(events);
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    // === ACCESSORS ===

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot::capture(&self.agent, &self.clock, self.is_running())
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    /// Overwrite a need (debug helper), clamped to [0, ceiling]
    pub fn set_need(&mut self, need: NeedKind, value: f32) {
        self.agent.needs.set(need, value, self.config.needs.ceiling);
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn decay_rates(&self) -> &DecayRates {
        &self.decay
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}
