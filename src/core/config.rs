//! World configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section has serde defaults,
//! so a TOML file only needs to name the values it overrides.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};
use crate::core::types::{ActivityKind, NeedKind};

/// Configuration for the whole world: grid, agent, needs, timing and terrain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub grid: GridConfig,
    pub agent: AgentConfig,
    pub needs: NeedsConfig,
    pub schedule: ScheduleConfig,
    pub speech: SpeechConfig,
    pub clock: ClockConfig,
    pub terrain: TerrainConfig,
    /// Seed for the scheduler's random streams (goal choice and speech)
    pub seed: u64,
}

// === GRID ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of the square walkable grid, in cells
    pub size: i32,

    /// Isometric tile width in screen pixels
    ///
    /// Only used internally for screen-distance comparisons; with a 2:1
    /// width/height ratio a grid-diagonal step is twice as long on screen as
    /// a grid-vertical one.
    pub tile_width: f32,

    /// Isometric tile height in screen pixels
    ///
    /// Movement is rescaled so every step covers `tile_height * speed` pixels
    /// on screen regardless of direction.
    pub tile_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 12,
            tile_width: 128.0,
            tile_height: 64.0,
        }
    }
}

// === AGENT ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Spawn position in grid coordinates
    pub start: [f32; 2],

    /// Grid units moved per frame (before isometric rescaling)
    pub speed: f32,

    /// Radius of the agent's collision circle, in grid units
    ///
    /// Must stay below 0.5 so the circle fits inside one cell.
    pub collision_radius: f32,

    /// Screen-pixel distance under which a waypoint counts as reached
    ///
    /// Must exceed the per-frame screen step (`tile_height * speed`),
    /// otherwise the agent can oscillate around a waypoint.
    pub arrival_epsilon: f32,

    /// How far the agent is pushed away from an activity location when it
    /// respawns after the activity (slightly larger than the collision radius)
    pub respawn_distance: f32,

    /// Known-safe position used when no cell around a location is free
    pub fallback_spawn: [f32; 2],
}

impl AgentConfig {
    pub fn start_position(&self) -> Vec2 {
        Vec2::from(self.start)
    }

    pub fn fallback_position(&self) -> Vec2 {
        Vec2::from(self.fallback_spawn)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start: [4.0, 4.0],
            speed: 0.04,
            collision_radius: 0.1,
            arrival_epsilon: 5.0,
            respawn_distance: 0.6,
            fallback_spawn: [5.0, 5.0],
        }
    }
}

// === NEEDS ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsConfig {
    /// Base decay of energy per second, before time-of-day multipliers
    pub energy_decay: f32,
    /// Base decay of hunger per second
    pub hunger_decay: f32,
    /// Base decay of fun per second
    pub fun_decay: f32,
    /// Base decay of social per second
    pub social_decay: f32,

    /// Upper cap for every need; a need at the ceiling never drives a goal
    pub ceiling: f32,

    /// Value every need starts at
    pub initial: f32,
}

impl NeedsConfig {
    pub fn base_rate(&self, need: NeedKind) -> f32 {
        match need {
            NeedKind::Energy => self.energy_decay,
            NeedKind::Hunger => self.hunger_decay,
            NeedKind::Fun => self.fun_decay,
            NeedKind::Social => self.social_decay,
        }
    }
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            // energy > fun > hunger > social
            energy_decay: 0.5,
            hunger_decay: 0.3,
            fun_decay: 0.4,
            social_decay: 0.2,
            ceiling: 100.0,
            initial: 100.0,
        }
    }
}

// === SCHEDULE ===

/// Activity durations in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub work_ms: u32,
    pub rest_ms: u32,
    pub eat_ms: u32,
    pub play_ms: u32,
    pub socialize_ms: u32,
    /// Used for any activity without an explicit entry
    pub default_ms: u32,
}

impl ScheduleConfig {
    pub fn duration_ms(&self, activity: ActivityKind) -> u32 {
        let ms = match activity {
            ActivityKind::Work => self.work_ms,
            ActivityKind::Rest => self.rest_ms,
            ActivityKind::Eat => self.eat_ms,
            ActivityKind::Play => self.play_ms,
            ActivityKind::Socialize => self.socialize_ms,
        };
        if ms == 0 {
            self.default_ms
        } else {
            ms
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_ms: 5000,
            rest_ms: 3000,
            eat_ms: 2000,
            play_ms: 4000,
            socialize_ms: 3000,
            default_ms: 3000,
        }
    }
}

// === SPEECH ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Minimum time between two "should I speak?" rolls
    pub check_interval_ms: u32,
    /// Probability that a roll starts speaking
    pub chance: f32,
    /// Time to reveal one character of the phrase
    pub typing_ms_per_char: u32,
    /// How long the fully typed phrase stays visible
    pub pause_after_typing_ms: u32,
    /// Probability of drawing from the time-of-day pool instead of the
    /// general pool
    pub time_phrase_chance: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: 3000,
            chance: 0.3,
            typing_ms_per_char: 50,
            pause_after_typing_ms: 2000,
            time_phrase_chance: 0.7,
        }
    }
}

// === CLOCK ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub start_day: u32,
    pub start_hour: u32,
    /// Real milliseconds per game minute (1000 = one game minute per second)
    pub ms_per_game_minute: u32,
    /// Speed multiplier, clamped to [0.1, 10]
    pub time_scale: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_day: 1,
            start_hour: 8,
            ms_per_game_minute: 1000,
            time_scale: 1.0,
        }
    }
}

// === TERRAIN ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Samples per side of a lake height field
    pub lake_resolution: usize,
    /// Samples per side of a ground patch height field
    pub patch_resolution: usize,
    /// Frequency of the lake's interior noise relative to its radius
    pub lake_noise_scale: f32,
    /// Frequency of the lake's edge perturbation
    pub lake_edge_scale: f32,
    /// Frequency of the ground patch edge perturbation
    pub patch_edge_scale: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            lake_resolution: 64,
            patch_resolution: 32,
            lake_noise_scale: 0.15,
            lake_edge_scale: 3.0,
            patch_edge_scale: 2.0,
        }
    }
}

impl WorldConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(WorldError::InvalidConfig(msg));

        if self.grid.size <= 0 {
            return invalid(format!("grid.size ({}) must be positive", self.grid.size));
        }
        if self.grid.tile_width <= 0.0 || self.grid.tile_height <= 0.0 {
            return invalid("tile dimensions must be positive".into());
        }
        if self.agent.speed <= 0.0 {
            return invalid(format!("agent.speed ({}) must be positive", self.agent.speed));
        }
        if !(0.0..0.5).contains(&self.agent.collision_radius) {
            return invalid(format!(
                "agent.collision_radius ({}) must be in [0, 0.5)",
                self.agent.collision_radius
            ));
        }

        // A step that overshoots the arrival window never lands on a waypoint
        let screen_step = self.grid.tile_height * self.agent.speed;
        if self.agent.arrival_epsilon <= screen_step {
            return invalid(format!(
                "agent.arrival_epsilon ({}) must exceed the per-frame screen step ({:.2})",
                self.agent.arrival_epsilon, screen_step
            ));
        }

        for (name, p) in [
            ("speech.chance", self.speech.chance),
            ("speech.time_phrase_chance", self.speech.time_phrase_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{} ({}) must be a probability", name, p));
            }
        }

        if self.needs.ceiling <= 0.0 || self.needs.initial > self.needs.ceiling {
            return invalid(format!(
                "needs.initial ({}) must not exceed needs.ceiling ({})",
                self.needs.initial, self.needs.ceiling
            ));
        }
        if self.clock.ms_per_game_minute == 0 {
            return invalid("clock.ms_per_game_minute must be non-zero".into());
        }
        if !self.clock.time_scale.is_finite() || self.clock.time_scale <= 0.0 {
            return invalid(format!(
                "clock.time_scale ({}) must be finite and positive",
                self.clock.time_scale
            ));
        }
        if self.terrain.lake_resolution == 0 || self.terrain.patch_resolution == 0 {
            return invalid("terrain resolutions must be non-zero".into());
        }

        Ok(())
    }
}
