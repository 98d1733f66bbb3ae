//! Game clock for time-of-day tracking
//!
//! One game minute passes per `ms_per_game_minute` real milliseconds (scaled
//! by `time_scale`). Time periods (Morning, Afternoon, Evening, Night) drive
//! need decay multipliers and the speech phrase pools.

use serde::{Deserialize, Serialize};

use crate::core::config::ClockConfig;

/// Time of day periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Morning,   // 06:00-12:00
    Afternoon, // 12:00-18:00
    Evening,   // 18:00-22:00
    Night,     // 22:00-06:00
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night, // 22-23, 0-5
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::Night => "night",
        }
    }
}

/// What changed while the clock advanced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockEvents {
    /// Set when the time period differs from the one before advancing
    pub period_changed: Option<TimePeriod>,
    /// Number of midnights crossed
    pub new_days: u32,
}

/// Clock tracks game time with minute granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    minute: u32,
    hour: u32,
    day: u32,
    total_minutes: u64,
    period: TimePeriod,
    accumulator_ms: f64,
    ms_per_game_minute: u32,
    time_scale: f32,
}

impl GameClock {
    pub fn new(config: &ClockConfig) -> Self {
        let hour = config.start_hour % 24;
        Self {
            minute: 0,
            hour,
            day: config.start_day,
            total_minutes: 0,
            period: TimePeriod::from_hour(hour),
            accumulator_ms: 0.0,
            ms_per_game_minute: config.ms_per_game_minute.max(1),
            time_scale: sanitize_scale(config.time_scale).unwrap_or(1.0),
        }
    }

    /// Feed real elapsed milliseconds; whole game minutes are applied
    pub fn advance_ms(&mut self, real_ms: u32) -> ClockEvents {
        self.accumulator_ms += real_ms as f64 * self.time_scale as f64;

        let mut events = ClockEvents::default();
        let step = self.ms_per_game_minute as f64;
        while self.accumulator_ms >= step {
            self.accumulator_ms -= step;
            self.advance_minute(&mut events);
        }
        events
    }

    /// Skip forward by whole hours (debug helper)
    pub fn skip_hours(&mut self, hours: u32) -> ClockEvents {
        let mut events = ClockEvents::default();
        for _ in 0..hours * 60 {
            self.advance_minute(&mut events);
        }
        events
    }

    fn advance_minute(&mut self, events: &mut ClockEvents) {
        self.minute += 1;
        self.total_minutes += 1;

        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;

            if self.hour >= 24 {
                self.hour = 0;
                self.day += 1;
                events.new_days += 1;
            }

            let period = TimePeriod::from_hour(self.hour);
            if period != self.period {
                self.period = period;
                events.period_changed = Some(period);
            }
        }
    }

    /// Non-finite scales are ignored and the current scale is kept
    pub fn set_time_scale(&mut self, scale: f32) {
        match sanitize_scale(scale) {
            Some(scale) => self.time_scale = scale,
            None => tracing::warn!("ignoring non-finite time scale {}", scale),
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn total_minutes(&self) -> u64 {
        self.total_minutes
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    /// "HH:MM"
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

/// Clamp to [0.1, 10]; NaN and infinities have no meaningful scale
fn sanitize_scale(scale: f32) -> Option<f32> {
    scale.is_finite().then(|| scale.clamp(0.1, 10.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_period_from_hour() {
        assert_eq!(TimePeriod::from_hour(6), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(11), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(12), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(17), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(18), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(21), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(22), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(5), TimePeriod::Night);
    }

    #[test]
    fn test_clock_starts_at_configured_hour() {
        let clock = GameClock::default();
        assert_eq!(clock.hour(), 8);
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.period(), TimePeriod::Morning);
        assert_eq!(clock.formatted(), "08:00");
    }

    #[test]
    fn test_one_second_is_one_minute() {
        let mut clock = GameClock::default();
        clock.advance_ms(999);
        assert_eq!(clock.minute(), 0);
        clock.advance_ms(1);
        assert_eq!(clock.minute(), 1);
        assert_eq!(clock.total_minutes(), 1);
    }

    #[test]
    fn test_period_change_reported_once() {
        let mut clock = GameClock::default();
        // 08:00 -> 12:00
        let events = clock.skip_hours(4);
        assert_eq!(events.period_changed, Some(TimePeriod::Afternoon));
        assert_eq!(clock.formatted(), "12:00");

        let events = clock.advance_ms(60_000);
        assert_eq!(events.period_changed, None);
    }

    #[test]
    fn test_midnight_rolls_day() {
        let mut clock = GameClock::default();
        let events = clock.skip_hours(16);
        assert_eq!(clock.hour(), 0);
        assert_eq!(clock.day(), 2);
        assert_eq!(events.new_days, 1);
        assert_eq!(clock.period(), TimePeriod::Night);
    }

    #[test]
    fn test_time_scale_is_clamped() {
        let mut clock = GameClock::default();
        clock.set_time_scale(50.0);
        assert_eq!(clock.time_scale(), 10.0);
        clock.advance_ms(1000);
        assert_eq!(clock.minute(), 10);

        clock.set_time_scale(0.0);
        assert_eq!(clock.time_scale(), 0.1);
    }

    #[test]
    fn test_non_finite_time_scale_is_ignored() {
        let mut clock = GameClock::default();
        clock.set_time_scale(2.0);
        clock.set_time_scale(f32::NAN);
        clock.set_time_scale(f32::INFINITY);
        assert_eq!(clock.time_scale(), 2.0);

        for _ in 0..120 {
            clock.advance_ms(500);
        }
        // 60 real seconds at double speed
        assert_eq!(clock.formatted(), "10:00");

        let config = ClockConfig {
            time_scale: f32::NAN,
            ..ClockConfig::default()
        };
        assert_eq!(GameClock::new(&config).time_scale(), 1.0);
    }
}
