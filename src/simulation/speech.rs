//! Idle chatter: phrase pools and the typing/hold countdown
//!
//! A phrase is revealed one character per `typing_ms_per_char`, then stays on
//! screen for `pause_after_typing_ms` before the agent goes back to idle.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::calendar::TimePeriod;
use crate::core::config::SpeechConfig;

const DAY_PLACEHOLDER: &str = "{day}";

const MORNING: &[&str] = &[
    "Good morning, world!",
    "New day, new chances",
    "Coffee. I need coffee.",
    "What's the plan for today?",
    "The sun is up, so am I",
    "Day {day}... wonder what it brings",
    "Mornings are for big ideas",
];

const AFTERNOON: &[&str] = &[
    "The day is in full swing!",
    "Time for a snack...",
    "Day {day} and so much left to do",
    "What a great day",
    "Back to work, I suppose",
    "Where did the time go?",
    "More coffee would help",
];

const EVENING: &[&str] = &[
    "Getting dark already...",
    "That was a productive day",
    "Almost time to rest",
    "Nice sunset tonight",
    "Maybe a walk before bed?",
    "Day {day} is wrapping up",
    "I wonder what tomorrow holds",
];

const NIGHT: &[&str] = &[
    "Night already... time to sleep",
    "The stars look lovely",
    "Nights are for thinking",
    "A pixel person in a pixel world",
    "Stuck in an endless loop of my own making",
    "Is there a grid inside the grid?",
    "Night {day}... so quiet",
    "Dreams are waiting",
];

const GENERAL: &[&str] = &[
    "What should I do next?",
    "What was I thinking about?",
    "Now there's an idea!",
    "I wonder what's new",
];

/// Phrases for a time of day
pub fn period_phrases(period: TimePeriod) -> &'static [&'static str] {
    match period {
        TimePeriod::Morning => MORNING,
        TimePeriod::Afternoon => AFTERNOON,
        TimePeriod::Evening => EVENING,
        TimePeriod::Night => NIGHT,
    }
}

pub fn general_phrases() -> &'static [&'static str] {
    GENERAL
}

/// Pick a phrase, preferring the period's pool with `time_phrase_chance`
pub fn pick_phrase<R: Rng>(
    rng: &mut R,
    config: &SpeechConfig,
    period: TimePeriod,
    day: u32,
) -> String {
    let pool = if rng.gen::<f32>() < config.time_phrase_chance {
        period_phrases(period)
    } else {
        general_phrases()
    };
    let phrase = pool.choose(rng).copied().unwrap_or("...");
    phrase.replace(DAY_PLACEHOLDER, &day.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpeechPhase {
    Typing { carry_ms: u32 },
    Holding { remaining_ms: u32 },
}

/// What happened to a phrase during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechUpdate {
    Unchanged,
    /// More characters became visible
    Revealed,
    Finished,
}

/// A phrase being typed out, then held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechState {
    text: String,
    char_count: usize,
    revealed: usize,
    phase: SpeechPhase,
}

impl SpeechState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            revealed: 0,
            phase: SpeechPhase::Typing { carry_ms: 0 },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The part of the phrase typed so far
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.phase, SpeechPhase::Typing { .. })
    }

    /// Advance the countdowns by `dt_ms`
    pub fn update(&mut self, dt_ms: u32, config: &SpeechConfig) -> SpeechUpdate {
        match self.phase {
            SpeechPhase::Typing { carry_ms } => {
                let before = self.revealed;
                if config.typing_ms_per_char == 0 {
                    self.revealed = self.char_count;
                    self.finish_typing(config, 0);
                } else {
                    let mut carry = carry_ms.saturating_add(dt_ms);
                    while carry >= config.typing_ms_per_char && self.revealed < self.char_count {
                        carry -= config.typing_ms_per_char;
                        self.revealed += 1;
                    }
                    if self.revealed >= self.char_count {
                        self.finish_typing(config, carry);
                    } else {
                        self.phase = SpeechPhase::Typing { carry_ms: carry };
                    }
                }

                match self.phase {
                    SpeechPhase::Holding { remaining_ms: 0 } => SpeechUpdate::Finished,
                    _ if self.revealed > before => SpeechUpdate::Revealed,
                    _ => SpeechUpdate::Unchanged,
                }
            }
            SpeechPhase::Holding { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(dt_ms);
                self.phase = SpeechPhase::Holding { remaining_ms };
                if remaining_ms == 0 {
                    SpeechUpdate::Finished
                } else {
                    SpeechUpdate::Unchanged
                }
            }
        }
    }

    /// Leftover typing time counts against the hold
    fn finish_typing(&mut self, config: &SpeechConfig, carry_ms: u32) {
        self.phase = SpeechPhase::Holding {
            remaining_ms: config.pause_after_typing_ms.saturating_sub(carry_ms),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_typing_then_hold() {
        let config = SpeechConfig::default();
        let mut speech = SpeechState::new("Hi!");

        assert_eq!(speech.visible_text(), "");
        assert_eq!(speech.update(50, &config), SpeechUpdate::Revealed);
        assert_eq!(speech.visible_text(), "H");
        assert_eq!(speech.update(20, &config), SpeechUpdate::Unchanged);
        assert_eq!(speech.update(80, &config), SpeechUpdate::Revealed);
        assert_eq!(speech.visible_text(), "Hi!");
        assert!(!speech.is_typing());

        assert_eq!(speech.update(1900, &config), SpeechUpdate::Unchanged);
        assert_eq!(speech.update(100, &config), SpeechUpdate::Finished);
    }

    #[test]
    fn test_visible_text_respects_char_boundaries() {
        let config = SpeechConfig::default();
        let mut speech = SpeechState::new("héllo");
        speech.update(100, &config);
        assert_eq!(speech.visible_text(), "hé");
    }

    #[test]
    fn test_long_frame_finishes_everything() {
        let config = SpeechConfig::default();
        let mut speech = SpeechState::new("abc");
        assert_eq!(speech.update(10_000, &config), SpeechUpdate::Finished);
    }

    #[test]
    fn test_pick_phrase_replaces_day() {
        let config = SpeechConfig {
            time_phrase_chance: 1.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let phrase = pick_phrase(&mut rng, &config, TimePeriod::Night, 12);
            assert!(!phrase.contains(DAY_PLACEHOLDER));
            if phrase.starts_with("Night ") && phrase.contains("quiet") {
                assert_eq!(phrase, "Night 12... so quiet");
            }
        }
    }

    #[test]
    fn test_general_pool_when_time_chance_zero() {
        let config = SpeechConfig {
            time_phrase_chance: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let phrase = pick_phrase(&mut rng, &config, TimePeriod::Morning, 1);
        assert!(general_phrases().contains(&phrase.as_str()));
    }
}
