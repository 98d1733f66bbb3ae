//! Decaying needs that drive goal selection

use serde::{Deserialize, Serialize};

use crate::core::calendar::TimePeriod;
use crate::core::config::NeedsConfig;
use crate::core::types::NeedKind;

/// The four needs, each in [0, 100]; higher is better
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    /// 100 = fully rested, 0 = exhausted
    pub energy: f32,
    /// 100 = fed, 0 = starving
    pub hunger: f32,
    pub fun: f32,
    pub social: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self::uniform(100.0)
    }
}

impl Needs {
    pub fn uniform(value: f32) -> Self {
        Self {
            energy: value,
            hunger: value,
            fun: value,
            social: value,
        }
    }

    pub fn get(&self, need: NeedKind) -> f32 {
        match need {
            NeedKind::Energy => self.energy,
            NeedKind::Hunger => self.hunger,
            NeedKind::Fun => self.fun,
            NeedKind::Social => self.social,
        }
    }

    fn slot(&mut self, need: NeedKind) -> &mut f32 {
        match need {
            NeedKind::Energy => &mut self.energy,
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Fun => &mut self.fun,
            NeedKind::Social => &mut self.social,
        }
    }

    /// Overwrite one need, clamped to [0, ceiling]
    pub fn set(&mut self, need: NeedKind, value: f32, ceiling: f32) {
        *self.slot(need) = value.clamp(0.0, ceiling);
    }

    /// Decay needs over one interval (floored at 0)
    pub fn decay(&mut self, rates: &DecayRates) {
        for need in NeedKind::ALL {
            let value = self.slot(need);
            *value = (*value - rates.get(need)).max(0.0);
        }
    }

    /// Restore a need (capped at the ceiling)
    pub fn replenish(&mut self, need: NeedKind, amount: f32, ceiling: f32) {
        let value = self.slot(need);
        *value = (*value + amount).min(ceiling);
    }

    /// Get most pressing need: the lowest one strictly below the ceiling
    ///
    /// Ties keep the earlier need in `NeedKind::ALL` order.
    pub fn lowest_below(&self, ceiling: f32) -> Option<(NeedKind, f32)> {
        let mut lowest: Option<(NeedKind, f32)> = None;
        for need in NeedKind::ALL {
            let value = self.get(need);
            let threshold = lowest.map_or(ceiling, |(_, v)| v);
            if value < threshold {
                lowest = Some((need, value));
            }
        }
        lowest
    }

    /// Copy with every value rounded to a whole number, for display
    pub fn rounded(&self) -> Self {
        Self {
            energy: self.energy.round(),
            hunger: self.hunger.round(),
            fun: self.fun.round(),
            social: self.social.round(),
        }
    }
}

/// Per-second decay of each need in the current time period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRates {
    pub energy: f32,
    pub hunger: f32,
    pub fun: f32,
    pub social: f32,
}

impl DecayRates {
    /// Base rates scaled by the period's multipliers
    pub fn for_period(config: &NeedsConfig, period: TimePeriod) -> Self {
        let [energy, hunger, fun, social] = period_multipliers(period);
        Self {
            energy: config.energy_decay * energy,
            hunger: config.hunger_decay * hunger,
            fun: config.fun_decay * fun,
            social: config.social_decay * social,
        }
    }

    pub fn get(&self, need: NeedKind) -> f32 {
        match need {
            NeedKind::Energy => self.energy,
            NeedKind::Hunger => self.hunger,
            NeedKind::Fun => self.fun,
            NeedKind::Social => self.social,
        }
    }
}

/// Multipliers in `NeedKind::ALL` order
fn period_multipliers(period: TimePeriod) -> [f32; 4] {
    match period {
        // Hungry for breakfast, full of energy
        TimePeriod::Morning => [0.8, 1.2, 1.0, 1.0],
        TimePeriod::Afternoon => [1.0, 1.0, 1.0, 1.0],
        // Tired, wants company
        TimePeriod::Evening => [1.3, 0.8, 1.2, 1.5],
        TimePeriod::Night => [2.0, 0.5, 0.7, 0.5],
    }
}
