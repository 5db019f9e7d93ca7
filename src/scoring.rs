//! Points formula
//!
//! A correct answer is worth `base_points + floor(time_remaining / k)`.
//! The sum can optionally be scaled by a per-difficulty percentage, then
//! rounded down. Everything is integer arithmetic, so the same inputs
//! always give the same result.

use enum_map::{EnumMap, enum_map};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{bank::Difficulty, constants};

fn validate_multipliers(val: &Option<EnumMap<Difficulty, u64>>) -> garde::Result {
    const MIN: u64 = constants::scoring::MIN_DIFFICULTY_PERCENT;
    const MAX: u64 = constants::scoring::MAX_DIFFICULTY_PERCENT;

    match val {
        Some(multipliers)
            if multipliers
                .values()
                .any(|percent| !(MIN..=MAX).contains(percent)) =>
        {
            Err(garde::Error::new(format!(
                "difficulty_multipliers must be percentages in [{MIN},{MAX}]",
            )))
        }
        _ => Ok(()),
    }
}

/// Scoring configuration for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ScoringConfig {
    /// Divisor `k` applied to the remaining seconds to obtain the time bonus
    #[garde(range(min = 1, max = constants::scoring::MAX_TIME_BONUS_DIVISOR))]
    pub time_bonus_divisor: u64,
    /// Percentage applied per difficulty tier, `None` for a flat formula
    #[garde(custom(|v, _| validate_multipliers(v)))]
    pub difficulty_multipliers: Option<EnumMap<Difficulty, u64>>,
}

impl Default for ScoringConfig {
    /// Flat time bonus with `k = 5` and no difficulty scaling
    fn default() -> Self {
        Self {
            time_bonus_divisor: constants::scoring::DEFAULT_TIME_BONUS_DIVISOR,
            difficulty_multipliers: None,
        }
    }
}

impl ScoringConfig {
    /// The standard difficulty percentages: 100 / 120 / 150
    pub fn standard_multipliers() -> EnumMap<Difficulty, u64> {
        enum_map! {
            Difficulty::Easy => 100,
            Difficulty::Medium => 120,
            Difficulty::Hard => 150,
        }
    }

    /// This configuration with the standard difficulty percentages enabled
    #[must_use]
    pub fn with_difficulty_multipliers(self) -> Self {
        Self {
            difficulty_multipliers: Some(Self::standard_multipliers()),
            ..self
        }
    }

    /// Time bonus for answering with `time_remaining` seconds left
    pub fn time_bonus(&self, time_remaining: u64) -> u64 {
        time_remaining / self.time_bonus_divisor.max(1)
    }

    /// Points earned by a correct answer
    pub fn points(&self, base_points: u64, time_remaining: u64, difficulty: Difficulty) -> u64 {
        let raw = base_points.saturating_add(self.time_bonus(time_remaining));

        match &self.difficulty_multipliers {
            Some(multipliers) => raw.saturating_mul(multipliers[difficulty]) / 100,
            None => raw,
        }
    }
}
