//! Question records
//!
//! A question is immutable once it has been loaded. Validation happens
//! once, when a bank is assembled, so the game never has to defend
//! against a malformed record.

use enum_map::Enum;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants::question::{
    MAX_BASE_POINTS, MAX_CATEGORY_LENGTH, MAX_OPTION_LENGTH, MAX_TEXT_LENGTH, OPTION_COUNT,
};

/// How hard a question is considered to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy question
    Easy,
    /// Medium question
    Medium,
    /// Hard question
    Hard,
}

/// Validates that the correct answer points at one of the options
fn validate_correct_answer(val: &usize) -> garde::Result {
    if *val < OPTION_COUNT {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "correct_answer must be below {OPTION_COUNT}"
        )))
    }
}

/// A multiple-choice trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Identifier, unique within a bank
    #[garde(skip)]
    pub id: u32,
    /// The question as shown to the players
    #[garde(length(min = 1, max = MAX_TEXT_LENGTH))]
    pub text: String,
    /// The answer options, always exactly four
    #[garde(
        length(equal = OPTION_COUNT),
        inner(length(min = 1, max = MAX_OPTION_LENGTH))
    )]
    pub options: Vec<String>,
    /// Index of the correct option
    #[garde(custom(|v, _| validate_correct_answer(v)))]
    pub correct_answer: usize,
    /// Subject label shown next to the question
    #[garde(length(min = 1, max = MAX_CATEGORY_LENGTH))]
    pub category: String,
    /// Difficulty tier, used by the optional difficulty multiplier
    #[garde(skip)]
    pub difficulty: Difficulty,
    /// Points awarded for a correct answer before any time bonus
    #[garde(range(min = 1, max = MAX_BASE_POINTS))]
    pub base_points: u64,
}

impl Question {
    /// Whether the given option index is the correct one
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}
