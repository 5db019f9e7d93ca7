//! The question bank
//!
//! A bank is a validated, read-only collection of questions. A session
//! draws a shuffled subset from it when it starts. The randomness source
//! is passed in so that draws can be reproduced.

pub mod builtin;
pub mod question;

use std::collections::HashSet;

use garde::Validate;
use itertools::Itertools;
use thiserror::Error;

pub use question::{Difficulty, Question};

/// Errors raised while assembling a bank from custom data
#[derive(Error, Debug)]
pub enum Error {
    /// The bank contains no questions at all
    #[error("question bank is empty")]
    Empty,
    /// Two questions share the same identifier
    #[error("question id {0} appears more than once")]
    DuplicateId(u32),
    /// A question failed validation
    #[error("question {id} is invalid: {report}")]
    Invalid {
        /// Identifier of the offending question
        id: u32,
        /// What failed
        report: garde::Report,
    },
}

/// A fixed collection of questions
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a bank from custom questions after validating every record
    ///
    /// # Errors
    ///
    /// * `Error::Empty` - no questions were given
    /// * `Error::DuplicateId` - two records share an identifier
    /// * `Error::Invalid` - a record breaks the question schema
    pub fn new(questions: Vec<Question>) -> Result<Self, Error> {
        if questions.is_empty() {
            return Err(Error::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(Error::DuplicateId(question.id));
            }
            question.validate().map_err(|report| Error::Invalid {
                id: question.id,
                report,
            })?;
        }

        Ok(Self { questions })
    }

    /// The bank shipped with the game
    pub fn builtin() -> Self {
        Self {
            questions: builtin::questions(),
        }
    }

    /// Draws up to `count` distinct questions in random order
    ///
    /// If the bank holds fewer than `count` questions, all of them are
    /// returned (shuffled).
    pub fn draw(&self, count: usize, rng: &mut fastrand::Rng) -> Vec<Question> {
        let mut drawn = self.questions.clone();
        rng.shuffle(&mut drawn);
        drawn.truncate(count);
        drawn
    }

    /// All questions in authoring order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the bank
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        self.questions
            .iter()
            .map(|question| question.category.as_str())
            .unique()
            .collect_vec()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}
