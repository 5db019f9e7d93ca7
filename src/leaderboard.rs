//! Final standings
//!
//! Once a session finishes, its players are projected into a ranking and
//! a few aggregate statistics for the results screen. Nothing here changes
//! a score.

use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;

use crate::{constants::game::DEFAULT_QUESTION_COUNT, player::Player};

/// How a position in the ranking is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Position {
    /// First place
    Champion,
    /// Second place
    RunnerUp,
    /// Third place
    Third,
    /// Any later place, 1-indexed
    Place(usize),
}

impl Position {
    /// Label for the 0-indexed position in the ranking
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Champion,
            1 => Self::RunnerUp,
            2 => Self::Third,
            n => Self::Place(n + 1),
        }
    }
}

/// One row of the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// Presentation label of the row
    pub position: Position,
    /// The player with their final score
    pub player: Player,
}

/// Aggregate numbers shown under the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Highest final score
    pub max_score: u64,
    /// Mean final score, rounded to the nearest integer
    pub mean_score: u64,
    /// Number of players in the session
    pub player_count: usize,
    /// Number of questions that were played
    pub question_count: usize,
}

/// Ranking and statistics of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Results {
    standings: Vec<Standing>,
    stats: Stats,
}

impl Results {
    /// Builds the results, assuming the default number of questions
    pub fn new(players: Vec<Player>) -> Self {
        Self::with_question_count(players, DEFAULT_QUESTION_COUNT)
    }

    /// Builds the results for a session that played `question_count` questions
    ///
    /// Players are ordered by score, highest first. Players with the same
    /// score keep the order they had in `players`.
    pub fn with_question_count(players: Vec<Player>, question_count: usize) -> Self {
        let player_count = players.len();
        let total: u64 = players.iter().map(|player| player.score).sum();
        let max_score = players.iter().map(|player| player.score).max().unwrap_or(0);
        let mean_score = match player_count as u64 {
            0 => 0,
            count => (2 * total + count) / (2 * count),
        };

        let standings = players
            .into_iter()
            .sorted_by_key(|player| Reverse(player.score))
            .enumerate()
            .map(|(index, player)| Standing {
                position: Position::from_index(index),
                player,
            })
            .collect_vec();

        Self {
            standings,
            stats: Stats {
                max_score,
                mean_score,
                player_count,
                question_count,
            },
        }
    }

    /// Rows of the ranking, best first
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Aggregate statistics
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The player ranked first, if there are any players at all
    pub fn winner(&self) -> Option<&Player> {
        self.standings.first().map(|standing| &standing.player)
    }
}
