//! Configuration constants for the quiz game
//!
//! This module contains the limits and defaults used throughout the game
//! so that setup validation, question validation and the session options
//! all agree on the same boundaries.

/// Player roster limits
pub mod players {
    /// Minimum number of named players required to start a game
    pub const MIN_PLAYER_COUNT: usize = 2;
    /// Maximum number of players allowed in a single game
    pub const MAX_PLAYER_COUNT: usize = 6;
    /// Maximum length of a player name in characters
    pub const MAX_NAME_LENGTH: usize = 20;
    /// Avatars offered on the setup screen, assigned round-robin to new slots
    pub const AVATARS: [&str; 10] = [
        "👤", "🧑", "👩", "🧔", "👱", "🧑‍🦱", "👩‍🦱", "🧑‍🦰", "👩‍🦰", "🧑‍🦲",
    ];
}

/// Question record limits
pub mod question {
    /// Number of answer options every question carries
    pub const OPTION_COUNT: usize = 4;
    /// Maximum length of a question text
    pub const MAX_TEXT_LENGTH: usize = 200;
    /// Maximum length of a single answer option
    pub const MAX_OPTION_LENGTH: usize = 100;
    /// Maximum length of a category label
    pub const MAX_CATEGORY_LENGTH: usize = 50;
    /// Maximum points a question may be worth before the time bonus
    pub const MAX_BASE_POINTS: u64 = 1000;
}

/// Session limits and defaults
pub mod game {
    /// Minimum time limit in seconds for answering a question
    pub const MIN_TIME_LIMIT: u64 = 5;
    /// Maximum time limit in seconds for answering a question
    pub const MAX_TIME_LIMIT: u64 = 240;
    /// Default time limit in seconds for answering a question
    pub const DEFAULT_TIME_LIMIT: u64 = 30;
    /// Minimum delay in seconds between a reveal and the next round
    pub const MIN_ADVANCE_DELAY: u64 = 0;
    /// Maximum delay in seconds between a reveal and the next round
    pub const MAX_ADVANCE_DELAY: u64 = 30;
    /// Default delay in seconds between a reveal and the next round
    pub const DEFAULT_ADVANCE_DELAY: u64 = 3;
    /// Minimum number of questions drawn for a session
    pub const MIN_QUESTION_COUNT: usize = 1;
    /// Maximum number of questions drawn for a session
    pub const MAX_QUESTION_COUNT: usize = 100;
    /// Default number of questions drawn for a session
    pub const DEFAULT_QUESTION_COUNT: usize = 10;
    /// Interval between two countdown ticks in seconds
    pub const TICK_INTERVAL: u64 = 1;
    /// Longest transition screen allowed between setup and the first round
    pub const MAX_LOADING_SCREEN: u64 = 10;
}

/// Scoring defaults
pub mod scoring {
    /// Default divisor `k` in `base_points + floor(time_remaining / k)`
    pub const DEFAULT_TIME_BONUS_DIVISOR: u64 = 5;
    /// Largest divisor accepted by validation
    pub const MAX_TIME_BONUS_DIVISOR: u64 = 60;
    /// Smallest difficulty percentage, so scaling never lowers a score
    pub const MIN_DIFFICULTY_PERCENT: u64 = 100;
    /// Largest difficulty percentage accepted by validation
    pub const MAX_DIFFICULTY_PERCENT: u64 = 1000;
}
