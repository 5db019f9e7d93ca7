//! Turn-based session logic
//!
//! A [`Game`] walks a fixed list of questions. Each round belongs to one
//! player: the active player either picks an option or lets the countdown
//! run out, the answer is revealed, and after a short pause the next
//! question goes to the next player in line. The session finishes when
//! the questions run out.
//!
//! The game never sleeps. Whenever time has to pass it returns control to
//! its caller through `schedule_message`, and carries on when the caller
//! hands the alarm back through [`Game::receive_alarm`].

use std::fmt::Display;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;
use tracing::{debug, info};
use web_time::Duration;

use crate::{
    bank::{Difficulty, Question},
    constants,
    player::{Id, Player},
    scoring::ScoringConfig,
    session::Tunnel,
    timer::{Countdown, TickOutcome},
};

/// Token identifying one run of a session
///
/// Every alarm is stamped with the token of the session that scheduled it.
/// Starting or restarting a session issues a fresh token, so alarms left
/// over from an earlier run are recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    /// The token that follows this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether the session still has rounds to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Rounds are being played
    Playing,
    /// Every question has been played
    Finished,
}

type ValidationResult = garde::Result;

/// Validates that a duration falls within specified bounds, in whole seconds
fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) && val.subsec_nanos() == 0 {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} must be a whole number of seconds in [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

fn validate_time_limit(val: &Duration) -> ValidationResult {
    validate_duration::<
        { constants::game::MIN_TIME_LIMIT },
        { constants::game::MAX_TIME_LIMIT },
    >("time_limit", val)
}

fn validate_advance_delay(val: &Duration) -> ValidationResult {
    validate_duration::<
        { constants::game::MIN_ADVANCE_DELAY },
        { constants::game::MAX_ADVANCE_DELAY },
    >("advance_delay", val)
}

/// Tunable parameters of a session
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Options {
    /// Time the active player has to answer
    #[garde(custom(|v, _| validate_time_limit(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub time_limit: Duration,
    /// Pause between a reveal and the next round
    #[garde(custom(|v, _| validate_advance_delay(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub advance_delay: Duration,
    /// Number of questions drawn from the bank
    #[garde(range(
        min = constants::game::MIN_QUESTION_COUNT,
        max = constants::game::MAX_QUESTION_COUNT
    ))]
    pub question_count: usize,
    /// Points formula
    #[garde(dive)]
    pub scoring: ScoringConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(constants::game::DEFAULT_TIME_LIMIT),
            advance_delay: Duration::from_secs(constants::game::DEFAULT_ADVANCE_DELAY),
            question_count: constants::game::DEFAULT_QUESTION_COUNT,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Reasons a session cannot be built
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// There is nobody to take turns
    #[error("a session needs at least one player")]
    NoPlayers,
    /// There is nothing to ask
    #[error("a session needs at least one question")]
    NoQuestions,
}

/// Sound the view may play, if it can
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cue {
    /// The active player picked the right option
    Correct,
    /// The active player picked a wrong option or ran out of time
    Wrong,
}

/// What the players see of a question before it is revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// The question text
    pub text: String,
    /// The four options
    pub options: Vec<String>,
    /// Subject label
    pub category: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Points before the time bonus
    pub base_points: u64,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            text: question.text.clone(),
            options: question.options.clone(),
            category: question.category.clone(),
            difficulty: question.difficulty,
            base_points: question.base_points,
        }
    }
}

/// Update messages sent to the view as the session progresses
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// A new round begins
    QuestionAnnouncement {
        /// Index of the question (0-based)
        index: usize,
        /// Total number of questions
        count: usize,
        /// The question, without its answer
        question: QuestionView,
        /// The player whose turn it is
        player: Id,
        /// Seconds on the clock
        time_limit: u64,
    },
    /// One second passed, this many remain
    TimerTick(u64),
    /// The round is resolved
    AnswerReveal {
        /// Option the player picked, `None` on timeout
        selected: Option<usize>,
        /// The correct option
        correct_answer: usize,
        /// Whether the pick was correct
        correct: bool,
        /// Points the player earned this round
        points_awarded: u64,
        /// All players with their updated scores
        players: Vec<Player>,
    },
    /// A sound to play
    Cue(Cue),
    /// The last round is done; final players with their scores
    GameOver(Vec<Player>),
}

/// Full snapshot of the session for a view that (re)attaches
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// A round is waiting for an answer
    Question {
        /// Index of the question (0-based)
        index: usize,
        /// Total number of questions
        count: usize,
        /// The question, without its answer
        question: QuestionView,
        /// All players, the active one flagged
        players: Vec<Player>,
        /// Seconds left on the clock
        remaining: u64,
        /// Seconds the clock started from
        time_limit: u64,
    },
    /// A round has been resolved and waits to advance
    Reveal {
        /// Index of the question (0-based)
        index: usize,
        /// Total number of questions
        count: usize,
        /// The question, without its answer
        question: QuestionView,
        /// All players, the active one flagged
        players: Vec<Player>,
        /// Option the player picked, `None` on timeout
        selected: Option<usize>,
        /// The correct option
        correct_answer: usize,
        /// Points the player earned this round
        points_awarded: u64,
    },
    /// The session is over
    Finished(Vec<Player>),
}

/// Deferred work the game asks its caller to hand back later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Advance the countdown by one second
    Tick {
        /// Session that scheduled the alarm
        session: SessionId,
        /// Question index the alarm belongs to
        round: usize,
    },
    /// Move on from a revealed round
    Advance {
        /// Session that scheduled the alarm
        session: SessionId,
        /// Question index the alarm belongs to
        round: usize,
    },
}

/// Answer state of the round in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Whether the answer has been shown
    pub revealed: bool,
    /// Option picked by the active player, if any
    pub selected: Option<usize>,
    /// Points awarded in this round
    pub points_awarded: u64,
}

/// A session in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    session: SessionId,
    players: Vec<Player>,
    questions: Vec<Question>,
    options: Options,
    current_question: usize,
    current_player: usize,
    round: Round,
    timer: Countdown,
    state: State,
}

impl Game {
    /// Creates a session where the first player is active and nothing has
    /// been asked yet
    ///
    /// # Errors
    ///
    /// * `Error::NoPlayers` - `players` is empty
    /// * `Error::NoQuestions` - `questions` is empty
    pub fn new(
        mut players: Vec<Player>,
        questions: Vec<Question>,
        options: Options,
        session: SessionId,
    ) -> Result<Self, Error> {
        if players.is_empty() {
            return Err(Error::NoPlayers);
        }
        if questions.is_empty() {
            return Err(Error::NoQuestions);
        }

        for (index, player) in players.iter_mut().enumerate() {
            player.is_active = index == 0;
        }

        Ok(Self {
            session,
            players,
            questions,
            timer: Countdown::new(options.time_limit),
            options,
            current_question: 0,
            current_player: 0,
            round: Round::default(),
            state: State::Playing,
        })
    }

    /// Opens the first round
    pub fn play<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        schedule_message: S,
        tunnel: &T,
    ) {
        info!(
            session = %self.session,
            players = self.players.len(),
            questions = self.questions.len(),
            "session started"
        );
        self.start_round(schedule_message, tunnel);
    }

    fn current(&self) -> &Question {
        &self.questions[self.current_question]
    }

    fn start_round<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        self.round = Round::default();
        self.timer.start();

        debug!(
            session = %self.session,
            round = self.current_question,
            player = %self.players[self.current_player].name,
            "round started"
        );

        tunnel.send_message(
            &UpdateMessage::QuestionAnnouncement {
                index: self.current_question,
                count: self.questions.len(),
                question: self.current().into(),
                player: self.players[self.current_player].id,
                time_limit: self.timer.duration(),
            }
            .into(),
        );

        if self.timer.expired() {
            self.expire(schedule_message, tunnel);
        } else {
            schedule_message(
                AlarmMessage::Tick {
                    session: self.session,
                    round: self.current_question,
                }
                .into(),
                Duration::from_secs(constants::game::TICK_INTERVAL),
            );
        }
    }

    /// Handles the active player picking an option
    ///
    /// The pick is ignored once the round has been revealed, while the
    /// countdown is not running, or when `index` is not an option.
    pub fn receive_answer<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        index: usize,
        schedule_message: S,
        tunnel: &T,
    ) {
        if self.state != State::Playing || self.round.revealed || !self.timer.is_running() {
            debug!(session = %self.session, index, "answer ignored");
            return;
        }
        if index >= self.current().options.len() {
            debug!(session = %self.session, index, "answer out of range");
            return;
        }

        let remaining = self.timer.remaining();
        self.timer.stop();

        let question = self.current();
        let correct = question.is_correct(index);
        let points_awarded = if correct {
            self.options
                .scoring
                .points(question.base_points, remaining, question.difficulty)
        } else {
            0
        };

        let player = &mut self.players[self.current_player];
        player.score = player.score.saturating_add(points_awarded);
        self.round = Round {
            revealed: true,
            selected: Some(index),
            points_awarded,
        };

        debug!(
            session = %self.session,
            round = self.current_question,
            index,
            correct,
            points_awarded,
            "answer received"
        );

        self.reveal(
            if correct { Cue::Correct } else { Cue::Wrong },
            schedule_message,
            tunnel,
        );
    }

    fn expire<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        schedule_message: S,
        tunnel: &T,
    ) {
        if self.round.revealed {
            return;
        }

        self.timer.stop();
        self.round = Round {
            revealed: true,
            selected: None,
            points_awarded: 0,
        };

        debug!(session = %self.session, round = self.current_question, "time ran out");

        self.reveal(Cue::Wrong, schedule_message, tunnel);
    }

    fn reveal<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &self,
        cue: Cue,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        tunnel.send_message(&UpdateMessage::Cue(cue).into());
        tunnel.send_message(
            &UpdateMessage::AnswerReveal {
                selected: self.round.selected,
                correct_answer: self.current().correct_answer,
                correct: cue == Cue::Correct,
                points_awarded: self.round.points_awarded,
                players: self.players.clone(),
            }
            .into(),
        );

        schedule_message(
            AlarmMessage::Advance {
                session: self.session,
                round: self.current_question,
            }
            .into(),
            self.options.advance_delay,
        );
    }

    fn rotate_player(&mut self) {
        self.players[self.current_player].is_active = false;
        self.current_player = (self.current_player + 1) % self.players.len();
        self.players[self.current_player].is_active = true;
    }

    fn advance<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        schedule_message: S,
        tunnel: &T,
    ) {
        self.current_question += 1;
        self.rotate_player();

        if self.current_question >= self.questions.len() {
            self.state = State::Finished;
            self.timer.reset();
            for player in &mut self.players {
                player.is_active = false;
            }

            info!(
                session = %self.session,
                scores = ?self.players.iter().map(|p| (p.name.as_str(), p.score)).collect_vec(),
                "session finished"
            );

            tunnel.send_message(&UpdateMessage::GameOver(self.players.clone()).into());
        } else {
            self.start_round(schedule_message, tunnel);
        }
    }

    fn is_live(&self, session: SessionId, round: usize) -> bool {
        self.state == State::Playing && session == self.session && round == self.current_question
    }

    /// Handles an alarm that was scheduled earlier
    ///
    /// Alarms from another session or another round are dropped.
    pub fn receive_alarm<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        match message {
            AlarmMessage::Tick { session, round } if self.is_live(session, round) => {
                match self.timer.tick() {
                    TickOutcome::Halted => (),
                    TickOutcome::Running(remaining) => {
                        tunnel.send_message(&UpdateMessage::TimerTick(remaining).into());
                        schedule_message(
                            message.into(),
                            Duration::from_secs(constants::game::TICK_INTERVAL),
                        );
                    }
                    TickOutcome::Expired => {
                        tunnel.send_message(&UpdateMessage::TimerTick(0).into());
                        self.expire(schedule_message, tunnel);
                    }
                }
            }
            AlarmMessage::Advance { session, round }
                if self.is_live(session, round) && self.round.revealed =>
            {
                self.advance(schedule_message, tunnel);
            }
            _ => {
                debug!(session = %self.session, ?message, "stale alarm ignored");
            }
        }
    }

    /// Snapshot of the session for a view that (re)attaches
    pub fn state_message(&self) -> crate::SyncMessage {
        match self.state {
            State::Finished => SyncMessage::Finished(self.players.clone()),
            State::Playing if self.round.revealed => SyncMessage::Reveal {
                index: self.current_question,
                count: self.questions.len(),
                question: self.current().into(),
                players: self.players.clone(),
                selected: self.round.selected,
                correct_answer: self.current().correct_answer,
                points_awarded: self.round.points_awarded,
            },
            State::Playing => SyncMessage::Question {
                index: self.current_question,
                count: self.questions.len(),
                question: self.current().into(),
                players: self.players.clone(),
                remaining: self.timer.remaining(),
                time_limit: self.timer.duration(),
            },
        }
        .into()
    }

    /// Token of this session
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Whether rounds remain
    pub fn state(&self) -> State {
        self.state
    }

    /// Players in turn order with their current scores
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The questions of this session in play order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The player whose turn it is
    pub fn active_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Index of the current question
    pub fn question_index(&self) -> usize {
        self.current_question
    }

    /// The question being asked, `None` once the session is over
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            State::Playing => Some(self.current()),
            State::Finished => None,
        }
    }

    /// Answer state of the current round
    pub fn round(&self) -> Round {
        self.round
    }

    /// The countdown of the current round
    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    /// Options the session was created with
    pub fn options(&self) -> &Options {
        &self.options
    }
}
