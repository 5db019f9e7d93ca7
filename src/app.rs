//! Screen flow
//!
//! [`App`] is the single owner of everything on screen: the setup roster,
//! the session in progress and the final results. Views talk to it through
//! [`IncomingMessage`]s and hear back through a [`Tunnel`].
//!
//! Every start and every restart issues a new [`SessionId`]. Alarms still
//! queued for an older session are dropped when they arrive.

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, info, warn};
use web_time::Duration;

use crate::{
    bank::QuestionBank,
    constants,
    game::{self, Game, SessionId, State},
    leaderboard::Results,
    player::{Id, Player},
    session::Tunnel,
    setup::{self, Roster},
};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Players are being registered
    Setup,
    /// Transition screen before the first round
    Loading,
    /// Rounds are being played
    Playing,
    /// Final ranking
    Results,
}

fn validate_loading_screen(val: &Option<Duration>) -> garde::Result {
    match val {
        Some(duration) if duration.as_secs() > constants::game::MAX_LOADING_SCREEN => {
            Err(garde::Error::new(format!(
                "loading_screen cannot exceed {} seconds",
                constants::game::MAX_LOADING_SCREEN
            )))
        }
        _ => Ok(()),
    }
}

/// Configuration of the whole application
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Options {
    /// Options for every session
    #[garde(dive)]
    #[serde(default)]
    pub game: game::Options,
    /// Length of the transition screen, `None` to go straight to the first round
    #[garde(custom(|v, _| validate_loading_screen(v)))]
    #[serde_as(as = "Option<serde_with::DurationMilliSeconds<u64>>")]
    #[serde(default)]
    pub loading_screen: Option<Duration>,
}

/// Messages the view sends in response to user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomingMessage {
    /// Add a blank slot to the roster
    AddPlayer,
    /// Remove a slot from the roster
    RemovePlayer(Id),
    /// Change the name typed into a slot
    SetName {
        /// Slot to edit
        id: Id,
        /// New name
        name: String,
    },
    /// Change the avatar of a slot
    SetAvatar {
        /// Slot to edit
        id: Id,
        /// New avatar
        avatar: String,
    },
    /// Start a session with the named slots
    Start,
    /// The active player picks an option
    Answer(usize),
    /// Return to an empty setup screen
    Restart,
}

/// Update messages about screen changes
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// The roster changed
    Roster(Roster),
    /// A start attempt was rejected
    SetupError(setup::Error),
    /// A session could not be created
    SessionError(game::Error),
    /// The transition screen is showing
    Loading,
    /// The session finished
    Results(Results),
}

/// Full snapshot of screens other than a running session
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// The setup screen
    Setup {
        /// Current slots
        roster: Roster,
        /// Whether the start button is enabled
        can_start: bool,
    },
    /// The transition screen
    Loading,
    /// The results screen
    Results(Results),
}

/// Deferred work scheduled by the screen flow itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// The transition screen is over
    LoadingDone {
        /// Session that scheduled the alarm
        session: SessionId,
    },
}

/// What the host should do with its alarm queue after a message
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep delivering queued alarms
    Continue,
    /// Queued alarms all belong to a dead session and can be dropped
    FlushAlarms,
}

#[derive(Debug)]
enum Screen {
    Setup,
    Loading(Vec<Player>),
    Playing(Box<Game>),
    Results(Results),
}

/// The application state
#[derive(Debug)]
pub struct App {
    options: Options,
    bank: QuestionBank,
    rng: fastrand::Rng,
    session: SessionId,
    roster: Roster,
    screen: Screen,
}

impl Default for App {
    /// Default options, the built-in bank and an entropy-seeded generator
    fn default() -> Self {
        Self {
            options: Options::default(),
            bank: QuestionBank::builtin(),
            rng: fastrand::Rng::new(),
            session: SessionId::default(),
            roster: Roster::default(),
            screen: Screen::Setup,
        }
    }
}

impl App {
    /// Creates an application on the setup screen
    ///
    /// `rng` decides which questions are drawn and in what order; seed it
    /// to replay the same sessions.
    ///
    /// # Errors
    ///
    /// Returns the validation report if `options` are out of bounds.
    pub fn new(options: Options, bank: QuestionBank, rng: fastrand::Rng) -> Result<Self, garde::Report> {
        options.validate()?;
        Ok(Self {
            options,
            bank,
            rng,
            ..Self::default()
        })
    }

    /// Which screen is showing
    pub fn phase(&self) -> Phase {
        match self.screen {
            Screen::Setup => Phase::Setup,
            Screen::Loading(_) => Phase::Loading,
            Screen::Playing(_) => Phase::Playing,
            Screen::Results(_) => Phase::Results,
        }
    }

    /// Token of the current session
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The setup roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The running session, if any
    pub fn game(&self) -> Option<&Game> {
        match &self.screen {
            Screen::Playing(game) => Some(game.as_ref()),
            _ => None,
        }
    }

    /// Results of the last session, while the results screen shows
    pub fn results(&self) -> Option<&Results> {
        match &self.screen {
            Screen::Results(results) => Some(results),
            _ => None,
        }
    }

    /// Handles user input
    pub fn receive_message<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        message: IncomingMessage,
        schedule_message: S,
        tunnel: &T,
    ) -> Flow {
        match (message, self.phase()) {
            (IncomingMessage::Restart, _) => return self.restart(tunnel),
            (IncomingMessage::Answer(index), Phase::Playing) => {
                if let Screen::Playing(game) = &mut self.screen {
                    game.receive_answer(index, schedule_message, tunnel);
                    self.check_finished(tunnel);
                }
            }
            (IncomingMessage::Start, Phase::Setup) => match self.roster.start() {
                Ok(players) => self.start_game(players, schedule_message, tunnel),
                Err(error) => tunnel.send_message(&UpdateMessage::SetupError(error).into()),
            },
            (IncomingMessage::AddPlayer, Phase::Setup) => {
                if self.roster.add_slot().is_some() {
                    self.send_roster(tunnel);
                }
            }
            (IncomingMessage::RemovePlayer(id), Phase::Setup) => {
                if self.roster.remove_slot(id) {
                    self.send_roster(tunnel);
                }
            }
            (IncomingMessage::SetName { id, name }, Phase::Setup) => {
                if self.roster.set_name(id, &name) {
                    self.send_roster(tunnel);
                }
            }
            (IncomingMessage::SetAvatar { id, avatar }, Phase::Setup) => {
                if self.roster.set_avatar(id, &avatar) {
                    self.send_roster(tunnel);
                }
            }
            (message, phase) => {
                debug!(?message, ?phase, "message ignored on this screen");
            }
        }
        Flow::Continue
    }

    fn send_roster<T: Tunnel>(&self, tunnel: &T) {
        tunnel.send_message(&UpdateMessage::Roster(self.roster.clone()).into());
    }

    /// Leaves the setup screen with a validated list of players
    ///
    /// Shows the transition screen first when one is configured.
    pub fn start_game<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        players: Vec<Player>,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        self.session = self.session.next();

        match self.options.loading_screen {
            Some(duration) => {
                self.screen = Screen::Loading(players);
                tunnel.send_message(&UpdateMessage::Loading.into());
                schedule_message(
                    AlarmMessage::LoadingDone {
                        session: self.session,
                    }
                    .into(),
                    duration,
                );
            }
            None => self.begin_play(players, schedule_message, tunnel),
        }
    }

    fn begin_play<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        players: Vec<Player>,
        schedule_message: S,
        tunnel: &T,
    ) {
        let questions = self
            .bank
            .draw(self.options.game.question_count, &mut self.rng);

        match Game::new(players, questions, self.options.game, self.session) {
            Ok(game) => {
                let mut game = Box::new(game);
                game.play(schedule_message, tunnel);
                self.screen = Screen::Playing(game);
                self.check_finished(tunnel);
            }
            Err(error) => {
                warn!(%error, "session could not be created");
                self.screen = Screen::Setup;
                tunnel.send_message(&UpdateMessage::SessionError(error).into());
            }
        }
    }

    fn check_finished<T: Tunnel>(&mut self, tunnel: &T) {
        let Screen::Playing(game) = &self.screen else {
            return;
        };
        if game.state() != State::Finished {
            return;
        }

        let results =
            Results::with_question_count(game.players().to_vec(), game.questions().len());
        self.end_game(results, tunnel);
    }

    fn end_game<T: Tunnel>(&mut self, results: Results, tunnel: &T) {
        info!(
            session = %self.session,
            winner = results.winner().map(|player| player.name.as_str()),
            "showing results"
        );
        tunnel.send_message(&UpdateMessage::Results(results.clone()).into());
        self.screen = Screen::Results(results);
    }

    /// Returns to a fresh setup screen from anywhere
    ///
    /// The current session is abandoned. The returned [`Flow`] tells the
    /// host that its queued alarms can be dropped.
    pub fn restart<T: Tunnel>(&mut self, tunnel: &T) -> Flow {
        self.session = self.session.next();
        self.roster = Roster::default();
        self.screen = Screen::Setup;

        info!(session = %self.session, "restarted");

        tunnel.send_state(&self.state_message());
        Flow::FlushAlarms
    }

    /// Handles an alarm that was scheduled earlier
    pub fn receive_alarm<T: Tunnel, S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        message: crate::AlarmMessage,
        schedule_message: S,
        tunnel: &T,
    ) {
        match message {
            crate::AlarmMessage::Game(alarm) => {
                if let Screen::Playing(game) = &mut self.screen {
                    game.receive_alarm(alarm, schedule_message, tunnel);
                    self.check_finished(tunnel);
                    return;
                }
            }
            crate::AlarmMessage::App(AlarmMessage::LoadingDone { session }) => {
                if session == self.session && matches!(self.screen, Screen::Loading(_)) {
                    if let Screen::Loading(players) =
                        std::mem::replace(&mut self.screen, Screen::Setup)
                    {
                        self.begin_play(players, schedule_message, tunnel);
                    }
                    return;
                }
            }
        }

        debug!(?message, phase = ?self.phase(), "stale alarm ignored");
    }

    /// Snapshot of the current screen for a view that (re)attaches
    pub fn state_message(&self) -> crate::SyncMessage {
        match &self.screen {
            Screen::Setup => SyncMessage::Setup {
                roster: self.roster.clone(),
                can_start: self.roster.can_start(),
            }
            .into(),
            Screen::Loading(_) => SyncMessage::Loading.into(),
            Screen::Playing(game) => game.state_message(),
            Screen::Results(results) => SyncMessage::Results(results.clone()).into(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::bank::{Difficulty, Question};

    #[derive(Debug, Clone, Default)]
    struct MockTunnel {
        messages: Arc<Mutex<VecDeque<crate::UpdateMessage>>>,
        states: Arc<Mutex<VecDeque<crate::SyncMessage>>>,
    }

    impl MockTunnel {
        fn app_updates(&self) -> Vec<UpdateMessage> {
            self.messages
                .lock()
                .unwrap()
                .drain(..)
                .filter_map(|message| match message {
                    crate::UpdateMessage::App(update) => Some(update),
                    crate::UpdateMessage::Game(_) => None,
                })
                .collect()
        }
    }

    impl Tunnel for MockTunnel {
        fn send_message(&self, message: &crate::UpdateMessage) {
            self.messages.lock().unwrap().push_back(message.clone());
        }

        fn send_state(&self, state: &crate::SyncMessage) {
            self.states.lock().unwrap().push_back(state.clone());
        }
    }

    fn question(id: u32) -> Question {
        Question {
            id,
            text: format!("Pergunta {id}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: 0,
            category: "Geral".to_owned(),
            difficulty: Difficulty::Easy,
            base_points: 10,
        }
    }

    fn app(options: Options, question_count: usize) -> App {
        let bank = QuestionBank::new((1..=question_count as u32).map(question).collect()).unwrap();
        App::new(options, bank, fastrand::Rng::with_seed(3)).unwrap()
    }

    fn name_slots<S: FnMut(crate::AlarmMessage, Duration)>(
        app: &mut App,
        names: &[&str],
        mut schedule: S,
        tunnel: &MockTunnel,
    ) {
        while app.roster().slots().len() < names.len() {
            let _ = app.receive_message(IncomingMessage::AddPlayer, &mut schedule, tunnel);
        }
        let ids = app.roster().slots().iter().map(|slot| slot.id).collect::<Vec<_>>();
        for (id, name) in ids.into_iter().zip(names) {
            let _ = app.receive_message(
                IncomingMessage::SetName {
                    id,
                    name: (*name).to_owned(),
                },
                &mut schedule,
                tunnel,
            );
        }
    }

    #[test]
    fn test_starts_on_setup() {
        let app = App::default();
        assert_eq!(app.phase(), Phase::Setup);
        assert_eq!(app.roster().slots().len(), 2);
        assert!(app.game().is_none());
        assert!(matches!(
            app.state_message(),
            crate::SyncMessage::App(SyncMessage::Setup { can_start: false, .. })
        ));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = Options {
            loading_screen: Some(Duration::from_secs(60)),
            ..Options::default()
        };
        assert!(App::new(options, QuestionBank::builtin(), fastrand::Rng::new()).is_err());
    }

    #[test]
    fn test_rejected_start_reports_error() {
        let mut app = app(Options::default(), 3);
        let tunnel = MockTunnel::default();
        let mut alarms = Vec::new();
        let mut schedule =
            |message: crate::AlarmMessage, delay: Duration| alarms.push((message, delay));

        name_slots(&mut app, &["Ana"], &mut schedule, &tunnel);
        tunnel.app_updates();

        let flow = app.receive_message(IncomingMessage::Start, &mut schedule, &tunnel);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(app.phase(), Phase::Setup);
        let updates = tunnel.app_updates();
        assert!(matches!(
            updates.as_slice(),
            [UpdateMessage::SetupError(setup::Error::NotEnoughPlayers(1))]
        ));
        assert!(alarms.is_empty());
    }

    #[test]
    fn test_start_goes_straight_to_playing() {
        let mut app = app(Options::default(), 3);
        let tunnel = MockTunnel::default();
        let mut alarms = Vec::new();
        let mut schedule =
            |message: crate::AlarmMessage, delay: Duration| alarms.push((message, delay));

        name_slots(&mut app, &["Ana", "Bruno"], &mut schedule, &tunnel);
        let _ = app.receive_message(IncomingMessage::Start, &mut schedule, &tunnel);

        assert_eq!(app.phase(), Phase::Playing);
        let game = app.game().unwrap();
        assert_eq!(game.session(), app.session());
        assert_eq!(game.questions().len(), 3);
        assert_eq!(game.active_player().name, "Ana");
        assert_eq!(alarms.len(), 1);
    }

    #[test]
    fn test_setup_edits_ignored_while_playing() {
        let mut app = app(Options::default(), 3);
        let tunnel = MockTunnel::default();
        let mut schedule = |_: crate::AlarmMessage, _: Duration| {};

        name_slots(&mut app, &["Ana", "Bruno"], &mut schedule, &tunnel);
        let _ = app.receive_message(IncomingMessage::Start, &mut schedule, &tunnel);
        tunnel.app_updates();

        let _ = app.receive_message(IncomingMessage::AddPlayer, &mut schedule, &tunnel);
        let _ = app.receive_message(IncomingMessage::Start, &mut schedule, &tunnel);

        assert_eq!(app.roster().slots().len(), 2);
        assert!(tunnel.app_updates().is_empty());
        assert_eq!(app.phase(), Phase::Playing);
    }

    #[test]
    fn test_answer_ignored_outside_play() {
        let mut app = app(Options::default(), 3);
        let tunnel = MockTunnel::default();
        let _ = app.receive_message(IncomingMessage::Answer(0), |_, _| {}, &tunnel);
        assert_eq!(app.phase(), Phase::Setup);
        assert!(tunnel.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_loading_screen_then_play() {
        let options = Options {
            loading_screen: Some(Duration::from_secs(2)),
            ..Options::default()
        };
        let mut app = app(options, 3);
        let tunnel = MockTunnel::default();
        let mut alarms = Vec::new();

        name_slots(&mut app, &["Ana", "Bruno"], |message, delay| alarms.push((message, delay)), &tunnel);
        let _ = app.receive_message(
            IncomingMessage::Start,
            |message, delay| alarms.push((message, delay)),
            &tunnel,
        );

        assert_eq!(app.phase(), Phase::Loading);
        assert_eq!(
            alarms,
            vec![(
                crate::AlarmMessage::App(AlarmMessage::LoadingDone {
                    session: app.session()
                }),
                Duration::from_secs(2)
            )]
        );

        let (alarm, _) = alarms.remove(0);
        app.receive_alarm(alarm, |message, delay| alarms.push((message, delay)), &tunnel);

        assert_eq!(app.phase(), Phase::Playing);
        assert_eq!(alarms.len(), 1);
    }

    #[test]
    fn test_restart_abandons_session() {
        let mut app = app(Options::default(), 3);
        let tunnel = MockTunnel::default();
        let mut alarms = Vec::new();

        name_slots(&mut app, &["Ana", "Bruno"], |message, delay| alarms.push((message, delay)), &tunnel);
        let _ = app.receive_message(
            IncomingMessage::Start,
            |message, delay| alarms.push((message, delay)),
            &tunnel,
        );
        let old_session = app.session();

        let flow = app.receive_message(IncomingMessage::Restart, |_, _| {}, &tunnel);

        assert_eq!(flow, Flow::FlushAlarms);
        assert_eq!(app.phase(), Phase::Setup);
        assert_ne!(app.session(), old_session);
        assert!(app.roster().slots().iter().all(setup::Slot::is_blank));
        assert_eq!(tunnel.states.lock().unwrap().len(), 1);

        // A leftover tick from the abandoned session changes nothing
        for (alarm, _) in alarms.drain(..) {
            app.receive_alarm(alarm, |_, _| panic!("nothing should be scheduled"), &tunnel);
        }
        assert_eq!(app.phase(), Phase::Setup);
    }

    #[test]
    fn test_stale_loading_alarm_ignored() {
        let options = Options {
            loading_screen: Some(Duration::from_secs(2)),
            ..Options::default()
        };
        let mut app = app(options, 3);
        let tunnel = MockTunnel::default();
        let mut alarms = Vec::new();

        name_slots(&mut app, &["Ana", "Bruno"], |message, delay| alarms.push((message, delay)), &tunnel);
        let _ = app.receive_message(
            IncomingMessage::Start,
            |message, delay| alarms.push((message, delay)),
            &tunnel,
        );
        let _ = app.restart(&tunnel);
        name_slots(&mut app, &["Carla", "Davi"], |_, _| {}, &tunnel);
        let _ = app.receive_message(IncomingMessage::Start, |_, _| {}, &tunnel);
        assert_eq!(app.phase(), Phase::Loading);

        let (stale, _) = alarms.remove(0);
        app.receive_alarm(stale, |_, _| {}, &tunnel);
        assert_eq!(app.phase(), Phase::Loading);
    }

    #[test]
    fn test_full_session_reaches_results() {
        let mut app = app(Options::default(), 2);
        let tunnel = MockTunnel::default();
        let mut pending = Vec::new();

        name_slots(&mut app, &["Ana", "Bruno"], |_, _| {}, &tunnel);
        let _ = app.receive_message(
            IncomingMessage::Start,
            |message, delay| pending.push((message, delay)),
            &tunnel,
        );

        // Ana answers right, Bruno answers wrong
        for answer in [0, 1] {
            let _ = app.receive_message(
                IncomingMessage::Answer(answer),
                |message, delay| pending.push((message, delay)),
                &tunnel,
            );
            let advance = pending
                .iter()
                .rev()
                .find(|(message, _)| {
                    matches!(message, crate::AlarmMessage::Game(game::AlarmMessage::Advance { .. }))
                })
                .map(|(message, _)| *message)
                .unwrap();
            app.receive_alarm(advance, |message, delay| pending.push((message, delay)), &tunnel);
        }

        assert_eq!(app.phase(), Phase::Results);
        let results = app.results().unwrap();
        assert_eq!(results.winner().unwrap().name, "Ana");
        assert_eq!(results.stats().max_score, 16);
        assert_eq!(results.stats().question_count, 2);
        assert!(tunnel
            .app_updates()
            .iter()
            .any(|update| matches!(update, UpdateMessage::Results(_))));

        let _ = app.receive_message(IncomingMessage::Restart, |_, _| {}, &tunnel);
        assert_eq!(app.phase(), Phase::Setup);
    }

    #[test]
    fn test_incoming_message_json() {
        let id = Id::new();
        let message: IncomingMessage =
            serde_json::from_str(&format!(r#"{{"SetName":{{"id":"{id}","name":"Ana"}}}}"#)).unwrap();
        assert_eq!(
            message,
            IncomingMessage::SetName {
                id,
                name: "Ana".to_owned()
            }
        );
        let answer: IncomingMessage = serde_json::from_str(r#"{"Answer":2}"#).unwrap();
        assert_eq!(answer, IncomingMessage::Answer(2));
        let start: IncomingMessage = serde_json::from_str(r#""Start""#).unwrap();
        assert_eq!(start, IncomingMessage::Start);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: Options = serde_json::from_str(r#"{"loading_screen":2000}"#).unwrap();
        assert_eq!(options.loading_screen, Some(Duration::from_secs(2)));
        assert_eq!(options.game, game::Options::default());
    }
}
