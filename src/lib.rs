//! # Quiz Challenge
//!
//! Game logic for a local, hot-seat trivia quiz. Two to six players share
//! one screen and take turns answering timed multiple-choice questions.
//! Correct answers earn points plus a bonus for the time left on the
//! clock, and a ranking is shown once the questions run out.
//!
//! The crate draws nothing and never sleeps. A host forwards user input
//! to [`app::App`], delivers the alarms it asks for (for example through
//! [`scheduler::Scheduler`]), and renders what arrives through its
//! [`session::Tunnel`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]
use serde::{Deserialize, Serialize};

pub mod constants;

pub mod app;
pub mod bank;
pub mod game;
pub mod leaderboard;
pub mod names;
pub mod player;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod setup;
pub mod timer;

/// Snapshots sent so a view can redraw from scratch
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum SyncMessage {
    /// Setup, loading and results screens
    App(app::SyncMessage),
    /// A session in progress
    Game(game::SyncMessage),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Incremental changes sent to the view
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum UpdateMessage {
    /// Screen flow updates
    App(app::UpdateMessage),
    /// Round updates
    Game(game::UpdateMessage),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Alarms the host delivers back after the requested delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Screen flow alarms
    App(app::AlarmMessage),
    /// Round alarms
    Game(game::AlarmMessage),
}
