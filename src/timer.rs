//! Per-question countdown
//!
//! The countdown is a plain value: it never spawns a thread or owns an
//! interval. The game schedules a tick alarm every second while the
//! countdown runs and calls [`Countdown::tick`] when the alarm fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Result of advancing the countdown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running, nothing changed
    Halted,
    /// One second elapsed, this many seconds remain
    Running(u64),
    /// The countdown just reached zero
    Expired,
}

/// A countdown measured in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Full duration in seconds
    duration: u64,
    /// Seconds left on the clock
    remaining: u64,
    /// Whether ticks currently decrement the clock
    running: bool,
    /// Set when the clock reached zero while running
    expired: bool,
}

impl Countdown {
    /// Creates a halted countdown showing the full duration
    pub fn new(duration: Duration) -> Self {
        let duration = duration.as_secs();
        Self {
            duration,
            remaining: duration,
            running: false,
            expired: false,
        }
    }

    /// Restores the full duration and begins counting down
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.expired = false;
        self.running = self.duration > 0;
        if self.duration == 0 {
            self.expired = true;
        }
    }

    /// Halts the countdown, keeping the displayed value
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restores the full duration in the halted state
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
        self.expired = false;
    }

    /// Advances the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Halted;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.running = false;
            self.expired = true;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    /// Seconds left on the clock
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Full duration in seconds
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Whether ticks currently decrement the clock
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the clock ran out since the last start or reset
    pub fn expired(&self) -> bool {
        self.expired
    }
}
