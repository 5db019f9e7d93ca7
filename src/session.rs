//! Presentation boundary
//!
//! The crate never draws, animates or plays sounds. Everything a view
//! needs is pushed through a [`Tunnel`], which the host implements on top
//! of whatever renders the game.

use super::{SyncMessage, UpdateMessage};

/// Trait for sending messages to the view
pub trait Tunnel {
    /// Sends an incremental update
    ///
    /// Updates describe a single change, such as a timer tick or a reveal.
    /// They include audio cues, which a view without sound may ignore.
    fn send_message(&self, message: &UpdateMessage);

    /// Sends a full snapshot of what the view should show
    ///
    /// Snapshots are used when a view attaches or needs to redraw from
    /// scratch.
    fn send_state(&self, state: &SyncMessage);
}
