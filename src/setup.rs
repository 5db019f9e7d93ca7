//! Player registration before a session
//!
//! The roster is a short list of editable slots. A slot becomes a player
//! only if it has a name when the game starts; blank slots are dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    constants::players::{AVATARS, MAX_PLAYER_COUNT, MIN_PLAYER_COUNT},
    names::{self, Names},
    player::{Id, Player},
};

/// Reasons a start attempt is rejected
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer named slots than the minimum
    #[error("at least 2 players are needed, {0} given")]
    NotEnoughPlayers(usize),
    /// More named slots than the maximum
    #[error("at most 6 players can play, {0} given")]
    TooManyPlayers(usize),
    /// Two slots carry the same name, ignoring case
    #[error("name {0:?} is used more than once")]
    DuplicateName(String),
    /// A name failed validation
    #[error(transparent)]
    Name(#[from] names::Error),
}

/// An editable entry on the setup screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Identifier the player keeps once the game starts
    pub id: Id,
    /// Name as typed, possibly blank
    pub name: String,
    /// Chosen avatar
    pub avatar: String,
}

impl Slot {
    fn blank(avatar: &str) -> Self {
        Self {
            id: Id::new(),
            name: String::new(),
            avatar: avatar.to_owned(),
        }
    }

    /// Whether the slot has no name once whitespace is ignored
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// The list of slots shown on the setup screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    slots: Vec<Slot>,
}

impl Default for Roster {
    /// Two blank slots with the first two avatars
    fn default() -> Self {
        Self {
            slots: AVATARS
                .iter()
                .take(MIN_PLAYER_COUNT)
                .map(|avatar| Slot::blank(avatar))
                .collect(),
        }
    }
}

impl Roster {
    /// The slots in display order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn slot_mut(&mut self, id: Id) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }

    /// Appends a blank slot, returning its id, unless the roster is full
    pub fn add_slot(&mut self) -> Option<Id> {
        if self.slots.len() >= MAX_PLAYER_COUNT {
            return None;
        }

        let slot = Slot::blank(AVATARS[self.slots.len() % AVATARS.len()]);
        let id = slot.id;
        self.slots.push(slot);
        Some(id)
    }

    /// Removes a slot while more than the minimum remain
    ///
    /// Returns whether a slot was removed.
    pub fn remove_slot(&mut self, id: Id) -> bool {
        if self.slots.len() <= MIN_PLAYER_COUNT {
            return false;
        }

        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    /// Replaces the name typed into a slot, cutting it to the length limit
    ///
    /// Returns whether the slot exists.
    pub fn set_name(&mut self, id: Id, name: &str) -> bool {
        self.slot_mut(id)
            .map(|slot| slot.name = names::truncate(name))
            .is_some()
    }

    /// Picks one of the offered avatars for a slot
    ///
    /// Returns whether the slot exists and the avatar is on offer.
    pub fn set_avatar(&mut self, id: Id, avatar: &str) -> bool {
        if !AVATARS.contains(&avatar) {
            return false;
        }
        self.slot_mut(id)
            .map(|slot| avatar.clone_into(&mut slot.avatar))
            .is_some()
    }

    /// Number of slots that currently carry a name
    pub fn named_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_blank()).count()
    }

    /// Whether enough slots are named to start
    pub fn can_start(&self) -> bool {
        self.named_count() >= MIN_PLAYER_COUNT
    }

    /// Turns the named slots into players
    ///
    /// Blank slots are skipped. Names are trimmed. The first player is the
    /// active one and every score starts at zero.
    ///
    /// # Errors
    ///
    /// * `Error::NotEnoughPlayers` - fewer than two named slots
    /// * `Error::TooManyPlayers` - more than six named slots
    /// * `Error::DuplicateName` - two names match ignoring case
    /// * `Error::Name` - a name is otherwise invalid
    pub fn start(&self) -> Result<Vec<Player>, Error> {
        let named = self
            .slots
            .iter()
            .filter(|slot| !slot.is_blank())
            .collect::<Vec<_>>();

        let result = Self::build_players(&named);
        if let Err(error) = &result {
            warn!(%error, named = named.len(), "rejected start attempt");
        }
        result
    }

    fn build_players(named: &[&Slot]) -> Result<Vec<Player>, Error> {
        if named.len() < MIN_PLAYER_COUNT {
            return Err(Error::NotEnoughPlayers(named.len()));
        }
        if named.len() > MAX_PLAYER_COUNT {
            return Err(Error::TooManyPlayers(named.len()));
        }

        let mut names = Names::default();
        let mut players = Vec::with_capacity(named.len());
        for (index, slot) in named.iter().enumerate() {
            let name = names.claim(&slot.name).map_err(|error| match error {
                names::Error::Used => Error::DuplicateName(slot.name.trim().to_owned()),
                other => Error::Name(other),
            })?;
            let mut player = Player::new(slot.id, name, slot.avatar.clone());
            player.is_active = index == 0;
            players.push(player);
        }
        Ok(players)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn roster_with(names: &[&str]) -> Roster {
        let mut roster = Roster::default();
        while roster.slots().len() < names.len() {
            roster.add_slot();
        }
        let ids = roster.slots().iter().map(|slot| slot.id).collect::<Vec<_>>();
        for (id, name) in ids.into_iter().zip(names) {
            roster.set_name(id, name);
        }
        roster
    }

    #[test]
    fn test_default_has_two_blank_slots() {
        let roster = Roster::default();
        assert_eq!(roster.slots().len(), 2);
        assert!(roster.slots().iter().all(Slot::is_blank));
        assert_eq!(roster.slots()[0].avatar, AVATARS[0]);
        assert_eq!(roster.slots()[1].avatar, AVATARS[1]);
        assert!(!roster.can_start());
    }

    #[test]
    fn test_add_slot_caps_at_six_and_cycles_avatars() {
        let mut roster = Roster::default();
        for expected in 2..MAX_PLAYER_COUNT {
            let id = roster.add_slot().unwrap();
            let slot = roster.slots().iter().find(|slot| slot.id == id).unwrap();
            assert_eq!(slot.avatar, AVATARS[expected]);
        }
        assert_eq!(roster.slots().len(), MAX_PLAYER_COUNT);
        assert_eq!(roster.add_slot(), None);
    }

    #[test]
    fn test_remove_slot_keeps_minimum() {
        let mut roster = Roster::default();
        let first = roster.slots()[0].id;
        assert!(!roster.remove_slot(first));

        let extra = roster.add_slot().unwrap();
        assert!(!roster.remove_slot(Id::new()));
        assert!(roster.remove_slot(extra));
        assert_eq!(roster.slots().len(), 2);
    }

    #[test]
    fn test_set_name_truncates() {
        let mut roster = Roster::default();
        let id = roster.slots()[0].id;
        assert!(roster.set_name(id, &"a".repeat(30)));
        assert_eq!(roster.slots()[0].name.chars().count(), 20);
        assert!(!roster.set_name(Id::new(), "Ana"));
    }

    #[test]
    fn test_set_avatar_only_offered() {
        let mut roster = Roster::default();
        let id = roster.slots()[0].id;
        assert!(roster.set_avatar(id, AVATARS[5]));
        assert_eq!(roster.slots()[0].avatar, AVATARS[5]);
        assert!(!roster.set_avatar(id, "🐙"));
        assert_eq!(roster.slots()[0].avatar, AVATARS[5]);
    }

    #[test]
    fn test_start_produces_fresh_players() {
        let roster = roster_with(&["  Ana ", "Bruno", "Carla"]);
        let players = roster.start().unwrap();

        assert_eq!(
            players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            ["Ana", "Bruno", "Carla"]
        );
        assert!(players.iter().all(|p| p.score == 0));
        assert_eq!(players.iter().filter(|p| p.is_active).count(), 1);
        assert!(players[0].is_active);
        assert_eq!(players[0].id, roster.slots()[0].id);
    }

    #[test]
    fn test_start_skips_blank_slots() {
        let roster = roster_with(&["Ana", "   ", "Bruno"]);
        let players = roster.start().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].name, "Bruno");
    }

    #[test]
    fn test_start_needs_two_names() {
        let roster = roster_with(&["Ana", ""]);
        assert_eq!(roster.start(), Err(Error::NotEnoughPlayers(1)));
        assert_eq!(Roster::default().start(), Err(Error::NotEnoughPlayers(0)));
    }

    #[test]
    fn test_start_rejects_duplicates_ignoring_case() {
        let roster = roster_with(&["Ana", "ana "]);
        assert_eq!(roster.start(), Err(Error::DuplicateName("ana".to_owned())));
    }

    #[test]
    fn test_every_valid_roster_starts() {
        let all = ["Ana", "Bruno", "Carla", "Davi", "Elisa", "Fábio"];
        for count in MIN_PLAYER_COUNT..=MAX_PLAYER_COUNT {
            let players = roster_with(&all[..count]).start().unwrap();
            assert_eq!(players.len(), count);
            assert_eq!(players.iter().filter(|p| p.is_active).count(), 1);
            assert!(players.iter().all(|p| p.score == 0));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::NotEnoughPlayers(1).to_string(),
            "at least 2 players are needed, 1 given"
        );
        assert_eq!(
            Error::DuplicateName("Ana".to_owned()).to_string(),
            "name \"Ana\" is used more than once"
        );
        assert_eq!(
            Error::Name(names::Error::TooLong).to_string(),
            "name is too long"
        );
    }
}
