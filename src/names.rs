//! Player name validation
//!
//! Names are trimmed before they are checked. Two names that differ only
//! by letter case count as the same name.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::constants::players::MAX_NAME_LENGTH;

/// Errors that can occur during name validation
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested name is already in use by another player
    #[error("name already in-use")]
    Used,
    /// The name is empty or contains only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
}

/// Cuts `name` down to the maximum name length, counted in characters
pub fn truncate(name: &str) -> String {
    name.chars().take(MAX_NAME_LENGTH).collect()
}

/// Checks a single name on its own and returns its trimmed form
///
/// # Errors
///
/// * `Error::Empty` - name is empty after trimming whitespace
/// * `Error::TooLong` - name has more characters than allowed
pub fn clean(name: &str) -> Result<&str, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Empty);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::TooLong);
    }
    Ok(name)
}

/// The set of names already claimed in a session
#[derive(Debug, Default, Clone)]
pub struct Names {
    existing: HashSet<String>,
}

impl Names {
    /// Claims a name after validating it
    ///
    /// Returns the trimmed name that was claimed.
    ///
    /// # Errors
    ///
    /// * `Error::Empty` - name is empty after trimming whitespace
    /// * `Error::TooLong` - name has more characters than allowed
    /// * `Error::Used` - the same name, ignoring case, was already claimed
    pub fn claim(&mut self, name: &str) -> Result<String, Error> {
        let name = clean(name)?;
        if !self.existing.insert(name.to_lowercase()) {
            return Err(Error::Used);
        }
        Ok(name.to_owned())
    }

    /// Whether a name, ignoring case and surrounding whitespace, is taken
    pub fn contains(&self, name: &str) -> bool {
        self.existing.contains(&name.trim().to_lowercase())
    }

    /// Number of claimed names
    pub fn len(&self) -> usize {
        self.existing.len()
    }

    /// Whether no name has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.existing.is_empty()
    }
}
