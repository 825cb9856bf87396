//! Nicknames present in the joined room.

use slirc_proto::irc_to_lower;
use std::collections::BTreeMap;

/// Channel membership prefixes a server may put in front of a nick in NAMES.
const MODE_PREFIXES: &[char] = &['~', '&', '@', '%', '+'];

/// Strip membership prefixes (`@op`, `+voice`, ...) from a NAMES entry.
pub fn strip_mode_prefix(entry: &str) -> &str {
    entry.trim_start_matches(MODE_PREFIXES)
}

/// Sorted, duplicate-free set of nicknames.
///
/// Nicks are keyed by their RFC 1459 casefolded form, so `Alice` and `alice`
/// are the same member. The spelling last seen is the one displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: BTreeMap<String, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a nick. Returns `false` if it was already present.
    pub fn add(&mut self, nick: &str) -> bool {
        if nick.is_empty() {
            return false;
        }
        self.members
            .insert(irc_to_lower(nick), nick.to_string())
            .is_none()
    }

    /// Remove a nick. Returns `false` if it was not present.
    pub fn remove(&mut self, nick: &str) -> bool {
        self.members.remove(&irc_to_lower(nick)).is_some()
    }

    /// Replace `old` with `new`. Returns whether `old` was present.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let was_present = self.remove(old);
        self.add(new);
        was_present
    }

    /// Replace the whole membership.
    pub fn replace<I, S>(&mut self, nicks: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.members.clear();
        for nick in nicks {
            self.add(nick.as_ref());
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn contains(&self, nick: &str) -> bool {
        self.members.contains_key(&irc_to_lower(nick))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Nicks in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.values().map(String::as_str)
    }

    /// Owned sorted copy for collaborators.
    pub fn snapshot(&self) -> Vec<String> {
        self.members.values().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut roster = Roster::new();
        roster.replace(iter);
        roster
    }
}
