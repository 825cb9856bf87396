//! Per-process session state.
//!
//! Fields are private so that every transition goes through a method that
//! keeps these rules intact:
//!
//! - a room is set exactly when the state is [`ConnectionState::Joined`]
//! - a non-empty roster implies `Joined`
//! - `Disconnected` means no endpoint, no room and an empty roster

use crate::config::IdentityConfig;
use crate::error::SessionError;
use crate::state::Roster;
use slirc_proto::irc_eq;
use std::fmt;

/// Who we are on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub nick: String,
    pub user: String,
    pub realname: String,
    pub hostname: String,
}

impl From<&IdentityConfig> for Identity {
    fn from(config: &IdentityConfig) -> Self {
        Self {
            nick: config.nick.clone(),
            user: config.user.clone(),
            realname: config.realname.clone(),
            hostname: config.hostname.clone(),
        }
    }
}

/// Server address of the current connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    /// Socket open, login not yet sent.
    Connecting,
    /// Logged in, not in a room.
    Connected,
    /// In a room.
    Joined,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Joined => "joined",
        })
    }
}

/// Everything the client knows about its one server connection.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    endpoint: Option<Endpoint>,
    room: Option<String>,
    topic: String,
    roster: Roster,
    /// NAMES entries collected from 353 replies until 366 arrives.
    pending_names: Option<Roster>,
    state: ConnectionState,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            endpoint: None,
            room: None,
            topic: String::new(),
            roster: Roster::new(),
            pending_names: None,
            state: ConnectionState::Disconnected,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn nick(&self) -> &str {
        &self.identity.nick
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Logged in, whether or not in a room.
    pub fn is_connected(&self) -> bool {
        matches!(
            self.state,
            ConnectionState::Connected | ConnectionState::Joined
        )
    }

    pub fn is_joined(&self) -> bool {
        self.state == ConnectionState::Joined
    }

    pub fn is_own_nick(&self, nick: &str) -> bool {
        irc_eq(&self.identity.nick, nick)
    }

    pub fn is_room(&self, name: &str) -> bool {
        self.room.as_deref().is_some_and(|room| irc_eq(room, name))
    }

    // ------------------------------------------------------------------
    // Lifecycle transitions
    // ------------------------------------------------------------------

    /// Disconnected → Connecting.
    pub fn begin_connect(&mut self, endpoint: Endpoint) -> Result<(), SessionError> {
        if self.state != ConnectionState::Disconnected {
            return Err(SessionError::AlreadyConnected);
        }
        self.endpoint = Some(endpoint);
        self.state = ConnectionState::Connecting;
        Ok(())
    }

    /// Connecting → Connected, once the login lines are written.
    pub fn mark_connected(&mut self) {
        if self.state == ConnectionState::Connecting {
            self.state = ConnectionState::Connected;
        }
    }

    /// Connected → Joined.
    pub fn enter_room(&mut self, room: &str) -> Result<(), SessionError> {
        match self.state {
            ConnectionState::Connected => {
                self.room = Some(room.to_string());
                self.topic.clear();
                self.roster.clear();
                self.pending_names = None;
                self.state = ConnectionState::Joined;
                Ok(())
            }
            ConnectionState::Joined => Err(SessionError::AlreadyJoined(
                self.room.clone().unwrap_or_default(),
            )),
            _ => Err(SessionError::NotConnected),
        }
    }

    /// Joined → Connected. Returns the room that was left.
    pub fn leave_room(&mut self) -> Result<String, SessionError> {
        if self.state != ConnectionState::Joined {
            return Err(SessionError::NotJoined);
        }
        self.state = ConnectionState::Connected;
        self.topic.clear();
        self.roster.clear();
        self.pending_names = None;
        Ok(self.room.take().unwrap_or_default())
    }

    /// Any state → Disconnected, dropping endpoint, room, topic and roster.
    pub fn reset(&mut self) {
        self.endpoint = None;
        self.room = None;
        self.topic.clear();
        self.roster.clear();
        self.pending_names = None;
        self.state = ConnectionState::Disconnected;
    }

    // ------------------------------------------------------------------
    // Server-driven updates
    // ------------------------------------------------------------------

    /// Change our nickname. Called on server acknowledgment, or directly
    /// while disconnected.
    pub fn set_nick(&mut self, nick: &str) {
        self.identity.nick = nick.to_string();
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    /// The roster, writable only while in a room.
    pub fn roster_mut(&mut self) -> Option<&mut Roster> {
        if self.is_joined() {
            Some(&mut self.roster)
        } else {
            None
        }
    }

    /// Collect entries from one RPL_NAMREPLY.
    pub fn accumulate_names<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !self.is_joined() {
            return;
        }
        let pending = self.pending_names.get_or_insert_with(Roster::new);
        for entry in entries {
            pending.add(super::strip_mode_prefix(entry));
        }
    }

    /// Swap in the names collected since the last RPL_ENDOFNAMES.
    /// Returns `false` when not in a room.
    pub fn finish_names(&mut self) -> bool {
        if !self.is_joined() {
            return false;
        }
        self.roster = self.pending_names.take().unwrap_or_default();
        true
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.room.is_some(), self.is_joined(), "room iff joined");
        if !self.roster.is_empty() {
            assert!(self.is_joined(), "roster only while joined");
        }
        if self.state == ConnectionState::Disconnected {
            assert!(self.endpoint.is_none());
            assert!(self.roster.is_empty());
        }
    }
}
