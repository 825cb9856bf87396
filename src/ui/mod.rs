//! Frontends: where events end up.
//!
//! The core only talks to the [`Frontend`] trait. [`render`] maps each
//! [`Event`] onto the trait's capabilities.

mod headless;
mod terminal;

pub use headless::TracingFrontend;
pub use terminal::TerminalFrontend;

use crate::event::Event;
use crate::state::{ConnectionState, Session};
use std::fmt;

/// Display capabilities the client needs from a user interface.
pub trait Frontend {
    fn status_message(&mut self, text: &str);
    fn chat_message(&mut self, nick: &str, text: &str);
    fn private_message(&mut self, nick: &str, text: &str);
    fn emote_message(&mut self, nick: &str, text: &str);
    fn roster_update(&mut self, nicks: &[String]);
    /// Raw traffic; shown only while debug output is on.
    fn debug_message(&mut self, text: &str);
    fn status_bar(&mut self, bar: &StatusBar);
    /// Flip debug output. Returns the new setting.
    fn toggle_debug(&mut self) -> bool;
}

/// Summary line: who we are, where, and in which room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    pub nick: String,
    pub server: Option<String>,
    pub room: Option<String>,
    pub topic: String,
    pub state: ConnectionState,
}

impl From<&Session> for StatusBar {
    fn from(session: &Session) -> Self {
        Self {
            nick: session.nick().to_string(),
            server: session.endpoint().map(ToString::to_string),
            room: session.room().map(str::to_string),
            topic: session.topic().to_string(),
            state: session.state(),
        }
    }
}

impl fmt::Display for StatusBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.nick)?;
        match &self.server {
            Some(server) => write!(f, " [{server}]")?,
            None => write!(f, " [{}]", self.state)?,
        }
        write!(f, " [{}]", self.room.as_deref().unwrap_or("~"))?;
        if !self.topic.is_empty() {
            write!(f, " {}", self.topic)?;
        }
        Ok(())
    }
}

/// Show one event.
pub fn render(frontend: &mut dyn Frontend, event: &Event, session: &Session) {
    match event {
        Event::Status(text) => frontend.status_message(text),
        Event::RoomMessage { nick, text } => frontend.chat_message(nick, text),
        Event::PrivateMessage { nick, text } => frontend.private_message(nick, text),
        Event::PrivateSent { target, text } => {
            frontend.chat_message(session.nick(), &format!("[{target}] {text}"))
        }
        Event::Emote { nick, text } => frontend.emote_message(nick, text),
        Event::Roster(nicks) => frontend.roster_update(nicks),
        Event::Connection(_) => {}
        Event::Joined { room } => frontend.status_message(&format!("joined channel {room}")),
        Event::UserJoined { nick } => {
            frontend.status_message(&format!("{nick} joined the channel"))
        }
        Event::UserLeft { nick, reason } => match reason {
            Some(reason) if !reason.is_empty() => {
                frontend.status_message(&format!("{nick} left the channel ({reason})"))
            }
            _ => frontend.status_message(&format!("{nick} left the channel")),
        },
        Event::Renamed { old, new, .. } => {
            frontend.status_message(&format!("{old} is now known as {new}"))
        }
        Event::Topic { topic } => frontend.status_message(&format!("topic: {topic}")),
        Event::Ready => frontend.status_message("MOTD received, ready for action"),
        Event::Debug(text) => frontend.debug_message(text),
    }

    if event.touches_status_bar() {
        frontend.status_bar(&StatusBar::from(session));
    }
}
