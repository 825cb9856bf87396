//! Events the core hands to its collaborators.

use crate::state::ConnectionState;

/// Something the user should see, or a frontend should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Free-form status line.
    Status(String),
    /// Message to the room we are in. Also used to echo our own messages.
    RoomMessage { nick: String, text: String },
    /// Message addressed to our nick.
    PrivateMessage { nick: String, text: String },
    /// Private message we sent.
    PrivateSent { target: String, text: String },
    /// CTCP ACTION.
    Emote { nick: String, text: String },
    /// Sorted roster snapshot.
    Roster(Vec<String>),
    /// Lifecycle change.
    Connection(ConnectionState),
    /// We joined a room.
    Joined { room: String },
    /// Someone else joined our room.
    UserJoined { nick: String },
    /// Someone left our room or quit.
    UserLeft { nick: String, reason: Option<String> },
    /// A nick change we saw, ours or someone else's.
    Renamed { old: String, new: String, own: bool },
    /// Room topic changed.
    Topic { topic: String },
    /// End of MOTD: the server is ready for us.
    Ready,
    /// Raw traffic, `<-` inbound and `->` outbound.
    Debug(String),
}

impl Event {
    pub fn status(text: impl Into<String>) -> Self {
        Self::Status(text.into())
    }

    /// Whether the status bar (nick, server, room, topic) may have changed.
    pub fn touches_status_bar(&self) -> bool {
        matches!(
            self,
            Self::Connection(_)
                | Self::Joined { .. }
                | Self::Renamed { own: true, .. }
                | Self::Topic { .. }
                | Self::Ready
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_relevance() {
        assert!(Event::Ready.touches_status_bar());
        assert!(Event::Connection(ConnectionState::Connected).touches_status_bar());
        assert!(
            !Event::Renamed {
                old: "a".into(),
                new: "b".into(),
                own: false
            }
            .touches_status_bar()
        );
        assert!(!Event::status("hi").touches_status_bar());
    }
}
