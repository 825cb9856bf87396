//! Outbound IRC command types.
//!
//! Every variant has a checked constructor that refuses empty required
//! fields and values that would break the line framing. Build commands
//! through those constructors; the variants are public for matching.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol

use crate::ctcp::Ctcp;
use crate::error::EncodeError;

use super::util::{optional_text, text, token};

/// An IRC command the client sends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// `USER username hostname servername :realname`
    USER(String, String, String, String),
    /// `NICK nickname`
    NICK(String),
    /// `JOIN channel`
    JOIN(String),
    /// `PART channel`
    PART(String),
    /// `NAMES channel`
    NAMES(String),
    /// `PRIVMSG target :text`
    PRIVMSG(String, String),
    /// `NOTICE target :text`
    NOTICE(String, String),
    /// `PONG token`
    PONG(String),
    /// `QUIT :reason`
    QUIT(String),
}

impl Command {
    /// The registration pair sent right after the socket opens:
    /// `USER` followed by `NICK`.
    pub fn login(
        nickname: &str,
        username: &str,
        hostname: &str,
        servername: &str,
        realname: &str,
    ) -> Result<[Command; 2], EncodeError> {
        Ok([
            Self::user(username, hostname, servername, realname)?,
            Self::nick(nickname)?,
        ])
    }

    /// `USER` registration line.
    pub fn user(
        username: &str,
        hostname: &str,
        servername: &str,
        realname: &str,
    ) -> Result<Self, EncodeError> {
        Ok(Self::USER(
            token("username", username)?,
            token("hostname", hostname)?,
            token("servername", servername)?,
            text("realname", realname)?,
        ))
    }

    /// Request a nickname.
    pub fn nick(nickname: &str) -> Result<Self, EncodeError> {
        Ok(Self::NICK(token("nickname", nickname)?))
    }

    /// Join a room.
    pub fn join(room: &str) -> Result<Self, EncodeError> {
        Ok(Self::JOIN(token("room", room)?))
    }

    /// Leave a room.
    pub fn part(room: &str) -> Result<Self, EncodeError> {
        Ok(Self::PART(token("room", room)?))
    }

    /// Ask for the member list of a room.
    pub fn names(room: &str) -> Result<Self, EncodeError> {
        Ok(Self::NAMES(token("room", room)?))
    }

    /// Message a room or a nickname.
    pub fn privmsg(target: &str, message: &str) -> Result<Self, EncodeError> {
        Ok(Self::PRIVMSG(
            token("target", target)?,
            text("text", message)?,
        ))
    }

    /// Send a notice to a room or a nickname.
    pub fn notice(target: &str, message: &str) -> Result<Self, EncodeError> {
        Ok(Self::NOTICE(token("target", target)?, text("text", message)?))
    }

    /// Answer a CTCP request; replies travel as NOTICE.
    pub fn ctcp_reply(target: &str, reply: &Ctcp<'_>) -> Result<Self, EncodeError> {
        Self::notice(target, &reply.to_string())
    }

    /// Answer a server PING with its token.
    pub fn pong(ping_token: &str) -> Result<Self, EncodeError> {
        Ok(Self::PONG(text("token", ping_token)?))
    }

    /// Leave the server. The reason may be empty.
    pub fn quit(reason: &str) -> Result<Self, EncodeError> {
        Ok(Self::QUIT(optional_text("reason", reason)?))
    }

    /// The command verb.
    pub fn name(&self) -> &'static str {
        match self {
            Self::USER(..) => "USER",
            Self::NICK(_) => "NICK",
            Self::JOIN(_) => "JOIN",
            Self::PART(_) => "PART",
            Self::NAMES(_) => "NAMES",
            Self::PRIVMSG(..) => "PRIVMSG",
            Self::NOTICE(..) => "NOTICE",
            Self::PONG(_) => "PONG",
            Self::QUIT(_) => "QUIT",
        }
    }
}
