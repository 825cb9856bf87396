//! Inbound message dispatch.
//!
//! [`dispatch`] is a sans-IO state machine step: it takes one parsed server
//! message, mutates the [`Session`] and returns what should happen next as a
//! list of [`Reaction`]s. Writing replies and rendering events is left to the
//! caller, so every rule here is testable without a socket.

mod channel;
mod messaging;
mod server;
mod user;

use crate::error::DispatchError;
use crate::event::Event;
use crate::state::Session;
use slirc_proto::{Command, Message, Response};

/// Name and version announced in CTCP VERSION replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl ClientInfo {
    pub const fn current() -> Self {
        Self {
            name: "slirc",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Output of one dispatch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// A line to send to the server.
    Reply(Command),
    /// An event for the frontend.
    Notify(Event),
}

impl Reaction {
    fn roster(session: &Session) -> Self {
        Self::Notify(Event::Roster(session.roster().snapshot()))
    }
}

/// Apply one server message to the session.
///
/// Unknown commands and messages for rooms we are not in produce no
/// reactions. Messages of a known command with the wrong shape are errors;
/// the session is left untouched in that case.
pub fn dispatch(
    session: &mut Session,
    msg: &Message,
    info: &ClientInfo,
) -> Result<Vec<Reaction>, DispatchError> {
    if let Some(response) = msg.response() {
        return match response {
            Response::RPL_WELCOME => server::handle_welcome(msg),
            Response::RPL_TOPIC => channel::handle_topic_reply(session, msg),
            Response::RPL_NAMREPLY => channel::handle_names_reply(session, msg),
            Response::RPL_ENDOFNAMES => channel::handle_end_of_names(session, msg),
            Response::ERR_NICKNAMEINUSE => server::handle_nick_in_use(msg),
            r if r.is_end_of_motd() => Ok(server::handle_ready()),
            _ => Ok(Vec::new()),
        };
    }

    match msg.command.to_ascii_uppercase().as_str() {
        "PING" => server::handle_ping(msg),
        "ERROR" => Ok(server::handle_error(msg)),
        "PRIVMSG" => messaging::handle_privmsg(session, msg, info),
        "JOIN" => channel::handle_join(session, msg),
        "PART" => channel::handle_part(session, msg),
        "KICK" => channel::handle_kick(session, msg),
        "TOPIC" => channel::handle_topic(session, msg),
        "NICK" => user::handle_nick(session, msg),
        "QUIT" => user::handle_quit(session, msg),
        _ => Ok(Vec::new()),
    }
}

/// Fail unless `msg` has at least `needed` parameters.
fn require_params(
    msg: &Message,
    command: &'static str,
    needed: usize,
) -> Result<(), DispatchError> {
    if msg.params.len() < needed {
        return Err(DispatchError::NeedMoreParams {
            command,
            needed,
            got: msg.params.len(),
        });
    }
    Ok(())
}

/// Parameter `index`, which must be present and non-empty.
///
/// Used for room and nick targets, where an empty value would put the
/// session into a state it cannot leave.
fn non_empty_param<'a>(
    msg: &'a Message,
    command: &'static str,
    index: usize,
) -> Result<&'a str, DispatchError> {
    require_params(msg, command, index + 1)?;
    match msg.params[index].as_str() {
        "" => Err(DispatchError::EmptyParam { command, index }),
        param => Ok(param),
    }
}

/// Nickname of the sender.
fn origin_nick<'a>(msg: &'a Message, command: &'static str) -> Result<&'a str, DispatchError> {
    msg.source_nick()
        .ok_or(DispatchError::MissingOrigin(command))
}
