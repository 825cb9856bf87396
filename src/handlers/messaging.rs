//! PRIVMSG handling, including CTCP.

use super::{ClientInfo, Reaction, origin_nick, require_params};
use crate::error::DispatchError;
use crate::event::Event;
use crate::state::Session;
use slirc_proto::{Command, Ctcp, CtcpKind, Message};
use tracing::debug;

/// `:nick!u@h PRIVMSG <target> :<text>`.
///
/// Room messages and messages to our nick become events; messages to any
/// other target are dropped. CTCP requests are answered with a NOTICE.
pub(super) fn handle_privmsg(
    session: &mut Session,
    msg: &Message,
    info: &ClientInfo,
) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "PRIVMSG", 2)?;
    let nick = origin_nick(msg, "PRIVMSG")?;
    let target = msg.params[0].as_str();
    let text = msg.params[1].as_str();

    if Ctcp::is_ctcp(text) {
        let ctcp = Ctcp::parse(text).ok_or(DispatchError::EmptyCtcp)?;
        return handle_ctcp(session, nick, target, &ctcp, info);
    }

    let event = if session.is_room(target) {
        Event::RoomMessage {
            nick: nick.to_string(),
            text: text.to_string(),
        }
    } else if session.is_own_nick(target) {
        Event::PrivateMessage {
            nick: nick.to_string(),
            text: text.to_string(),
        }
    } else {
        debug!(target = %target, "PRIVMSG for a target we do not follow");
        return Ok(Vec::new());
    };
    Ok(vec![Reaction::Notify(event)])
}

fn handle_ctcp(
    session: &Session,
    nick: &str,
    target: &str,
    ctcp: &Ctcp<'_>,
    info: &ClientInfo,
) -> Result<Vec<Reaction>, DispatchError> {
    debug!(from = %nick, kind = %ctcp.kind, "CTCP request");
    match &ctcp.kind {
        CtcpKind::Version => {
            let version = format!("{} {}", info.name, info.version);
            let reply = Command::ctcp_reply(nick, &Ctcp::version_reply(&version))?;
            Ok(vec![Reaction::Reply(reply)])
        }
        CtcpKind::Ping => {
            let reply = Command::ctcp_reply(nick, &Ctcp::ping_reply(ctcp.params))?;
            Ok(vec![Reaction::Reply(reply)])
        }
        CtcpKind::Action if session.is_room(target) || session.is_own_nick(target) => {
            Ok(vec![Reaction::Notify(Event::Emote {
                nick: nick.to_string(),
                text: ctcp.params.unwrap_or_default().to_string(),
            })])
        }
        CtcpKind::Action => Ok(Vec::new()),
        other => Ok(vec![Reaction::Notify(Event::status(format!(
            "got CTCP message: {other}"
        )))]),
    }
}
