//! Nick changes and quits.

use super::{Reaction, non_empty_param, origin_nick};
use crate::error::DispatchError;
use crate::event::Event;
use crate::state::Session;
use slirc_proto::Message;
use tracing::info;

/// `:old!u@h NICK <new>`. When `old` is us, the server has accepted our
/// rename and only now does our identity change.
pub(super) fn handle_nick(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    let new = non_empty_param(msg, "NICK", 0)?;
    let old = origin_nick(msg, "NICK")?;

    let own = session.is_own_nick(old);
    if own {
        info!(old = %old, new = %new, "nick change acknowledged");
        session.set_nick(new);
    }

    let mut reactions = vec![Reaction::Notify(Event::Renamed {
        old: old.to_string(),
        new: new.to_string(),
        own,
    })];
    if let Some(roster) = session.roster_mut() {
        roster.rename(old, new);
        reactions.push(Reaction::roster(session));
    }
    Ok(reactions)
}

/// `:nick!u@h QUIT [:reason]` drops the nick from our room.
pub(super) fn handle_quit(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    let nick = origin_nick(msg, "QUIT")?;
    let removed = session
        .roster_mut()
        .is_some_and(|roster| roster.remove(nick));
    if !removed {
        return Ok(Vec::new());
    }

    Ok(vec![
        Reaction::Notify(Event::UserLeft {
            nick: nick.to_string(),
            reason: msg.param(0).map(str::to_string),
        }),
        Reaction::roster(session),
    ])
}
