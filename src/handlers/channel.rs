//! Room membership: JOIN, PART, KICK, NAMES and topic replies.

use super::{Reaction, non_empty_param, origin_nick, require_params};
use crate::error::DispatchError;
use crate::event::Event;
use crate::state::{ConnectionState, Session};
use slirc_proto::Message;
use tracing::{debug, info};

/// `:nick!u@h JOIN <room>`.
///
/// Our own JOIN while connected moves us into the room. Anyone else joining
/// the room we are in is added to the roster. Everything else is ignored.
pub(super) fn handle_join(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    let room = non_empty_param(msg, "JOIN", 0)?;
    let nick = origin_nick(msg, "JOIN")?;

    match session.state() {
        ConnectionState::Connected if session.is_own_nick(nick) => {
            if session.enter_room(room).is_err() {
                return Ok(Vec::new());
            }
            info!(room = %room, "joined");
            Ok(vec![
                Reaction::Notify(Event::Joined {
                    room: room.to_string(),
                }),
                Reaction::Notify(Event::Connection(ConnectionState::Joined)),
            ])
        }
        ConnectionState::Joined if !session.is_own_nick(nick) && session.is_room(room) => {
            if let Some(roster) = session.roster_mut() {
                roster.add(nick);
            }
            Ok(vec![
                Reaction::Notify(Event::UserJoined {
                    nick: nick.to_string(),
                }),
                Reaction::roster(session),
            ])
        }
        _ => Ok(Vec::new()),
    }
}

/// `:nick!u@h PART <room> [:reason]`.
pub(super) fn handle_part(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    let room = non_empty_param(msg, "PART", 0)?;
    let nick = origin_nick(msg, "PART")?;
    if !session.is_room(room) {
        return Ok(Vec::new());
    }

    if session.is_own_nick(nick) {
        // Removed from the room by the server rather than by /part.
        let room = session.leave_room().unwrap_or_default();
        return Ok(vec![
            Reaction::Notify(Event::status(format!("left channel {room}"))),
            Reaction::Notify(Event::Connection(ConnectionState::Connected)),
            Reaction::roster(session),
        ]);
    }

    if let Some(roster) = session.roster_mut() {
        roster.remove(nick);
    }
    Ok(vec![
        Reaction::Notify(Event::UserLeft {
            nick: nick.to_string(),
            reason: msg.param(1).map(str::to_string),
        }),
        Reaction::roster(session),
    ])
}

/// `:op!u@h KICK <room> <nick> [:reason]`.
///
/// Being kicked ourselves takes us out of the room the same way a PART does.
pub(super) fn handle_kick(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    let room = non_empty_param(msg, "KICK", 0)?;
    let target = non_empty_param(msg, "KICK", 1)?;
    let by = origin_nick(msg, "KICK")?;
    if !session.is_room(room) {
        return Ok(Vec::new());
    }
    let reason = msg.param(2).filter(|r| !r.is_empty());

    if session.is_own_nick(target) {
        let room = session.leave_room().unwrap_or_default();
        info!(room = %room, by = %by, "kicked");
        let text = match reason {
            Some(reason) => format!("kicked from {room} by {by} ({reason})"),
            None => format!("kicked from {room} by {by}"),
        };
        return Ok(vec![
            Reaction::Notify(Event::status(text)),
            Reaction::Notify(Event::Connection(ConnectionState::Connected)),
            Reaction::roster(session),
        ]);
    }

    if let Some(roster) = session.roster_mut() {
        roster.remove(target);
    }
    let reason = match reason {
        Some(reason) => format!("kicked by {by}: {reason}"),
        None => format!("kicked by {by}"),
    };
    Ok(vec![
        Reaction::Notify(Event::UserLeft {
            nick: target.to_string(),
            reason: Some(reason),
        }),
        Reaction::roster(session),
    ])
}

/// 353 `<me> [<symbol>] <room> :<nick> <nick> ...`.
///
/// A listing can span many replies, so entries are only collected here and
/// swapped in when 366 arrives.
pub(super) fn handle_names_reply(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "353", 3)?;
    let n = msg.params.len();
    let room = non_empty_param(msg, "353", n - 2)?;
    if session.is_room(room) {
        let names = &msg.params[n - 1];
        debug!(room = %room, count = names.split_whitespace().count(), "NAMES batch");
        session.accumulate_names(names.split_whitespace());
    }
    Ok(Vec::new())
}

/// 366 `<me> <room> :End of /NAMES list.`
pub(super) fn handle_end_of_names(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    let room = non_empty_param(msg, "366", 1)?;
    if !session.is_room(room) || !session.finish_names() {
        return Ok(Vec::new());
    }
    Ok(vec![Reaction::roster(session)])
}

/// 332 `<me> <room> :<topic>`.
pub(super) fn handle_topic_reply(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "332", 3)?;
    let room = non_empty_param(msg, "332", 1)?;
    Ok(set_topic(session, room, &msg.params[2]))
}

/// `:nick!u@h TOPIC <room> :<topic>`.
pub(super) fn handle_topic(
    session: &mut Session,
    msg: &Message,
) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "TOPIC", 2)?;
    let room = non_empty_param(msg, "TOPIC", 0)?;
    Ok(set_topic(session, room, &msg.params[1]))
}

fn set_topic(session: &mut Session, room: &str, topic: &str) -> Vec<Reaction> {
    if !session.is_room(room) {
        return Vec::new();
    }
    session.set_topic(topic);
    vec![Reaction::Notify(Event::Topic {
        topic: topic.to_string(),
    })]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::error::DispatchError;
    use crate::event::Event;
    use crate::state::ConnectionState;
    use slirc_proto::Message;

    #[test]
    fn own_join_enters_room() {
        let mut session = connected();
        let reactions = feed(&mut session, ":me!u@h JOIN #rust").unwrap();

        assert_eq!(session.state(), ConnectionState::Joined);
        assert_eq!(session.room(), Some("#rust"));
        assert_eq!(
            events(&reactions)[0],
            &Event::Joined {
                room: "#rust".into()
            }
        );
    }

    #[test]
    fn later_join_from_other_nick_only_updates_roster() {
        let mut session = connected();
        feed(&mut session, ":me!u@h JOIN #rust").unwrap();

        let reactions = feed(&mut session, ":alice!a@h JOIN #rust").unwrap();
        assert_eq!(session.room(), Some("#rust"));
        assert_eq!(session.roster().snapshot(), vec!["alice"]);
        assert!(
            !events(&reactions)
                .iter()
                .any(|e| matches!(e, Event::Joined { .. }))
        );
        assert_eq!(
            events(&reactions),
            vec![
                &Event::UserJoined {
                    nick: "alice".into()
                },
                &Event::Roster(vec!["alice".into()]),
            ]
        );
    }

    #[test]
    fn join_from_other_nick_while_not_joined_is_ignored() {
        let mut session = connected();
        assert!(feed(&mut session, ":alice!a@h JOIN #rust").unwrap().is_empty());
        assert_eq!(session.state(), ConnectionState::Connected);
    }

    #[test]
    fn join_to_other_room_is_ignored() {
        let mut session = joined("#rust");
        assert!(feed(&mut session, ":alice!a@h JOIN #go").unwrap().is_empty());
        assert!(session.roster().is_empty());
    }

    #[test]
    fn part_removes_nick() {
        let mut session = joined("#rust");
        session.roster_mut().unwrap().replace(["alice", "bob", "me"]);

        let reactions = feed(&mut session, ":bob!b@h PART #RUST :bye").unwrap();
        assert_eq!(session.roster().snapshot(), vec!["alice", "me"]);
        assert_eq!(
            events(&reactions)[0],
            &Event::UserLeft {
                nick: "bob".into(),
                reason: Some("bye".into())
            }
        );
    }

    #[test]
    fn part_for_absent_nick_is_harmless() {
        let mut session = joined("#rust");
        session.roster_mut().unwrap().add("alice");
        feed(&mut session, ":ghost!g@h PART #rust").unwrap();
        assert_eq!(session.roster().snapshot(), vec!["alice"]);
    }

    #[test]
    fn own_part_leaves_room() {
        let mut session = joined("#rust");
        feed(&mut session, ":me!u@h PART #rust").unwrap();
        assert_eq!(session.state(), ConnectionState::Connected);
        assert_eq!(session.room(), None);
    }

    #[test]
    fn empty_join_target_is_rejected() {
        let mut session = connected();
        assert_eq!(
            feed(&mut session, ":me!u@h JOIN :"),
            Err(DispatchError::EmptyParam {
                command: "JOIN",
                index: 0
            })
        );
        assert_eq!(session.state(), ConnectionState::Connected);
        assert_eq!(session.room(), None);

        // Still able to join a real room afterwards.
        feed(&mut session, ":me!u@h JOIN #rust").unwrap();
        assert_eq!(session.room(), Some("#rust"));
    }

    #[test]
    fn empty_room_in_part_topic_and_end_of_names_is_rejected() {
        let mut session = joined("#rust");
        for (line, command, index) in [(":me!u@h PART :", "PART", 0), (":srv 366 me :", "366", 1)] {
            assert_eq!(
                feed(&mut session, line),
                Err(DispatchError::EmptyParam { command, index }),
                "{line}"
            );
        }

        let mut topic: Message = ":alice!a@h TOPIC #rust :x".parse().unwrap();
        topic.params[0].clear();
        assert_eq!(
            feed_message(&mut session, &topic),
            Err(DispatchError::EmptyParam {
                command: "TOPIC",
                index: 0
            })
        );
        assert_eq!(session.state(), ConnectionState::Joined);
        assert_eq!(session.room(), Some("#rust"));
    }

    #[test]
    fn kick_of_other_nick_removes_them() {
        let mut session = joined("#rust");
        session.roster_mut().unwrap().replace(["alice", "bob", "me"]);

        let reactions = feed(&mut session, ":alice!a@h KICK #rust bob :spam").unwrap();
        assert_eq!(session.roster().snapshot(), vec!["alice", "me"]);
        assert_eq!(session.state(), ConnectionState::Joined);
        assert_eq!(
            events(&reactions)[0],
            &Event::UserLeft {
                nick: "bob".into(),
                reason: Some("kicked by alice: spam".into())
            }
        );
    }

    #[test]
    fn own_kick_leaves_room() {
        let mut session = joined("#rust");
        session.roster_mut().unwrap().replace(["alice", "me"]);

        let reactions = feed(&mut session, ":alice!a@h KICK #rust me :out").unwrap();
        assert_eq!(session.state(), ConnectionState::Connected);
        assert_eq!(session.room(), None);
        assert!(session.roster().is_empty());
        assert_eq!(
            events(&reactions)[..2],
            [
                &Event::status("kicked from #rust by alice (out)"),
                &Event::Connection(ConnectionState::Connected),
            ]
        );
    }

    #[test]
    fn kick_in_other_room_is_ignored() {
        let mut session = joined("#rust");
        session.roster_mut().unwrap().add("bob");
        assert!(
            feed(&mut session, ":alice!a@h KICK #go me")
                .unwrap()
                .is_empty()
        );
        assert_eq!(session.room(), Some("#rust"));
        assert_eq!(session.roster().snapshot(), vec!["bob"]);
    }

    #[test]
    fn names_replies_accumulate_until_end() {
        let mut session = joined("#rust");
        session.roster_mut().unwrap().add("stale");

        assert!(
            feed(&mut session, ":srv 353 me = #rust :@carol +bob")
                .unwrap()
                .is_empty()
        );
        feed(&mut session, ":srv 353 me = #rust :alice me").unwrap();
        assert_eq!(session.roster().snapshot(), vec!["stale"]);

        let reactions = feed(&mut session, ":srv 366 me #rust :End of /NAMES list.").unwrap();
        let expected = vec!["alice", "bob", "carol", "me"];
        assert_eq!(session.roster().snapshot(), expected);
        assert_eq!(
            events(&reactions),
            vec![&Event::Roster(
                expected.into_iter().map(String::from).collect()
            )]
        );
    }

    #[test]
    fn names_without_symbol_are_accepted() {
        let mut session = joined("#rust");
        feed(&mut session, ":srv 353 me #rust :alice").unwrap();
        feed(&mut session, ":srv 366 me #rust :End").unwrap();
        assert_eq!(session.roster().snapshot(), vec!["alice"]);
    }

    #[test]
    fn names_for_other_room_are_ignored() {
        let mut session = joined("#rust");
        feed(&mut session, ":srv 353 me = #go :alice").unwrap();
        assert!(
            feed(&mut session, ":srv 366 me #go :End")
                .unwrap()
                .is_empty()
        );
        assert!(session.roster().is_empty());
    }

    #[test]
    fn names_while_not_joined_do_nothing() {
        let mut session = connected();
        feed(&mut session, ":srv 353 me = #rust :alice").unwrap();
        assert!(
            feed(&mut session, ":srv 366 me #rust :End")
                .unwrap()
                .is_empty()
        );
        assert!(session.roster().is_empty());
    }

    #[test]
    fn topic_reply_and_change() {
        let mut session = joined("#rust");
        feed(&mut session, ":srv 332 me #rust :Rust talk").unwrap();
        assert_eq!(session.topic(), "Rust talk");

        let reactions = feed(&mut session, ":alice!a@h TOPIC #rust :new topic").unwrap();
        assert_eq!(session.topic(), "new topic");
        assert_eq!(
            events(&reactions),
            vec![&Event::Topic {
                topic: "new topic".into()
            }]
        );
    }
}
