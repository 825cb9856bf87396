//! Server housekeeping: PING, welcome, MOTD end, ERROR, nick collisions.

use super::{Reaction, require_params};
use crate::error::DispatchError;
use crate::event::Event;
use slirc_proto::{Command, Message};
use tracing::debug;

/// `PING <token>` is answered with `PONG <token>`.
pub(super) fn handle_ping(msg: &Message) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "PING", 1)?;
    let token = &msg.params[0];
    debug!(token = %token, "answering PING");
    Ok(vec![Reaction::Reply(Command::pong(token)?)])
}

/// 001: show the server's greeting.
pub(super) fn handle_welcome(msg: &Message) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "001", 2)?;
    Ok(vec![Reaction::Notify(Event::status(
        &msg.params[msg.params.len() - 1],
    ))])
}

/// 376 / 422: registration is complete.
pub(super) fn handle_ready() -> Vec<Reaction> {
    vec![Reaction::Notify(Event::Ready)]
}

/// `ERROR :<reason>`, usually right before the server closes the link.
pub(super) fn handle_error(msg: &Message) -> Vec<Reaction> {
    let reason = msg.param(0).unwrap_or("no reason given");
    vec![Reaction::Notify(Event::status(format!(
        "server error: {reason}"
    )))]
}

/// 433: the nick we asked for is taken.
pub(super) fn handle_nick_in_use(msg: &Message) -> Result<Vec<Reaction>, DispatchError> {
    require_params(msg, "433", 2)?;
    Ok(vec![Reaction::Notify(Event::status(format!(
        "nickname {} is already in use",
        msg.params[1]
    )))])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::event::Event;

    #[test]
    fn ping_gets_pong_with_same_token() {
        let mut session = connected();
        let reactions = feed(&mut session, "PING :irc.example.com").unwrap();
        assert_eq!(replies(&reactions), vec!["PONG irc.example.com"]);

        let reactions = feed(&mut session, "PING :two words").unwrap();
        assert_eq!(replies(&reactions), vec!["PONG :two words"]);
    }

    #[test]
    fn ping_without_token_is_an_error() {
        let mut session = connected();
        assert!(feed(&mut session, "PING").is_err());
    }

    #[test]
    fn end_of_motd_or_no_motd_means_ready() {
        let mut session = connected();
        for line in [
            ":srv 376 me :End of /MOTD command.",
            ":srv 422 me :MOTD File is missing",
        ] {
            let reactions = feed(&mut session, line).unwrap();
            assert_eq!(events(&reactions), vec![&Event::Ready]);
        }
    }

    #[test]
    fn error_and_nick_collision_become_status() {
        let mut session = connected();
        let reactions = feed(&mut session, "ERROR :Closing Link: too slow").unwrap();
        assert_eq!(
            events(&reactions),
            vec![&Event::status("server error: Closing Link: too slow")]
        );

        let reactions =
            feed(&mut session, ":srv 433 * me :Nickname is already in use").unwrap();
        assert_eq!(
            events(&reactions),
            vec![&Event::status("nickname me is already in use")]
        );
    }

    #[test]
    fn welcome_text_is_shown() {
        let mut session = connected();
        let reactions = feed(&mut session, ":srv 001 me :Welcome to the network").unwrap();
        assert_eq!(
            events(&reactions),
            vec![&Event::status("Welcome to the network")]
        );
    }
}
