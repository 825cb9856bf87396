//! Local input parsing.
//!
//! A line starting with `/` is a command, anything else is said in the
//! current room. A lone `/` repeats the previous line.

use crate::error::UsageError;

/// Lines printed by `/help`.
pub const HELP: &[&str] = &[
    "available commands:",
    "/connect <server:port>",
    "/disconnect [reason]",
    "/join <channel>",
    "/part",
    "/msg <nick> <message>",
    "/nick <new nick>",
    "/names",
    "/debug",
    "/quit [reason]",
];

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Connect { host: String, port: u16 },
    /// Optional QUIT reason, replacing the configured one.
    Disconnect(Option<String>),
    Join(String),
    Part,
    Msg { nick: String, text: String },
    Nick(String),
    Names,
    Debug,
    Help,
    Quit(Option<String>),
    /// Plain text for the current room.
    Say(String),
}

/// Parser that remembers the previous line for `/` repeats.
#[derive(Debug, Default)]
pub struct InputParser {
    last: Option<String>,
}

impl InputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(&mut self, line: &str) -> Result<Option<Input>, UsageError> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let line = if line == "/" {
            self.last.clone().ok_or(UsageError::NothingToRepeat)?
        } else {
            line.to_string()
        };
        self.last = Some(line.clone());

        match line.strip_prefix('/') {
            Some(command) => parse_command(command).map(Some),
            None => Ok(Some(Input::Say(line))),
        }
    }
}

fn parse_command(line: &str) -> Result<Input, UsageError> {
    let line = line.trim_start();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((line, ""));
    let mut args = rest.split_whitespace();

    match name {
        "connect" => {
            let usage = UsageError::Usage("/connect <server:port>");
            let (Some(target), None) = (args.next(), args.next()) else {
                return Err(usage);
            };
            let Some((host, port)) = target.split_once(':') else {
                return Err(usage);
            };
            if host.is_empty() || port.contains(':') {
                return Err(usage);
            }
            let port = port
                .parse()
                .map_err(|_| UsageError::InvalidPort(port.to_string()))?;
            Ok(Input::Connect {
                host: host.to_string(),
                port,
            })
        }
        "disconnect" => Ok(Input::Disconnect(reason(rest))),
        "join" => args
            .next()
            .map(|room| Input::Join(room.to_string()))
            .ok_or(UsageError::Usage("/join <channel>")),
        "part" => Ok(Input::Part),
        "msg" => {
            let (nick, text) = rest
                .split_once(char::is_whitespace)
                .map(|(nick, text)| (nick, text.trim_start()))
                .unwrap_or((rest, ""));
            if nick.is_empty() || text.is_empty() {
                return Err(UsageError::Usage("/msg <nick> <message>"));
            }
            Ok(Input::Msg {
                nick: nick.to_string(),
                text: text.to_string(),
            })
        }
        "nick" => args
            .next()
            .map(|nick| Input::Nick(nick.to_string()))
            .ok_or(UsageError::Usage("/nick <new nick>")),
        "names" => Ok(Input::Names),
        "debug" => Ok(Input::Debug),
        "help" => Ok(Input::Help),
        "quit" => Ok(Input::Quit(reason(rest))),
        other => Err(UsageError::UnknownCommand(other.to_string())),
    }
}

fn reason(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}
