use std::fmt;

use super::types::Command;
use super::util::{write_cmd, write_cmd_freeform};

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(u, h, s, r) => write_cmd_freeform(f, "USER", &[u, h, s, r]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::JOIN(c) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c) => write_cmd(f, "PART", &[c]),
            Command::NAMES(c) => write_cmd(f, "NAMES", &[c]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t, m]),
            Command::PONG(t) => write_cmd(f, "PONG", &[t]),
            Command::QUIT(r) => write_cmd_freeform(f, "QUIT", &[r]),
        }
    }
}
