//! Splitting a message origin into its parts.
//!
//! An origin is a server name (`irc.example.com`) or a user mask
//! (`nick!user@host`). Servers often shorten the mask to `nick` or
//! `nick@host`.

/// Borrowed parts of an origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixRef<'a> {
    /// Absent for server origins.
    pub nick: Option<&'a str>,
    /// Username (ident).
    pub user: Option<&'a str>,
    /// User host, or the server name for server origins.
    pub host: Option<&'a str>,
    /// The origin as received.
    pub raw: &'a str,
}

impl<'a> PrefixRef<'a> {
    /// Split `origin`. Never fails; missing parts are `None`.
    ///
    /// A bare name counts as a server only if it contains a dot, so
    /// `irc.example.com` is a server and `alice` is a nick.
    pub fn parse(origin: &'a str) -> Self {
        let some = |s: &'a str| (!s.is_empty()).then_some(s);

        let (mask, host) = match origin.split_once('@') {
            Some((mask, host)) => (mask, some(host)),
            None => (origin, None),
        };
        let (nick, user) = match mask.split_once('!') {
            Some((nick, user)) => (nick, some(user)),
            None => (mask, None),
        };

        if host.is_none() && user.is_none() && nick.contains('.') {
            return Self {
                nick: None,
                user: None,
                host: some(nick),
                raw: origin,
            };
        }
        Self {
            nick: some(nick),
            user,
            host,
            raw: origin,
        }
    }

    /// Whether the origin names a server rather than a user.
    pub fn is_server(&self) -> bool {
        self.nick.is_none() && self.host.is_some()
    }
}
