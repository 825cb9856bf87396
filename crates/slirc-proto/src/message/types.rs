use crate::prefix::PrefixRef;
use crate::response::Response;

/// An owned, parsed IRC message.
///
/// `origin` is the sender annotation without its leading `:` (empty when the
/// line had none). `params` keeps the trailing parameter, if any, as its last
/// element with embedded spaces intact.
///
/// # Example
///
/// ```
/// use slirc_proto::Message;
///
/// let msg: Message = ":n!u@h PRIVMSG #c :hello there".parse().unwrap();
/// assert_eq!(msg.origin, "n!u@h");
/// assert_eq!(msg.command, "PRIVMSG");
/// assert_eq!(msg.params, vec!["#c", "hello there"]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Message {
    /// Sender annotation (e.g. `nick!user@host` or a server name).
    pub origin: String,
    /// Command verb or three-digit numeric.
    pub command: String,
    /// Ordered parameters.
    pub params: Vec<String>,
}

impl Message {
    /// Create a message from its parts.
    pub fn new<I, S>(origin: impl Into<String>, command: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origin: origin.into(),
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Parameter at `idx`, if present.
    #[inline]
    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(String::as_str)
    }

    /// Whether the command matches `name`, ignoring ASCII case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.command.eq_ignore_ascii_case(name)
    }

    /// The numeric reply carried by this message, if it is a known one.
    pub fn response(&self) -> Option<Response> {
        self.command.parse().ok()
    }

    /// Structured view of the origin.
    pub fn prefix(&self) -> Option<PrefixRef<'_>> {
        if self.origin.is_empty() {
            None
        } else {
            Some(PrefixRef::parse(&self.origin))
        }
    }

    /// Nickname of the sender, when the origin names a user.
    pub fn source_nick(&self) -> Option<&str> {
        self.prefix().and_then(|p| p.nick)
    }
}
