//! RFC 1459 casemapping.
//!
//! Nicknames and channel names compare case-insensitively. Under `rfc1459`
//! the characters `[]\~` are the upper case of `{}|^`.

/// Fold one character.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => c.to_ascii_lowercase(),
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        other => other,
    }
}

/// Fold a whole name, e.g. for use as a map key.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Whether two names are the same under casemapping.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.chars().map(irc_lower_char).eq(b.chars().map(irc_lower_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_folds() {
        let folded: String = "AZ[]\\~".chars().map(irc_lower_char).collect();
        assert_eq!(folded, "az{}|^");
        assert_eq!(irc_lower_char('{'), '{');
        assert_eq!(irc_lower_char('É'), 'É');
    }

    #[test]
    fn test_fold_names() {
        assert_eq!(irc_to_lower("#Rust[Dev]"), "#rust{dev}");
        assert_eq!(irc_to_lower("Away\\Nick~"), "away|nick^");
    }

    #[test]
    fn test_irc_eq() {
        assert!(irc_eq("Alice", "aLICE"));
        assert!(irc_eq("#rust[dev]", "#RUST{DEV}"));
        assert!(!irc_eq("alice", "alicia"));
        assert!(!irc_eq("bob", "rob"));
    }
}
