//! Text filters applied to displayed lines.
//!
//! Both filters are built from plain word lists (one word per line) and use
//! a case-insensitive Aho-Corasick automaton, so a line is scanned once no
//! matter how many words are configured.

use aho_corasick::{AhoCorasick, MatchKind};
use slirc_proto::irc_to_lower;
use std::borrow::Cow;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Read a word list. A missing file is an empty list.
pub fn load_word_list(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "word list not found");
            Vec::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read word list");
            Vec::new()
        }
    }
}

fn build_matcher(words: &[String]) -> Option<AhoCorasick> {
    if words.is_empty() {
        return None;
    }
    match AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(words)
    {
        Ok(matcher) => Some(matcher),
        Err(err) => {
            warn!(error = ?err, "failed to build word matcher; filter disabled");
            None
        }
    }
}

/// Replaces configured words with asterisks of the same length.
#[derive(Debug, Clone, Default)]
pub struct Censor {
    matcher: Option<AhoCorasick>,
}

impl Censor {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            matcher: build_matcher(&words),
        }
    }

    /// Build from the configured list path; `None` disables censoring.
    pub fn from_file(path: Option<&str>) -> Self {
        Self::new(
            path.filter(|p| !p.is_empty())
                .map(|p| load_word_list(p))
                .unwrap_or_default(),
        )
    }

    pub fn censor<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some(matcher) = &self.matcher else {
            return Cow::Borrowed(text);
        };

        let mut out = String::new();
        let mut last = 0;
        for found in matcher.find_iter(text) {
            out.push_str(&text[last..found.start()]);
            let width = text[found.start()..found.end()].chars().count();
            out.extend(std::iter::repeat_n('*', width));
            last = found.end();
        }
        if last == 0 {
            return Cow::Borrowed(text);
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}

/// Decides whether a line should stand out.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    matcher: Option<AhoCorasick>,
}

impl Highlighter {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            matcher: build_matcher(&words),
        }
    }

    /// Build from the configured list path; `None` means only our nick counts.
    pub fn from_file(path: Option<&str>) -> Self {
        Self::new(
            path.filter(|p| !p.is_empty())
                .map(|p| load_word_list(p))
                .unwrap_or_default(),
        )
    }

    /// Whether `text` mentions `nick` or any highlight word.
    pub fn mentions(&self, text: &str, nick: &str) -> bool {
        if !nick.is_empty() && irc_to_lower(text).contains(&irc_to_lower(nick)) {
            return true;
        }
        self.matcher.as_ref().is_some_and(|m| m.is_match(text))
    }
}
