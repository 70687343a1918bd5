//! Normalization of user-typed search terms.

use crate::core::{AnalysisError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Anything that is not a letter, plus letter-like symbols such as the
/// enclosed emoji letters (`🅰`, `Ⓜ`), which Unicode counts as alphabetic.
static NOT_A_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}]|\p{So}").expect("letter pattern is valid"));

/// Strips everything but letters from a user-supplied hashtag.
///
/// Punctuation, digits, emoji and whitespace are removed rather than replaced,
/// so `"#Squid Game 2!"` becomes `"SquidGame"`. Letters outside ASCII are kept.
pub fn sanitize(raw: &str) -> String {
    NOT_A_LETTER.replace_all(raw, "").into_owned()
}

/// One or two sanitized hashtags to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Builds a query from a primary hashtag and an optional second one.
    ///
    /// The second term only counts when the first one survived sanitization.
    pub fn new(primary: &str, secondary: Option<&str>) -> Result<Self> {
        let primary = sanitize(primary);
        if primary.is_empty() {
            return Err(AnalysisError::NoSearchTerm);
        }

        let mut terms = vec![primary];
        if let Some(second) = secondary.map(sanitize).filter(|s| !s.is_empty()) {
            terms.push(second);
        }

        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True if `text` mentions any of the terms, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .any(|term| haystack.contains(&term.to_lowercase()))
    }

    /// How many posts to ask a source for when `limit` are wanted.
    ///
    /// Sources do not filter languages reliably, so roughly half is expected
    /// to be dropped downstream.
    pub fn fetch_hint(limit: usize) -> usize {
        limit.saturating_mul(2)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join(", "))
    }
}
