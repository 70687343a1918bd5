//! Legacy ASCII emoticons and the words they stand for.
//!
//! Keys are lowercase because the cleaner lowercases before it gets here
//! (`XD` is matched as `xd`, `:P` as `:p`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;

/// Bumped whenever an entry is added, removed or changes meaning.
pub const EMOTICON_TABLE_VERSION: u32 = 1;

pub static EMOTICONS: &[(&str, &str)] = &[
    (":)", "smile"),
    (":-)", "smile"),
    (";d", "wink"),
    (":-e", "vampire"),
    (":(", "sad"),
    (":-(", "sad"),
    (":-<", "sad"),
    (":p", "raspberry"),
    (":o", "surprised"),
    (":d", "smile"),
    ("xd", "laughing"),
    (":-@", "shocked"),
    (":@", "shocked"),
    (":-$", "confused"),
    (":\\", "annoyed"),
    (":#", "mute"),
    (":x", "mute"),
    (":^)", "smile"),
    (":-&", "confused"),
    ("$_$", "greedy"),
    ("@@", "eyeroll"),
    (":-!", "confused"),
    (":-d", "smile"),
    (":-0", "yell"),
    ("o.o", "confused"),
    ("<(-_-)>", "robot"),
    ("d[-_-]b", "dj"),
    (":'-)", "sad smile"),
    (";)", "wink"),
    (";-)", "wink"),
    ("o:-)", "angel"),
    ("o*-)", "angel"),
    ("(:-d", "gossip"),
    ("=^.^=", "cat"),
];

static LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EMOTICONS.iter().copied().collect());

/// One alternation over every key, longest first.
///
/// A key that begins or ends with a letter or digit only matches on a word
/// boundary on that side, so `:d` leaves `:dog` alone and `xd` leaves `xdr`.
static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut keys: Vec<&str> = EMOTICONS.iter().map(|(k, _)| *k).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let alternatives: Vec<String> = keys
        .iter()
        .map(|key| {
            let starts_alnum = key.chars().next().is_some_and(char::is_alphanumeric);
            let ends_alnum = key.chars().last().is_some_and(char::is_alphanumeric);
            format!(
                "{}{}{}",
                if starts_alnum { r"\b" } else { "" },
                regex::escape(key),
                if ends_alnum { r"\b" } else { "" },
            )
        })
        .collect();

    Regex::new(&alternatives.join("|")).expect("escaped emoticon alternation is a valid regex")
});

/// Replaces every known emoticon with its word, padded with spaces.
pub fn replace_emoticons(text: &str) -> Cow<'_, str> {
    PATTERN.replace_all(text, |caps: &Captures| {
        let word = LOOKUP.get(&caps[0]).copied().unwrap_or_default();
        format!(" {word} ")
    })
}
