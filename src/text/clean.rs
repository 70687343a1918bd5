//! Noise stripping for post text.
//!
//! The order of the steps matters: emoticons are made of punctuation, so they
//! have to be translated before punctuation goes, and they are matched in
//! lowercase form, so lowercasing comes first.

use super::emoticons::replace_emoticons;
use once_cell::sync::Lazy;
use regex::Regex;

/// Whitespace-delimited tokens that carry a link.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S*(?:https?:|[a-z][a-z0-9+.\-]*://)\S*|(?:^|\b)www\.\S+")
        .expect("url pattern is valid")
});

static MENTION_OR_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\w+|#").expect("mention pattern is valid"));

/// Any numeric character, including fractions and superscripts.
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{N}+").expect("digit pattern is valid"));

/// Punctuation, symbols (which covers leftover emoji and skin tones), format
/// characters such as the zero width joiner, variation selectors and control
/// characters other than whitespace.
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{P}\p{S}\p{Cf}\x{FE00}-\x{FE0F}[\p{Cc}--\s]]+")
        .expect("punctuation pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Cleans post text for scoring.
///
/// Lowercases, drops links, translates emoticons, drops mentions and `#`
/// (keeping the hashtag word), then digits and punctuation. Word-form
/// emoticons uncovered by those deletions (`x-d` → `xd`) are translated too,
/// and whitespace is collapsed. The result is a fixed point:
/// `clean(&clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = URL.replace_all(&lowered, "");
    let translated = replace_emoticons(&no_urls);
    let no_mentions = MENTION_OR_HASH.replace_all(&translated, "");
    let no_digits = DIGITS.replace_all(&no_mentions, "");
    let no_punctuation = PUNCTUATION.replace_all(&no_digits, "");
    let settled = replace_emoticons(&no_punctuation);

    WHITESPACE.replace_all(&settled, " ").trim().to_string()
}
