//! Records flowing through the pipeline.
//!
//! Each stage produces a new value instead of mutating the previous one:
//! [`RawPost`] → [`CleanedPost`] → [`ScoredPost`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a search can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
    German,
    Dutch,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Dutch,
        Language::Spanish,
    ];

    /// ISO 639-1 code used to tag posts.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
            Language::Dutch => "nl",
            Language::Spanish => "es",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::German => "German",
            Language::Dutch => "Dutch",
            Language::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts either the display name or the ISO code, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(wanted) || lang.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                format!("unsupported language '{s}' (expected one of en, fr, de, nl, es)")
            })
    }
}

/// A single scraped post, as handed over by a post source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(alias = "tweet")]
    pub text: String,
    #[serde(default, alias = "lang")]
    pub language: String,
}

impl RawPost {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }

    /// Exact match against the ISO code; a post without a tag never matches.
    pub fn is_in(&self, language: Language) -> bool {
        self.language == language.code()
    }
}

/// Post text after emoji translation and noise stripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedPost {
    pub original: String,
    pub cleaned: String,
}

/// Ordinal sentiment label, 1 (most negative) to 5 (most positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Sentiment(u8);

impl Sentiment {
    pub const MIN: Sentiment = Sentiment(1);
    pub const NEUTRAL: Sentiment = Sentiment(3);
    pub const MAX: Sentiment = Sentiment(5);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Sentiment(value))
    }

    /// Maps a 0-based classifier label index onto the 1–5 scale.
    pub fn from_label_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(Self::new)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self > Self::NEUTRAL
    }

    pub fn is_negative(self) -> bool {
        self < Self::NEUTRAL
    }

    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }
}

impl From<Sentiment> for u8 {
    fn from(s: Sentiment) -> u8 {
        s.0
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cleaned post paired with its sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredPost {
    pub original: String,
    pub cleaned: String,
    pub sentiment: Sentiment,
}

impl ScoredPost {
    pub fn new(post: CleanedPost, sentiment: Sentiment) -> Self {
        Self {
            original: post.original,
            cleaned: post.cleaned,
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_names_and_codes() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!("Dutch".parse::<Language>().unwrap(), Language::Dutch);
        assert_eq!(" ES ".parse::<Language>().unwrap(), Language::Spanish);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn sentiment_only_holds_five_levels() {
        assert!(Sentiment::new(0).is_none());
        assert!(Sentiment::new(6).is_none());
        assert_eq!(Sentiment::from_label_index(0), Sentiment::new(1));
        assert_eq!(Sentiment::from_label_index(4), Sentiment::new(5));
        assert!(Sentiment::from_label_index(5).is_none());
        assert!(Sentiment::from_label_index(usize::MAX).is_none());
    }

    #[test]
    fn neutral_is_neither_positive_nor_negative() {
        let n = Sentiment::NEUTRAL;
        assert!(n.is_neutral() && !n.is_positive() && !n.is_negative());
        assert!(Sentiment::MAX.is_positive());
        assert!(Sentiment::MIN.is_negative());
    }

    #[test]
    fn raw_post_accepts_original_field_names() {
        let post: RawPost =
            serde_json::from_str(r#"{"tweet": "hello", "lang": "en", "likes": 3}"#).unwrap();
        assert_eq!(post, RawPost::new("hello", "en"));
        assert!(post.is_in(Language::English));

        let untagged: RawPost = serde_json::from_str(r#"{"text": "hallo"}"#).unwrap();
        assert!(!untagged.is_in(Language::German));
    }
}
