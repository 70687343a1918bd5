//! Translation of emoji glyphs into descriptive words.
//!
//! The sentiment model reads words, not pictographs, so glyphs are swapped for
//! a phrase carrying the same feeling before the text is cleaned. Several
//! glyphs have more than one fitting phrase; which one is used is up to a
//! [`WordChooser`].
//!
//! [`EMOJI_TABLE`] holds hand-picked phrases for the glyphs that matter most
//! for sentiment. Any other pictograph falls back to its CLDR short name
//! (`💙` → `blue heart`).

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Bumped whenever an entry is added, removed or changes meaning.
pub const EMOJI_TABLE_VERSION: u32 = 1;

/// Glyph → candidate phrases, closest sense first.
pub static EMOJI_TABLE: &[(&str, &[&str])] = &[
    // faces, positive
    ("😀", &["grinning", "happy"]),
    ("😃", &["smiling", "happy"]),
    ("😄", &["smiling", "joy"]),
    ("😁", &["grinning", "beaming"]),
    ("😆", &["laughing", "happy"]),
    ("😅", &["relieved", "nervous laugh"]),
    ("🤣", &["laughing", "rolling on the floor laughing"]),
    ("😂", &["laughing", "tears of joy", "lol"]),
    ("🙂", &["smile", "content"]),
    ("😉", &["wink"]),
    ("😊", &["smile", "blush", "happy"]),
    ("😇", &["angel", "innocent"]),
    ("🥰", &["love", "adore"]),
    ("😍", &["love", "heart eyes", "adore"]),
    ("🤩", &["amazing", "star struck", "excited"]),
    ("😘", &["kiss", "love"]),
    ("😋", &["delicious", "yummy"]),
    ("😎", &["cool"]),
    ("🤗", &["hug", "warm"]),
    ("🥳", &["party", "celebrate"]),
    ("😌", &["relieved", "calm"]),
    // faces, neutral
    ("🤔", &["thinking", "wondering"]),
    ("😐", &["neutral"]),
    ("😑", &["expressionless"]),
    ("😶", &["speechless"]),
    ("🙄", &["eyeroll", "annoyed"]),
    ("😏", &["smirk"]),
    ("😴", &["sleepy", "bored"]),
    ("😮", &["surprised"]),
    ("😲", &["astonished", "shocked"]),
    ("🤯", &["mind blown", "shocked"]),
    // faces, negative
    ("😒", &["unamused", "annoyed"]),
    ("😔", &["sad", "pensive"]),
    ("😕", &["confused"]),
    ("🙁", &["sad", "frown"]),
    ("☹", &["sad", "frown"]),
    ("😟", &["worried"]),
    ("😢", &["sad", "crying"]),
    ("😭", &["crying", "sobbing", "very sad"]),
    ("😤", &["frustrated", "angry"]),
    ("😠", &["angry"]),
    ("😡", &["angry", "furious", "rage"]),
    ("🤬", &["cursing", "furious"]),
    ("😱", &["scared", "screaming"]),
    ("😨", &["fearful", "scared"]),
    ("😰", &["anxious", "worried"]),
    ("😩", &["weary", "tired"]),
    ("😫", &["tired", "exhausted"]),
    ("🤢", &["disgusted", "sick"]),
    ("🤮", &["disgusting", "vomit"]),
    ("💀", &["dead", "skull"]),
    ("💩", &["crap", "poop"]),
    // hearts and gestures
    ("❤", &["love", "heart"]),
    ("💕", &["love", "hearts"]),
    ("💖", &["love", "sparkling heart"]),
    ("💔", &["heartbroken", "broken heart"]),
    ("👍", &["thumbs up", "good", "approve"]),
    ("👎", &["thumbs down", "bad", "disapprove"]),
    ("👏", &["applause", "clapping", "bravo"]),
    ("🙌", &["celebration", "hooray"]),
    ("🙏", &["thanks", "please", "pray"]),
    ("💪", &["strong", "strength"]),
    ("👌", &["ok", "perfect"]),
    ("🖕", &["insult"]),
    ("🤦", &["facepalm"]),
    ("🤦\u{200D}♂", &["facepalm"]),
    ("🤦\u{200D}♀", &["facepalm"]),
    ("🤷", &["shrug", "whatever"]),
    // symbols and objects
    ("🔥", &["fire", "lit", "hot"]),
    ("✨", &["sparkles", "shiny"]),
    ("⭐", &["star"]),
    ("🎉", &["party", "celebration", "congratulations"]),
    ("💯", &["hundred percent", "perfect"]),
    ("✅", &["done", "check"]),
    ("❌", &["wrong", "no"]),
    ("⚠", &["warning"]),
    ("🚀", &["rocket", "launch"]),
    ("💰", &["money"]),
    ("📈", &["rising", "growth"]),
    ("📉", &["falling", "decline"]),
    ("🏆", &["trophy", "winner"]),
    ("☀", &["sun", "sunny"]),
    ("🌧", &["rain"]),
    ("🐦", &["bird"]),
];

static LOOKUP: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| EMOJI_TABLE.iter().copied().collect());

/// Longest table glyph sequence first, each optionally followed by a variation
/// selector and a skin tone modifier that are swallowed with it. Then any other
/// pictograph with its modifiers and zero width joined components.
static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut glyphs: Vec<&str> = EMOJI_TABLE.iter().map(|(g, _)| *g).collect();
    glyphs.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = glyphs
        .iter()
        .map(|g| regex::escape(g))
        .collect::<Vec<_>>()
        .join("|");
    let modifiers = "[\u{FE0F}\u{1F3FB}-\u{1F3FF}]*";
    let pictograph = format!(r"\p{{Extended_Pictographic}}{modifiers}");
    Regex::new(&format!(
        "(?:{alternation})\u{FE0F}?[\u{1F3FB}-\u{1F3FF}]?\u{FE0F}?|{pictograph}(?:\u{200D}{pictograph})*"
    ))
    .expect("escaped emoji alternation is a valid regex")
});

/// Picks one phrase among several equally valid ones.
pub trait WordChooser {
    /// `options` is never empty.
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str;
}

impl<C: WordChooser + ?Sized> WordChooser for Box<C> {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        (**self).choose(options)
    }
}

/// Picks uniformly at random from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl WordChooser for RandomChooser {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[rand::rng().random_range(0..options.len())]
    }
}

/// Random, but reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct SeededChooser {
    rng: StdRng,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl WordChooser for SeededChooser {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.rng.random_range(0..options.len())]
    }
}

/// Always the closest sense.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl WordChooser for FirstChooser {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[0]
    }
}

/// Replaces every known emoji with a descriptive phrase, padded with spaces.
///
/// Unknown glyphs and all other characters are left as they are.
pub fn demojify(text: &str, chooser: &mut dyn WordChooser) -> String {
    PATTERN
        .replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            let glyph = matched.trim_end_matches(|c: char| {
                c == '\u{FE0F}' || ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
            });
            match LOOKUP.get(glyph) {
                Some(options) if !options.is_empty() => format!(" {} ", chooser.choose(options)),
                _ => match short_name(matched, glyph) {
                    Some(name) => format!(" {name} "),
                    None => matched.to_string(),
                },
            }
        })
        .into_owned()
}

/// CLDR short name of a glyph outside the table, as plain words
/// (`upside-down face` → `upside down face`).
fn short_name(matched: &str, base: &str) -> Option<String> {
    let emoji = emojis::get(base)
        .or_else(|| emojis::get(&format!("{base}\u{FE0F}")))
        .or_else(|| emojis::get(matched))?;
    let words: String = emoji
        .name()
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();
    let words = words.split_whitespace().collect::<Vec<_>>().join(" ");
    (!words.is_empty()).then_some(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_at_least_one_phrase() {
        for (glyph, phrases) in EMOJI_TABLE {
            assert!(!phrases.is_empty(), "{glyph} has no phrase");
            assert!(phrases.iter().all(|p| !p.trim().is_empty()));
        }
        assert_eq!(LOOKUP.len(), EMOJI_TABLE.len(), "duplicate glyph in table");
    }

    #[test]
    fn every_entry_translates_to_its_first_phrase() {
        for (glyph, phrases) in EMOJI_TABLE {
            assert_eq!(demojify(glyph, &mut FirstChooser).trim(), phrases[0]);
        }
    }

    #[test]
    fn variation_selector_and_skin_tone_are_consumed() {
        assert_eq!(demojify("❤\u{FE0F}", &mut FirstChooser), " love ");
        assert_eq!(demojify("👍\u{1F3FD}", &mut FirstChooser), " thumbs up ");
    }

    #[test]
    fn zwj_sequence_wins_over_its_base() {
        let out = demojify("🤦\u{200D}♂\u{FE0F} again", &mut FirstChooser);
        assert_eq!(out, " facepalm  again");
    }

    #[test]
    fn non_emoji_text_is_untouched() {
        let text = "Plain text, with :) and 123";
        assert_eq!(demojify(text, &mut FirstChooser), text);
        assert_eq!(
            demojify("unknown \u{1FC00} glyph", &mut FirstChooser),
            "unknown \u{1FC00} glyph"
        );
    }

    #[test]
    fn glyphs_outside_the_table_use_their_short_name() {
        for (glyph, name) in [
            ("💙", "blue heart"),
            ("💜", "purple heart"),
            ("🧡", "orange heart"),
            ("🥺", "pleading face"),
            ("🙃", "upside down face"),
            ("😬", "grimacing face"),
            ("😞", "disappointed face"),
            ("🤝", "handshake"),
            ("🤞", "crossed fingers"),
            ("✌\u{FE0F}", "victory hand"),
            ("🦩", "flamingo"),
        ] {
            assert!(!LOOKUP.contains_key(glyph.trim_end_matches('\u{FE0F}')));
            assert_eq!(demojify(glyph, &mut FirstChooser).trim(), name, "glyph {glyph}");
        }
    }

    #[test]
    fn short_name_keeps_skin_tone_and_neighbours_apart() {
        assert_eq!(demojify("deal🤝🏽done", &mut FirstChooser), "deal handshake done");
    }

    #[test]
    fn seeded_chooser_is_reproducible() {
        let text = "😂😂😂😂😂😂";
        let a = demojify(text, &mut SeededChooser::new(7));
        let b = demojify(text, &mut SeededChooser::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn random_choice_stays_within_the_table() {
        let phrases = LOOKUP["😂"];
        for _ in 0..20 {
            let out = demojify("😂", &mut RandomChooser);
            assert!(phrases.contains(&out.trim()));
        }
    }
}
