//! Text normalization: search term sanitizing, emoji translation and noise
//! stripping.
//!
//! ```rust
//! use sense_twitter::text::{clean, demojify, FirstChooser};
//!
//! let translated = demojify("Best show ever 😍 :) #SquidGame", &mut FirstChooser);
//! assert_eq!(clean(&translated), "best show ever love smile squidgame");
//! ```

pub mod clean;
pub mod emoji;
pub mod emoticons;
pub mod sanitize;

pub use clean::clean;
pub use emoji::{
    demojify, FirstChooser, RandomChooser, SeededChooser, WordChooser, EMOJI_TABLE,
    EMOJI_TABLE_VERSION,
};
pub use emoticons::{replace_emoticons, EMOTICONS, EMOTICON_TABLE_VERSION};
pub use sanitize::{sanitize, SearchQuery};

use crate::core::{CleanedPost, RawPost};

/// Runs emoji translation and then cleaning over one post.
pub fn normalize(post: &RawPost, chooser: &mut dyn WordChooser) -> CleanedPost {
    let translated = demojify(&post.text, chooser);
    CleanedPost {
        original: post.text.clone(),
        cleaned: clean(&translated),
    }
}
