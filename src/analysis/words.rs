//! Word counts behind the word cloud views.

use std::collections::HashMap;

/// Default number of words kept per corpus.
pub const DEFAULT_MAX_WORDS: usize = 100;

/// Common English function words that would otherwise dominate every cloud.
pub static STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had",
    "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "me", "my", "of", "on", "or", "our", "out", "she", "so", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "to", "too", "up", "us",
    "was", "we", "were", "what", "when", "where", "which", "who", "why", "will", "with", "would",
    "you", "your",
];

/// The `max_words` most frequent words of `text`, stop words excluded.
///
/// Sorted by count, most frequent first; equal counts are ordered
/// alphabetically so the output is stable.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        if !STOP_WORDS.contains(&word) {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_words);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_words() {
        let freq = word_frequencies("great show great cast bad ending great cast", 10);
        assert_eq!(
            freq,
            vec![
                ("great".to_string(), 3),
                ("cast".to_string(), 2),
                ("bad".to_string(), 1),
                ("ending".to_string(), 1),
                ("show".to_string(), 1),
            ]
        );
    }

    #[test]
    fn stop_words_are_ignored_and_output_is_capped() {
        let freq = word_frequencies("the show and the cast and the music", 2);
        assert_eq!(freq, vec![("cast".to_string(), 1), ("music".to_string(), 1)]);
    }

    #[test]
    fn empty_corpus_has_no_words() {
        assert!(word_frequencies("", DEFAULT_MAX_WORDS).is_empty());
    }
}
