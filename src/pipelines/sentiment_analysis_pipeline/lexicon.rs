//! Word-list classifier for running without model weights.

use super::model::SentimentClassifier;
use std::collections::HashMap;

/// Polarity word list over the supported languages, mapped onto the same five
/// ordinal labels as the star-rating model.
///
/// Every matched word contributes its polarity (-2..=2); a negation word flips
/// the next match. The mean polarity is rounded onto labels 0..=4.
pub struct LexiconClassifier {
    words: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let entries: &[(&str, f64)] = &[
            // strongly positive
            ("love", 2.0),
            ("amazing", 2.0),
            ("awesome", 2.0),
            ("excellent", 2.0),
            ("perfect", 2.0),
            ("best", 2.0),
            ("adore", 2.0),
            ("génial", 2.0),
            ("super", 1.5),
            ("toll", 1.5),
            ("geweldig", 2.0),
            ("increíble", 2.0),
            ("encanta", 2.0),
            // positive
            ("good", 1.0),
            ("great", 1.5),
            ("nice", 1.0),
            ("happy", 1.0),
            ("smile", 1.0),
            ("laughing", 1.0),
            ("wink", 0.5),
            ("fun", 1.0),
            ("like", 0.5),
            ("thanks", 1.0),
            ("bien", 1.0),
            ("bon", 1.0),
            ("gut", 1.0),
            ("goed", 1.0),
            ("bueno", 1.0),
            ("buena", 1.0),
            // negative
            ("bad", -1.0),
            ("sad", -1.0),
            ("boring", -1.0),
            ("annoyed", -1.0),
            ("confused", -0.5),
            ("angry", -1.5),
            ("crying", -1.0),
            ("mauvais", -1.0),
            ("schlecht", -1.0),
            ("slecht", -1.0),
            ("malo", -1.0),
            ("mala", -1.0),
            // strongly negative
            ("hate", -2.0),
            ("awful", -2.0),
            ("terrible", -2.0),
            ("worst", -2.0),
            ("horrible", -2.0),
            ("disgusting", -2.0),
            ("furious", -2.0),
            ("nul", -2.0),
        ];

        let negations = ["not", "no", "never", "ne", "pas", "nicht", "kein", "niet", "geen", "nunca"];

        Self {
            words: entries
                .iter()
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            negations: negations.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Adds or overrides a word; polarity is clamped to -2..=2.
    pub fn add_word(&mut self, word: &str, polarity: f64) {
        self.words
            .insert(word.to_lowercase(), polarity.clamp(-2.0, 2.0));
    }

    /// Mean polarity of the matched words, `None` if nothing matched.
    pub fn polarity(&self, text: &str) -> Option<f64> {
        let mut scores = Vec::new();
        let mut negate_next = false;

        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            if self.negations.contains(&word) {
                negate_next = true;
                continue;
            }
            if let Some(score) = self.words.get(&word) {
                scores.push(if negate_next { -score } else { *score });
                negate_next = false;
            }
        }

        (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<usize> {
        let polarity = self.polarity(text).unwrap_or(0.0);
        Ok((polarity.round().clamp(-2.0, 2.0) + 2.0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_above_neutral() {
        let lexicon = LexiconClassifier::new();
        assert!(lexicon.classify("i love this smile great").unwrap() >= 3);
    }

    #[test]
    fn negative_text_scores_below_neutral() {
        let lexicon = LexiconClassifier::new();
        assert_eq!(lexicon.classify("worst show ever so boring").unwrap(), 0);
    }

    #[test]
    fn unknown_words_are_neutral() {
        let lexicon = LexiconClassifier::new();
        assert_eq!(lexicon.classify("the cat sat").unwrap(), 2);
    }

    #[test]
    fn negation_flips_the_next_word() {
        let lexicon = LexiconClassifier::new();
        assert_eq!(lexicon.polarity("not good"), Some(-1.0));
        assert_eq!(lexicon.polarity("c'est pas bien"), Some(-1.0));
    }

    #[test]
    fn added_words_are_clamped() {
        let mut lexicon = LexiconClassifier::new();
        lexicon.add_word("Banger", 9.0);
        assert_eq!(lexicon.polarity("banger"), Some(2.0));
    }
}
