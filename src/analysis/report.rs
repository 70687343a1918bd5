//! Serializable summary of a run.

use super::result_set::ResultSet;
use serde::Serialize;
use std::fmt;

/// What the report would show: histogram, mean and word lists.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub query: String,
    pub language: &'static str,
    pub analyzed: usize,
    pub skipped: usize,
    /// Rounded to two decimals.
    pub mean: f64,
    pub histogram: [usize; 5],
    /// `"split"` when positive and negative word lists are included,
    /// `"aggregate_only"` otherwise.
    pub view: &'static str,
    pub top_words: Vec<WordList>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordList {
    pub bucket: &'static str,
    pub words: Vec<(String, usize)>,
}

impl Report {
    pub fn new(query: impl Into<String>, results: &ResultSet, max_words: usize) -> Self {
        let view = if results.corpora().is_split() {
            "split"
        } else {
            "aggregate_only"
        };

        Self {
            query: query.into(),
            language: results.language().code(),
            analyzed: results.len(),
            skipped: results.skipped(),
            mean: (results.mean() * 100.0).round() / 100.0,
            histogram: results.histogram(),
            view,
            top_words: results
                .top_words(max_words)
                .into_iter()
                .map(|(bucket, words)| WordList {
                    bucket: bucket.name(),
                    words,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sentiment analysis of #{} ({})", self.query, self.language)?;
        writeln!(f, "Posts analyzed: {}", self.analyzed)?;
        if self.skipped > 0 {
            writeln!(f, "Posts skipped (classification failed): {}", self.skipped)?;
        }
        writeln!(f, "Average sentiment score: {:.2}/5", self.mean)?;
        writeln!(f, "Score distribution:")?;
        let widest = self.histogram.iter().copied().max().unwrap_or(0).max(1);
        for (i, count) in self.histogram.iter().enumerate() {
            let bar = "#".repeat(count * 40 / widest);
            writeln!(f, "  {} | {bar} {count}", i + 1)?;
        }
        for list in &self.top_words {
            let words: Vec<String> = list
                .words
                .iter()
                .take(15)
                .map(|(w, c)| format!("{w}({c})"))
                .collect();
            writeln!(f, "Top words, {}: {}", list.bucket, words.join(" "))?;
        }
        if self.view == "aggregate_only" {
            writeln!(
                f,
                "Not enough positive and negative posts for separate word lists."
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Language, ScoredPost, Sentiment};

    fn results(values: &[u8]) -> ResultSet {
        let posts = values
            .iter()
            .map(|v| ScoredPost {
                original: String::new(),
                cleaned: format!("word{v} common"),
                sentiment: Sentiment::new(*v).unwrap(),
            })
            .collect();
        ResultSet::new(posts, Language::German, 2).unwrap()
    }

    #[test]
    fn report_rounds_mean_and_marks_split_view() {
        let report = Report::new("SquidGame", &results(&[1, 5, 5]), 10);
        assert_eq!(report.mean, 3.67);
        assert_eq!(report.view, "split");
        assert_eq!(report.language, "de");
        assert_eq!(report.top_words.len(), 3);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn one_sided_report_only_has_the_aggregate() {
        let report = Report::new("SquidGame", &results(&[3, 4]), 10);
        assert_eq!(report.view, "aggregate_only");
        assert_eq!(report.top_words.len(), 1);
        assert!(report.to_string().contains("Not enough positive and negative posts"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = Report::new("rust", &results(&[2]), 5);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["histogram"], serde_json::json!([0, 1, 0, 0, 0]));
        assert_eq!(json["top_words"][0]["bucket"], "all");
    }
}
