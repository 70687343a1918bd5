//! Where posts come from.
//!
//! Scraping itself happens outside this crate; a [`PostSource`] only has to
//! hand back records with a text and a language tag. Sources are allowed to
//! over-fetch and to tag languages loosely, the analyzer filters again.

use crate::core::{Language, RawPost};
use crate::text::SearchQuery;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Supplier of raw posts for a query.
pub trait PostSource {
    /// Up to `hint` posts mentioning `query`, preferably in `language`.
    fn fetch(&self, query: &SearchQuery, language: Language, hint: usize) -> anyhow::Result<Vec<RawPost>>;
}

/// Posts exported as JSON Lines, one object per line.
///
/// Each object needs a `text` (or `tweet`) field and may carry a `language`
/// (or `lang`) tag; other fields are ignored.
#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    path: PathBuf,
}

impl JsonLinesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PostSource for JsonLinesSource {
    fn fetch(&self, query: &SearchQuery, language: Language, hint: usize) -> anyhow::Result<Vec<RawPost>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open posts file: {:?}", self.path))?;

        let mut posts = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            if posts.len() >= hint {
                break;
            }
            let line = line.with_context(|| format!("Failed to read {:?}", self.path))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RawPost>(&line) {
                Ok(post) if query.matches(&post.text) => posts.push(post),
                Ok(_) => {}
                Err(e) => tracing::warn!(line = index + 1, error = %e, "skipping malformed post"),
            }
        }

        tracing::info!(
            source = %self.path.display(),
            query = %query,
            language = language.code(),
            fetched = posts.len(),
            "fetched posts"
        );
        Ok(posts)
    }
}

/// In-memory posts, returned as-is up to the hint.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    posts: Vec<RawPost>,
}

impl VecSource {
    pub fn new(posts: Vec<RawPost>) -> Self {
        Self { posts }
    }
}

impl PostSource for VecSource {
    fn fetch(&self, query: &SearchQuery, _language: Language, hint: usize) -> anyhow::Result<Vec<RawPost>> {
        Ok(self
            .posts
            .iter()
            .filter(|post| query.matches(&post.text))
            .take(hint)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn query() -> SearchQuery {
        SearchQuery::new("#SquidGame", None).unwrap()
    }

    #[test]
    fn reads_matching_posts_and_skips_bad_lines() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, r#"{{"tweet": "Loved #SquidGame!", "language": "en", "id": 1}}"#)?;
        writeln!(file)?;
        writeln!(file, "not json")?;
        writeln!(file, r#"{{"text": "Football tonight", "lang": "en"}}"#)?;
        writeln!(file, r#"{{"text": "squidgame c'est nul", "lang": "fr"}}"#)?;

        let posts = JsonLinesSource::new(file.path()).fetch(&query(), Language::English, 10)?;
        assert_eq!(
            posts,
            vec![
                RawPost::new("Loved #SquidGame!", "en"),
                RawPost::new("squidgame c'est nul", "fr"),
            ]
        );
        Ok(())
    }

    #[test]
    fn stops_at_the_hint() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        for i in 0..10 {
            writeln!(file, r#"{{"text": "squidgame {i}", "language": "en"}}"#)?;
        }
        let posts = JsonLinesSource::new(file.path()).fetch(&query(), Language::English, 4)?;
        assert_eq!(posts.len(), 4);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = JsonLinesSource::new("/definitely/not/here.jsonl");
        assert!(source.fetch(&query(), Language::English, 10).is_err());
    }

    #[test]
    fn vec_source_filters_by_query() -> anyhow::Result<()> {
        let source = VecSource::new(vec![
            RawPost::new("SquidGame rocks", "en"),
            RawPost::new("unrelated", "en"),
        ]);
        let posts = source.fetch(&query(), Language::English, 10)?;
        assert_eq!(posts.len(), 1);
        Ok(())
    }
}
