//! Hashtag sentiment analysis.
//!
//! Posts mentioning a hashtag go through a fixed per-post pipeline and are
//! then aggregated:
//!
//! 1. [`text::demojify`] turns emoji into descriptive words
//! 2. [`text::clean`] lowercases and strips links, emoticons, mentions,
//!    digits and punctuation
//! 3. [`pipelines::SentimentScorer`] asks a classifier for a 1–5 score
//! 4. [`analysis::BatchAnalyzer`] filters by language, bounds the batch and
//!    builds a [`analysis::ResultSet`] with histogram, mean, word lists and
//!    CSV export

pub mod analysis;
pub mod core;
pub mod models;
pub mod pipelines;
pub mod sources;
pub mod text;

pub use crate::analysis::{BatchAnalyzer, FailurePolicy, Report, ResultSet};
pub use crate::core::{AnalysisError, CleanedPost, Language, RawPost, ScoredPost, Sentiment};
pub use crate::text::SearchQuery;
