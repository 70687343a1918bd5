//! Batch analysis: filter, normalize and score a collection of posts.
//!
//! ```rust
//! use sense_twitter::analysis::BatchAnalyzer;
//! use sense_twitter::core::{Language, RawPost};
//! use sense_twitter::pipelines::LexiconClassifier;
//! use sense_twitter::text::FirstChooser;
//!
//! let posts = vec![
//!     RawPost::new("I love this! :) #great", "en"),
//!     RawPost::new("J'adore !", "fr"),
//! ];
//! let mut analyzer = BatchAnalyzer::new(LexiconClassifier::new()).with_chooser(FirstChooser);
//! let results = analyzer.analyze(&posts, Language::English, 100).unwrap();
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results.posts()[0].cleaned, "i love this smile great");
//! ```

pub mod export;
pub mod report;
pub mod result_set;
pub mod words;

pub use report::{Report, WordList};
pub use result_set::{Bucket, Corpora, ResultSet};
pub use words::{word_frequencies, DEFAULT_MAX_WORDS, STOP_WORDS};

use crate::core::{AnalysisError, Language, RawPost, Result, ScoredPost};
use crate::pipelines::sentiment_analysis_pipeline::{SentimentClassifier, SentimentScorer};
use crate::text::{normalize, RandomChooser, WordChooser};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Largest number of posts a single run may analyze.
pub const MAX_POSTS: usize = 1000;

/// What to do when the classifier fails on one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Drop the post, count it as skipped and carry on.
    #[default]
    SkipAndContinue,
    /// Abort the whole run.
    FailFast,
}

/// Shared flag to abort a run between two posts.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs demojify → clean → score over a batch of posts.
pub struct BatchAnalyzer<C> {
    scorer: SentimentScorer<C>,
    chooser: Box<dyn WordChooser>,
    policy: FailurePolicy,
    cancellation: Option<CancellationFlag>,
}

impl<C: SentimentClassifier> BatchAnalyzer<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            scorer: SentimentScorer::new(classifier),
            chooser: Box::new(RandomChooser),
            policy: FailurePolicy::default(),
            cancellation: None,
        }
    }

    pub fn with_chooser(mut self, chooser: impl WordChooser + 'static) -> Self {
        self.chooser = Box::new(chooser);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub fn scorer(&self) -> &SentimentScorer<C> {
        &self.scorer
    }

    /// Analyzes the first `limit` posts tagged with `language`.
    ///
    /// Fetch order is preserved. A classifier without exactly five labels is
    /// refused before any post is read. Fails with [`AnalysisError::InsufficientData`]
    /// when no post is left after filtering, and with
    /// [`AnalysisError::ClassificationUnavailable`] when the classifier fails
    /// (on any post under [`FailurePolicy::FailFast`], on every post otherwise).
    pub fn analyze(&mut self, posts: &[RawPost], language: Language, limit: usize) -> Result<ResultSet> {
        if limit == 0 || limit > MAX_POSTS {
            return Err(AnalysisError::InvalidLimit(limit));
        }
        self.scorer.check_labels()?;

        let selected: Vec<&RawPost> = posts
            .iter()
            .filter(|post| post.is_in(language))
            .take(limit)
            .collect();

        tracing::info!(
            fetched = posts.len(),
            kept = selected.len(),
            language = language.code(),
            limit,
            "filtered posts"
        );

        if selected.is_empty() {
            return Err(AnalysisError::InsufficientData {
                language: language.code().to_string(),
            });
        }

        let mut scored = Vec::with_capacity(selected.len());
        let mut skipped = 0;
        let mut last_failure = None;

        for (position, post) in selected.into_iter().enumerate() {
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationFlag::is_cancelled)
            {
                tracing::warn!(position, "analysis cancelled");
                return Err(AnalysisError::Cancelled);
            }

            let cleaned = normalize(post, self.chooser.as_mut());
            tracing::debug!(position, cleaned = %cleaned.cleaned, "normalized post");

            match self.scorer.score(&cleaned.cleaned) {
                Ok(sentiment) => scored.push(ScoredPost::new(cleaned, sentiment)),
                Err(err) if self.policy == FailurePolicy::SkipAndContinue => {
                    tracing::warn!(position, error = %err, "skipping post");
                    skipped += 1;
                    last_failure = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        let results = match ResultSet::new(scored, language, skipped) {
            Some(results) => results,
            None => {
                return Err(last_failure.unwrap_or_else(|| {
                    AnalysisError::ClassificationUnavailable("no post could be scored".to_string())
                }))
            }
        };

        tracing::info!(
            analyzed = results.len(),
            skipped,
            mean = results.mean(),
            "analysis finished"
        );
        Ok(results)
    }
}
