//! Sentiment scoring of cleaned post text.
//!
//! The scorer only needs a [`SentimentClassifier`]: something that maps text to
//! the index of one of five ordinal labels. Two are provided:
//!
//! - [`SentimentAnalysisPipeline`] over a [`BertSentimentModel`], the
//!   multilingual five-star review model, loaded through
//!   [`SentimentAnalysisPipelineBuilder`]
//! - [`LexiconClassifier`], a small word list that needs no weights
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sense_twitter::pipelines::sentiment_analysis_pipeline::*;
//!
//! # fn run() -> anyhow::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::nlptown().cpu().build()?;
//! let scorer = SentimentScorer::new(pipeline);
//!
//! let sentiment = scorer.score("i love this smile great")?;
//! println!("Sentiment: {sentiment}/5");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod lexicon;
pub mod model;
pub mod pipeline;
pub mod scorer;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use lexicon::LexiconClassifier;
pub use model::{SentimentAnalysisModel, SentimentClassifier};
pub use pipeline::SentimentAnalysisPipeline;
pub use scorer::{SentimentScorer, LABEL_COUNT};

pub use crate::models::implementations::bert::{
    BertSentimentModel, BertSentimentOptions, LocalModelFiles,
};
