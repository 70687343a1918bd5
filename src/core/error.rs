use thiserror::Error;

/// Errors surfaced by a sentiment analysis run.
///
/// Each variant is a distinct outcome the caller is expected to present
/// differently; in particular "no data" is never reported as an empty success
/// and a classifier failure is never reported as a neutral score.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Every search term was empty after sanitization.
    #[error("no usable search term")]
    NoSearchTerm,

    /// The requested post count is outside `1..=MAX_POSTS`.
    #[error("post count {0} is out of range (expected 1..={max})", max = crate::analysis::MAX_POSTS)]
    InvalidLimit(usize),

    /// Nothing was left after language filtering and truncation.
    #[error("not enough data in language '{language}', try with new hashtags")]
    InsufficientData { language: String },

    /// The sentiment classifier could not produce a label.
    #[error("classification unavailable: {0}")]
    ClassificationUnavailable(String),

    /// The run was aborted between two posts.
    #[error("analysis cancelled")]
    Cancelled,

    /// The result set could not be written as CSV.
    #[error("export failed: {0}")]
    Export(String),
}

impl AnalysisError {
    /// Wraps any classifier failure, keeping the full cause chain in the message.
    pub fn classification(err: anyhow::Error) -> Self {
        AnalysisError::ClassificationUnavailable(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
