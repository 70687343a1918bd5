pub mod cache;
pub mod error;
pub mod post;

pub use cache::{global_cache, ModelCache, ModelOptions};
pub use error::{AnalysisError, Result};
pub use post::{CleanedPost, Language, RawPost, ScoredPost, Sentiment};
