use super::model::{SentimentAnalysisModel, SentimentClassifier};
use tokenizers::Tokenizer;

/// A loaded model paired with its tokenizer.
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Index of the most likely label for `text`.
    pub fn predict(&self, text: &str) -> anyhow::Result<usize> {
        self.model.predict(&self.tokenizer, text)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M: SentimentAnalysisModel> SentimentClassifier for SentimentAnalysisPipeline<M> {
    fn classify(&self, text: &str) -> anyhow::Result<usize> {
        self.predict(text)
    }

    fn num_labels(&self) -> usize {
        self.model.num_labels()
    }
}
