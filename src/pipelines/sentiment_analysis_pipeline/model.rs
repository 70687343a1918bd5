use tokenizers::Tokenizer;

/// Anything that can put a label on a piece of cleaned text.
///
/// This is the whole contract the scoring stage relies on: a 0-based index
/// into a fixed set of ordinal labels, most negative first.
pub trait SentimentClassifier {
    /// Index of the most likely label for `text`.
    fn classify(&self, text: &str) -> anyhow::Result<usize>;

    /// Size of the label set.
    fn num_labels(&self) -> usize {
        5
    }
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for &C {
    fn classify(&self, text: &str) -> anyhow::Result<usize> {
        (**self).classify(text)
    }

    fn num_labels(&self) -> usize {
        (**self).num_labels()
    }
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for Box<C> {
    fn classify(&self, text: &str) -> anyhow::Result<usize> {
        (**self).classify(text)
    }

    fn num_labels(&self) -> usize {
        (**self).num_labels()
    }
}

/// A neural model that can be loaded onto a device and run with a tokenizer.
pub trait SentimentAnalysisModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> anyhow::Result<usize>;

    fn get_tokenizer(&self, options: Self::Options) -> anyhow::Result<Tokenizer>;

    fn num_labels(&self) -> usize;

    fn device(&self) -> &candle_core::Device;
}
