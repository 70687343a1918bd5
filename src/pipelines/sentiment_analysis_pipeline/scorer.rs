use super::model::SentimentClassifier;
use crate::core::{AnalysisError, Result, Sentiment};

/// Turns a classifier's label index into a [`Sentiment`].
///
/// Empty text carries no signal and is scored neutral without consulting the
/// classifier. Classifier failures, out-of-range labels and classifiers on a
/// scale other than five labels are errors, never a silent neutral.
pub struct SentimentScorer<C> {
    classifier: C,
}

/// Labels a classifier must expose, one per point of the 1–5 scale.
pub const LABEL_COUNT: usize = Sentiment::MAX.value() as usize;

impl<C: SentimentClassifier> SentimentScorer<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Like [`new`](Self::new), but refuses a classifier whose label set is
    /// not the five-point scale.
    pub fn try_new(classifier: C) -> Result<Self> {
        let scorer = Self::new(classifier);
        scorer.check_labels()?;
        Ok(scorer)
    }

    /// Fails with [`AnalysisError::ClassificationUnavailable`] unless the
    /// classifier has exactly [`LABEL_COUNT`] labels.
    pub fn check_labels(&self) -> Result<()> {
        let labels = self.classifier.num_labels();
        if labels == LABEL_COUNT {
            Ok(())
        } else {
            Err(AnalysisError::ClassificationUnavailable(format!(
                "classifier has {labels} labels, expected {LABEL_COUNT}"
            )))
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn score(&self, cleaned: &str) -> Result<Sentiment> {
        self.check_labels()?;
        if cleaned.trim().is_empty() {
            return Ok(Sentiment::NEUTRAL);
        }

        let index = self
            .classifier
            .classify(cleaned)
            .map_err(AnalysisError::classification)?;

        Sentiment::from_label_index(index).ok_or_else(|| {
            AnalysisError::ClassificationUnavailable(format!(
                "label index {index} is outside the 5-point scale"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        index: usize,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn new(index: usize) -> Self {
            Self {
                index,
                calls: Cell::new(0),
            }
        }
    }

    impl SentimentClassifier for Fixed {
        fn classify(&self, _text: &str) -> anyhow::Result<usize> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.index)
        }
    }

    struct Offline;

    impl SentimentClassifier for Offline {
        fn classify(&self, _text: &str) -> anyhow::Result<usize> {
            anyhow::bail!("model not loaded")
        }
    }

    #[test]
    fn label_index_is_shifted_by_one() {
        for index in 0..5 {
            let scorer = SentimentScorer::new(Fixed::new(index));
            assert_eq!(scorer.score("words").unwrap().value() as usize, index + 1);
        }
    }

    #[test]
    fn empty_text_is_neutral_without_calling_the_classifier() {
        let scorer = SentimentScorer::new(Fixed::new(4));
        assert_eq!(scorer.score("").unwrap(), Sentiment::NEUTRAL);
        assert_eq!(scorer.score("   ").unwrap(), Sentiment::NEUTRAL);
        assert_eq!(scorer.classifier().calls.get(), 0);
    }

    #[test]
    fn out_of_range_label_is_an_error() {
        let scorer = SentimentScorer::new(Fixed::new(5));
        assert!(matches!(
            scorer.score("words"),
            Err(AnalysisError::ClassificationUnavailable(_))
        ));
    }

    struct Binary;

    impl SentimentClassifier for Binary {
        fn classify(&self, _text: &str) -> anyhow::Result<usize> {
            Ok(1)
        }

        fn num_labels(&self) -> usize {
            2
        }
    }

    #[test]
    fn classifier_on_another_scale_is_rejected() {
        assert!(matches!(
            SentimentScorer::try_new(Binary),
            Err(AnalysisError::ClassificationUnavailable(_))
        ));
        assert!(SentimentScorer::try_new(Fixed::new(0)).is_ok());

        let scorer = SentimentScorer::new(Binary);
        assert!(matches!(
            scorer.score("words"),
            Err(AnalysisError::ClassificationUnavailable(_))
        ));
        assert!(scorer.score("").is_err());
    }

    #[test]
    fn classifier_failure_is_not_neutral() {
        let scorer = SentimentScorer::new(Offline);
        let err = scorer.score("words").unwrap_err();
        assert!(err.to_string().contains("model not loaded"));
    }
}
