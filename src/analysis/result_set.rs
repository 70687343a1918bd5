use super::words::word_frequencies;
use crate::core::{Language, ScoredPost, Sentiment};

/// Partition of a result set by sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    All,
    /// Score above the neutral midpoint.
    Positive,
    /// Score below the neutral midpoint.
    Negative,
    /// Exactly the midpoint; part of neither positive nor negative.
    Neutral,
}

impl Bucket {
    pub fn contains(self, sentiment: Sentiment) -> bool {
        match self {
            Bucket::All => true,
            Bucket::Positive => sentiment.is_positive(),
            Bucket::Negative => sentiment.is_negative(),
            Bucket::Neutral => sentiment.is_neutral(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Bucket::All => "all",
            Bucket::Positive => "positive",
            Bucket::Negative => "negative",
            Bucket::Neutral => "neutral",
        }
    }
}

/// Space-joined cleaned text per bucket, for word frequency views.
///
/// Bucketed corpora are only offered when both the positive and the negative
/// side have at least one post; otherwise only the aggregate is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpora {
    Split {
        all: String,
        positive: String,
        negative: String,
    },
    AggregateOnly {
        all: String,
    },
}

impl Corpora {
    pub fn is_split(&self) -> bool {
        matches!(self, Corpora::Split { .. })
    }

    pub fn all(&self) -> &str {
        match self {
            Corpora::Split { all, .. } | Corpora::AggregateOnly { all } => all,
        }
    }

    /// `(bucket, corpus)` pairs in display order.
    pub fn entries(&self) -> Vec<(Bucket, &str)> {
        match self {
            Corpora::Split {
                all,
                positive,
                negative,
            } => vec![
                (Bucket::All, all.as_str()),
                (Bucket::Positive, positive.as_str()),
                (Bucket::Negative, negative.as_str()),
            ],
            Corpora::AggregateOnly { all } => vec![(Bucket::All, all.as_str())],
        }
    }
}

/// The scored posts of one analysis run, in fetch order.
///
/// Never empty: a run with nothing to score is reported as an error instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    posts: Vec<ScoredPost>,
    language: Language,
    skipped: usize,
}

impl ResultSet {
    /// `None` when `posts` is empty.
    pub fn new(posts: Vec<ScoredPost>, language: Language, skipped: usize) -> Option<Self> {
        (!posts.is_empty()).then_some(Self {
            posts,
            language,
            skipped,
        })
    }

    pub fn posts(&self) -> &[ScoredPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Posts dropped because the classifier failed on them.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn mean(&self) -> f64 {
        let total: u64 = self
            .posts
            .iter()
            .map(|p| u64::from(p.sentiment.value()))
            .sum();
        total as f64 / self.posts.len() as f64
    }

    /// Post count per score, index 0 holding score 1.
    pub fn histogram(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for post in &self.posts {
            counts[usize::from(post.sentiment.value()) - 1] += 1;
        }
        counts
    }

    pub fn iter_bucket(&self, bucket: Bucket) -> impl Iterator<Item = &ScoredPost> + '_ {
        self.posts
            .iter()
            .filter(move |p| bucket.contains(p.sentiment))
    }

    pub fn positive(&self) -> Vec<&ScoredPost> {
        self.iter_bucket(Bucket::Positive).collect()
    }

    pub fn negative(&self) -> Vec<&ScoredPost> {
        self.iter_bucket(Bucket::Negative).collect()
    }

    pub fn neutral(&self) -> Vec<&ScoredPost> {
        self.iter_bucket(Bucket::Neutral).collect()
    }

    /// Cleaned text of every post in `bucket`, joined by single spaces.
    pub fn corpus(&self, bucket: Bucket) -> String {
        self.iter_bucket(bucket)
            .map(|p| p.cleaned.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn corpora(&self) -> Corpora {
        let all = self.corpus(Bucket::All);
        let has_both = self.iter_bucket(Bucket::Positive).next().is_some()
            && self.iter_bucket(Bucket::Negative).next().is_some();

        if has_both {
            Corpora::Split {
                all,
                positive: self.corpus(Bucket::Positive),
                negative: self.corpus(Bucket::Negative),
            }
        } else {
            Corpora::AggregateOnly { all }
        }
    }

    /// Most frequent words per available corpus.
    pub fn top_words(&self, max_words: usize) -> Vec<(Bucket, Vec<(String, usize)>)> {
        self.corpora()
            .entries()
            .into_iter()
            .map(|(bucket, text)| (bucket, word_frequencies(text, max_words)))
            .collect()
    }
}
