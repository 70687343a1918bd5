use proptest::prelude::*;
use sense_twitter::analysis::{BatchAnalyzer, Bucket, ResultSet};
use sense_twitter::core::{Language, RawPost, ScoredPost, Sentiment};
use sense_twitter::pipelines::{LexiconClassifier, SentimentClassifier, SentimentScorer};
use sense_twitter::text::{clean, demojify, sanitize, FirstChooser, SeededChooser};

/// Tweet-like text: words, hashtags, mentions, urls, emoticons, emoji, numbers,
/// control characters.
fn post_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Zéü]{1,8}",
        "#[A-Za-z]{1,8}",
        "@[a-z_]{1,8}",
        "https?://[a-z]{1,6}\\.com/[a-z0-9]{0,5}",
        "www\\.[a-z]{1,6}\\.org",
        Just(":)".to_string()),
        Just(":-(".to_string()),
        Just("XD".to_string()),
        Just("<3".to_string()),
        Just("😂".to_string()),
        Just("🔥".to_string()),
        Just("👍🏽".to_string()),
        "[0-9]{1,4}",
        "[½²³٣\u{7}]{1,3}",
        Just("💙".to_string()),
        Just("🙃".to_string()),
        "[!?.,;:'\"()-]{1,3}",
    ];
    prop::collection::vec(piece, 0..12).prop_map(|pieces| pieces.join(" "))
}

fn result_set(values: Vec<u8>) -> ResultSet {
    let posts = values
        .into_iter()
        .enumerate()
        .map(|(i, v)| ScoredPost {
            original: format!("post {i}"),
            cleaned: "post".to_string(),
            sentiment: Sentiment::new(v).unwrap(),
        })
        .collect();
    ResultSet::new(posts, Language::English, 0).unwrap()
}

/// Returns whatever label it is given, modulo the label count.
struct Echo(usize);

impl SentimentClassifier for Echo {
    fn classify(&self, _text: &str) -> anyhow::Result<usize> {
        Ok(self.0 % 5)
    }
}

proptest! {
    #[test]
    fn clean_is_idempotent(text in post_text(), seed in any::<u64>()) {
        let once = clean(&demojify(&text, &mut SeededChooser::new(seed)));
        prop_assert_eq!(clean(&once), once.clone());
    }

    #[test]
    fn clean_output_is_lowercase_words(text in post_text()) {
        let cleaned = clean(&demojify(&text, &mut FirstChooser));
        prop_assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
        prop_assert!(!cleaned.contains("  "));
        for c in cleaned.chars() {
            prop_assert!(c == ' ' || (c.is_alphabetic() && !c.is_uppercase()), "unexpected {:?}", c);
        }
    }

    #[test]
    fn sanitize_keeps_only_letters(raw in ".{0,40}") {
        let out = sanitize(&raw);
        prop_assert!(out.chars().all(char::is_alphabetic));
        prop_assert_eq!(sanitize(&out), out.clone());
    }

    #[test]
    fn scores_stay_on_the_five_point_scale(text in post_text(), label in 0usize..5) {
        let lexicon = SentimentScorer::new(LexiconClassifier::new());
        let score = lexicon.score(&clean(&text)).unwrap().value();
        prop_assert!((1..=5).contains(&score));

        let echoed = SentimentScorer::new(Echo(label)).score("some text").unwrap();
        prop_assert_eq!(usize::from(echoed.value()), label + 1);
    }

    #[test]
    fn buckets_partition_the_result_set(values in prop::collection::vec(1u8..=5, 1..80)) {
        let results = result_set(values);
        let positive = results.iter_bucket(Bucket::Positive).count();
        let negative = results.iter_bucket(Bucket::Negative).count();
        let neutral = results.iter_bucket(Bucket::Neutral).count();
        prop_assert_eq!(positive + negative + neutral, results.len());
        let each_in_exactly_one_bucket = results.posts().iter().all(|p| {
            [Bucket::Positive, Bucket::Negative, Bucket::Neutral]
                .iter()
                .filter(|b| b.contains(p.sentiment))
                .count()
                == 1
        });
        prop_assert!(each_in_exactly_one_bucket);
        prop_assert_eq!(results.histogram().iter().sum::<usize>(), results.len());
    }

    #[test]
    fn mean_is_within_scale(values in prop::collection::vec(1u8..=5, 1..80)) {
        let mean = result_set(values).mean();
        prop_assert!((1.0..=5.0).contains(&mean));
    }

    #[test]
    fn all_neutral_means_three(count in 1usize..200) {
        let results = result_set(vec![3; count]);
        prop_assert_eq!(results.mean(), 3.0);
        prop_assert!(!results.corpora().is_split());
    }

    #[test]
    fn analysis_keeps_order_and_limit(
        langs in prop::collection::vec(prop_oneof![Just("en"), Just("fr"), Just("de")], 1..60),
        limit in 1usize..40,
    ) {
        let posts: Vec<RawPost> = langs
            .iter()
            .enumerate()
            .map(|(i, lang)| RawPost::new(format!("post {}", "x".repeat(i + 1)), *lang))
            .collect();
        let expected: Vec<String> = posts
            .iter()
            .filter(|p| p.language == "en")
            .take(limit)
            .map(|p| p.text.clone())
            .collect();

        let outcome = BatchAnalyzer::new(LexiconClassifier::new())
            .with_chooser(FirstChooser)
            .analyze(&posts, Language::English, limit);

        match outcome {
            Ok(results) => {
                let originals: Vec<String> = results.posts().iter().map(|p| p.original.clone()).collect();
                prop_assert_eq!(originals, expected);
            }
            Err(_) => prop_assert!(expected.is_empty()),
        }
    }
}
