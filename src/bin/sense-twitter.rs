//! Command line front end: fetch posts for a hashtag, score them, report.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sense_twitter::analysis::{BatchAnalyzer, FailurePolicy, Report, DEFAULT_MAX_WORDS, MAX_POSTS};
use sense_twitter::core::{AnalysisError, Language, RawPost};
use sense_twitter::pipelines::{LexiconClassifier, SentimentAnalysisPipelineBuilder, SentimentClassifier};
use sense_twitter::sources::{JsonLinesSource, PostSource};
use sense_twitter::text::{clean, demojify, RandomChooser, SearchQuery, SeededChooser, WordChooser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sense-twitter")]
#[command(about = "Sentiment analysis of social media posts about a hashtag")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score posts about one or two hashtags and print a report
    Analyze {
        /// Hashtag to analyse
        #[arg(long)]
        hashtag: String,

        /// Optional second hashtag
        #[arg(long)]
        hashtag2: Option<String>,

        /// Posts to analyse, as JSON Lines (`text`/`tweet` and `language`/`lang` fields)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// How many posts to analyse
        #[arg(short = 'n', long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..=MAX_POSTS as i64))]
        count: u16,

        /// Language of the posts: en, fr, de, nl, es (or the full name)
        #[arg(short = 'l', long, default_value = "en")]
        language: Language,

        /// Sentiment classifier
        #[arg(short = 'c', long, value_enum, default_value_t = ClassifierKind::Bert)]
        classifier: ClassifierKind,

        /// Run the model on CPU even if CUDA is available
        #[arg(long)]
        cpu: bool,

        /// Seed for picking among equivalent emoji descriptions
        #[arg(long)]
        seed: Option<u64>,

        /// Abort on the first classification failure instead of skipping the post
        #[arg(long)]
        fail_fast: bool,

        /// Write the scored posts to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a single text is cleaned
    Clean {
        text: String,

        /// Seed for picking among equivalent emoji descriptions
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassifierKind {
    /// nlptown/bert-base-multilingual-uncased-sentiment
    Bert,
    /// Built-in word list, no download needed
    Lexicon,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn chooser(seed: Option<u64>) -> Box<dyn WordChooser> {
    match seed {
        Some(seed) => Box::new(SeededChooser::new(seed)),
        None => Box::new(RandomChooser),
    }
}

fn load_classifier(kind: ClassifierKind, cpu: bool) -> anyhow::Result<Box<dyn SentimentClassifier>> {
    Ok(match kind {
        ClassifierKind::Lexicon => Box::new(LexiconClassifier::new()),
        ClassifierKind::Bert => {
            let mut builder = SentimentAnalysisPipelineBuilder::nlptown();
            if cpu {
                builder = builder.cpu();
            }
            Box::new(builder.build().context("loading the sentiment model")?)
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn analyze(
    hashtag: String,
    hashtag2: Option<String>,
    input: PathBuf,
    count: usize,
    language: Language,
    classifier: ClassifierKind,
    cpu: bool,
    seed: Option<u64>,
    fail_fast: bool,
    csv: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let query = SearchQuery::new(&hashtag, hashtag2.as_deref())?;
    tracing::info!(%query, count, %language, "starting analysis");

    let source = JsonLinesSource::new(input);
    let posts: Vec<RawPost> = source.fetch(&query, language, SearchQuery::fetch_hint(count))?;

    let policy = if fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::SkipAndContinue
    };
    let mut analyzer = BatchAnalyzer::new(load_classifier(classifier, cpu)?)
        .with_chooser(chooser(seed))
        .with_policy(policy);

    let results = analyzer.analyze(&posts, language, count)?;
    let report = Report::new(query.to_string(), &results, DEFAULT_MAX_WORDS);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    if let Some(path) = csv {
        results.write_csv(&path)?;
        if !json {
            println!("Results written to {}", path.display());
        }
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Analyze {
            hashtag,
            hashtag2,
            input,
            count,
            language,
            classifier,
            cpu,
            seed,
            fail_fast,
            csv,
            json,
        } => analyze(
            hashtag,
            hashtag2,
            input,
            usize::from(count),
            language,
            classifier,
            cpu,
            seed,
            fail_fast,
            csv,
            json,
        ),
        Commands::Clean { text, seed } => {
            let translated = demojify(&text, chooser(seed).as_mut());
            println!("{}", clean(&translated));
            Ok(())
        }
    }
}

/// What the user sees when a run fails.
fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::NoSearchTerm) => {
            "No usable hashtag: it needs at least one letter.".to_string()
        }
        Some(AnalysisError::InsufficientData { .. }) => {
            "Not enough data... Try with new hashtags.".to_string()
        }
        _ => format!("error: {err:#}"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", user_message(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hashtag_gets_a_friendly_message() {
        let err = anyhow::Error::from(AnalysisError::NoSearchTerm);
        assert_eq!(
            user_message(&err),
            "No usable hashtag: it needs at least one letter."
        );

        let err = SearchQuery::new("#2024!", None).map_err(anyhow::Error::from).unwrap_err();
        assert_eq!(
            user_message(&err),
            "No usable hashtag: it needs at least one letter."
        );
    }

    #[test]
    fn no_posts_asks_for_new_hashtags() {
        let err = anyhow::Error::from(AnalysisError::InsufficientData {
            language: "nl".to_string(),
        });
        assert_eq!(user_message(&err), "Not enough data... Try with new hashtags.");
    }

    #[test]
    fn other_failures_show_the_cause_chain() {
        let err = anyhow::Error::from(AnalysisError::Cancelled).context("analyzing #rust");
        assert_eq!(user_message(&err), "error: analyzing #rust: analysis cancelled");

        let err = anyhow::anyhow!("disk full").context("writing results.csv");
        assert_eq!(user_message(&err), "error: writing results.csv: disk full");
    }

    #[test]
    fn context_does_not_hide_insufficient_data() {
        let err = anyhow::Error::from(AnalysisError::InsufficientData {
            language: "en".to_string(),
        })
        .context("running analysis");
        assert_eq!(user_message(&err), "Not enough data... Try with new hashtags.");
    }

    #[test]
    fn cli_parses_analyze_defaults() {
        let cli = Cli::try_parse_from([
            "sense-twitter",
            "analyze",
            "--hashtag",
            "SquidGame",
            "--input",
            "posts.jsonl",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                count,
                language,
                classifier,
                ..
            } => {
                assert_eq!(count, 100);
                assert_eq!(language, Language::English);
                assert!(matches!(classifier, ClassifierKind::Bert));
            }
            Commands::Clean { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn cli_rejects_counts_outside_the_batch_bounds() {
        for count in ["0", "1001"] {
            let parsed = Cli::try_parse_from([
                "sense-twitter",
                "analyze",
                "--hashtag",
                "SquidGame",
                "--input",
                "posts.jsonl",
                "--count",
                count,
            ]);
            assert!(parsed.is_err(), "count {count}");
        }
    }
}
