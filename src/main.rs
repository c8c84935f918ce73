use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use reviewer::config::Config;
use reviewer::ctfidf::ranking::RankedTermList;
use reviewer::ctfidf::vectorizer::StopWords;
use reviewer::output::terminal;
use reviewer::pipeline::generate::{self, Artifact, RunSummary};

/// Terms per title printed after a run.
const PREVIEW_TERMS: usize = 5;

/// Reviewer: the most characteristic words of each movie.
///
/// Scores every term in a movie's reviews against the reviews of all other
/// movies using class-based TF-IDF, or simply counts the most frequent words.
#[derive(Parser)]
#[command(name = "reviewer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank terms for a review file and save them as JSON
    Generate {
        /// JSON file mapping movie titles to lists of reviews
        #[arg(long)]
        review_path: PathBuf,

        /// Output name prefix (writes <prefix>_count.json or <prefix>_tfidf.json)
        #[arg(long)]
        save_prefix: String,

        /// Use class-based TF-IDF instead of plain top-N word counts
        #[arg(long)]
        class_tfidf: bool,

        /// Highest n-gram length (the lowest is always 1)
        #[arg(long, default_value = "1")]
        max_ngram: usize,

        /// Rank by relative importance (writes <prefix>_tfidf_relative.json)
        #[arg(long)]
        relative: bool,

        /// Terms kept per title (default: REVIEWER_TOP_N or 2000)
        #[arg(long)]
        top_n: Option<usize>,

        /// Output directory (default: REVIEWER_DATA_DIR or ./data)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Stop-word policy: "english" or "none"
        #[arg(long)]
        stop_words: Option<StopWords>,
    },

    /// Score the Disney/Pixar review set (<data-dir>/disney_reviews.json, n-grams up to 3)
    Disney {
        /// Output directory (default: REVIEWER_DATA_DIR or ./data)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the leading terms of a previously written output file
    Show {
        /// Path to a *_count.json or *_tfidf*.json file
        path: PathBuf,

        /// Terms to show per title (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reviewer=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            review_path,
            save_prefix,
            class_tfidf,
            max_ngram,
            relative,
            top_n,
            data_dir,
            stop_words,
        } => {
            let mut config = Config::load()?;
            config.review_path = review_path;
            config.save_prefix = save_prefix;
            config.class_tfidf = class_tfidf;
            config.max_ngram = max_ngram;
            config.relative = relative;
            if let Some(n) = top_n {
                config.top_n = n;
            }
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            if let Some(policy) = stop_words {
                config.stop_words = policy;
            }

            info!(
                review_path = %config.review_path.display(),
                class_tfidf = config.class_tfidf,
                max_ngram = config.max_ngram,
                "Generating term rankings"
            );

            let summary = generate::run(&config)?;
            report(&summary);
        }

        Commands::Disney { data_dir } => {
            let mut config = Config::load()?;
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }

            println!("Scoring Disney/Pixar reviews...");
            let summary = generate::generate_disney(&config)?;
            report(&summary);
        }

        Commands::Show { path, limit } => {
            let list: RankedTermList<Option<f64>> = reviewer::output::json::read(&path)?;
            let heading = format!("{}", path.display());
            terminal::display_loaded(&heading, &list, limit);
        }
    }

    Ok(())
}

/// Print a short preview of the run and where the full result went.
fn report(summary: &RunSummary) {
    match &summary.artifact {
        Artifact::Counts(list) => terminal::display_counts("Top Words", list, PREVIEW_TERMS),
        Artifact::Scores(list) => {
            terminal::display_scores("Top c-TF-IDF Terms", list, PREVIEW_TERMS)
        }
    }
    println!(
        "{} {}",
        "Saved:".bold(),
        summary.path.display().to_string().dimmed()
    );
}
