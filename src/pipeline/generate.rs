// One end-to-end run over a review file.
//
// Everything happens in a single sequential pass. The output file is only
// written once ranking has fully succeeded, so an error at any stage leaves
// the previous artifact (if any) untouched.
//
// Plain mode only counts words for the first title in the file. Class mode
// scores every title against the others.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::Config;
use crate::corpus::{loader, ReviewCorpus};
use crate::ctfidf::aggregate::prepare;
use crate::ctfidf::ranking::{self, RankedTermList};
use crate::ctfidf::vectorizer::CountVectorizer;
use crate::ctfidf::{self, ClassScores};
use crate::error::ReviewerError;
use crate::output::{json, output_path, OutputKind};

/// Below this many titles no progress bar is drawn.
const PROGRESS_MIN_TITLES: usize = 50;

/// The ranked result of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Counts(RankedTermList<u64>),
    Scores(RankedTermList<f64>),
}

/// What a run produced and where it was written.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub kind: OutputKind,
    pub path: PathBuf,
    pub artifact: Artifact,
}

/// Load `config.review_path`, rank, and write the artifact under
/// `config.data_dir`.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.require_input()?;
    config.validate()?;

    let corpus = loader::load(&config.review_path)
        .with_context(|| format!("Loading reviews from {}", config.review_path.display()))?;

    if config.class_tfidf {
        run_class(&corpus, config)
    } else {
        run_count(&corpus, config)
    }
}

/// The Disney/Pixar preset: class mode over `<data_dir>/disney_reviews.json`
/// with n-grams up to 3, saved as `disney_tfidf.json`.
pub fn generate_disney(config: &Config) -> Result<RunSummary> {
    let preset = Config {
        review_path: config.data_dir.join("disney_reviews.json"),
        save_prefix: "disney".to_string(),
        class_tfidf: true,
        relative: false,
        max_ngram: 3,
        ..config.clone()
    };
    run(&preset)
}

fn run_count(corpus: &ReviewCorpus, config: &Config) -> Result<RunSummary> {
    let (title, reviews) = corpus
        .first()
        .ok_or(ReviewerError::InvalidCorpus)
        .context("Plain mode needs at least one title")?;

    if corpus.len() > 1 {
        info!(
            title,
            skipped = corpus.len() - 1,
            "Plain mode counts words for the first title only"
        );
    }
    if config.relative {
        warn!("--relative has no effect in plain count mode");
    }
    if config.max_ngram > 1 {
        warn!(
            max_ngram = config.max_ngram,
            "Plain count mode always uses unigrams"
        );
    }

    let words = ranking::top_n_words(reviews, config.top_n, &config.stop_words)
        .with_context(|| format!("Counting words for {title:?}"))?;

    let mut list = RankedTermList::new();
    list.push(title, words);

    let path = output_path(&config.data_dir, &config.save_prefix, OutputKind::Count);
    json::write_atomic(&path, &list).context("Saving word counts")?;

    Ok(RunSummary {
        kind: OutputKind::Count,
        path,
        artifact: Artifact::Counts(list),
    })
}

fn run_class(corpus: &ReviewCorpus, config: &Config) -> Result<RunSummary> {
    let prepared = prepare(corpus);
    let vectorizer = CountVectorizer::new(config.ngram_range(), &config.stop_words)?;
    let ClassScores {
        titles,
        vocabulary,
        importance,
    } = ctfidf::score(&prepared, &vectorizer).context("Computing class-based TF-IDF")?;

    let kind = if config.relative {
        OutputKind::TfIdfRelative
    } else {
        OutputKind::TfIdf
    };
    let ranked_matrix = if config.relative {
        ranking::relative_importance(&importance)
    } else {
        importance
    };

    let pb = progress_bar(titles.len());
    let list =
        ranking::top_n_with_progress(&ranked_matrix, &vocabulary, &titles, config.top_n, &pb)
            .context("Ranking terms per title")?;

    let path = output_path(&config.data_dir, &config.save_prefix, kind);
    json::write_atomic(&path, &list).context("Saving TF-IDF scores")?;

    Ok(RunSummary {
        kind,
        path,
        artifact: Artifact::Scores(list),
    })
}

fn progress_bar(titles: usize) -> ProgressBar {
    if titles < PROGRESS_MIN_TITLES {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(titles as u64);
    let style = ProgressStyle::default_bar()
        .template("  Ranking [{bar:30}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
