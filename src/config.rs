use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::ctfidf::vectorizer::StopWords;
use crate::error::{self, ReviewerError};

/// How many terms to keep per title unless overridden.
pub const DEFAULT_TOP_N: usize = 2000;

/// Central configuration for one invocation.
///
/// Defaults come from environment variables (a `.env` file is loaded at
/// startup via dotenvy). The CLI fills in the per-run fields and may
/// override any default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the `{title: [review, ...]}` JSON file.
    pub review_path: PathBuf,
    /// Prefix for output file names (`<prefix>_tfidf.json` etc).
    pub save_prefix: String,
    /// Class-based TF-IDF (true) or plain top-N word counts (false).
    pub class_tfidf: bool,
    /// Rank by relative importance instead of raw c-TF-IDF score.
    pub relative: bool,
    /// Upper bound of the n-gram range. The lower bound is always 1.
    pub max_ngram: usize,
    /// Terms kept per title.
    pub top_n: usize,
    /// Stop-word policy applied before n-gram assembly.
    pub stop_words: StopWords,
    /// Directory output files are written to (REVIEWER_DATA_DIR).
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            review_path: PathBuf::new(),
            save_prefix: String::new(),
            class_tfidf: false,
            relative: false,
            max_ngram: 1,
            top_n: DEFAULT_TOP_N,
            stop_words: StopWords::English,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Load defaults from environment variables.
    ///
    /// Only the shared settings live in the environment. The review path and
    /// save prefix are per-run and come from the command line.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("REVIEWER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(raw) = env::var("REVIEWER_TOP_N") {
            config.top_n = raw.trim().parse::<usize>().with_context(|| {
                format!("REVIEWER_TOP_N must be a positive integer, got {raw:?}")
            })?;
        }
        if let Ok(raw) = env::var("REVIEWER_STOP_WORDS") {
            config.stop_words = raw.parse::<StopWords>().context("Invalid REVIEWER_STOP_WORDS")?;
        }

        Ok(config)
    }

    /// Check that the per-run input fields are set.
    /// Call this before any operation that reads a corpus and writes output.
    pub fn require_input(&self) -> Result<()> {
        if self.review_path.as_os_str().is_empty() {
            anyhow::bail!("No review file given. Pass --review-path <file.json>.");
        }
        if self.save_prefix.is_empty() {
            anyhow::bail!("No save prefix given. Pass --save-prefix <name>.");
        }
        Ok(())
    }

    /// Reject out-of-range numeric settings.
    pub fn validate(&self) -> error::Result<()> {
        if self.max_ngram == 0 {
            return Err(ReviewerError::InvalidConfig(
                "max_ngram must be at least 1".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(ReviewerError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The n-gram range passed to the vectorizer.
    pub fn ngram_range(&self) -> (usize, usize) {
        (1, self.max_ngram)
    }
}
