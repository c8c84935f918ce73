// Error types for the scoring library.
//
// Each variant corresponds to one way an invocation can fail. All of them
// are terminal: the pipeline stops and no output file is written.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ReviewerError>;

#[derive(Debug, Error)]
pub enum ReviewerError {
    /// The review file is missing or could not be read.
    #[error("review file not found or unreadable: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The review file is not a JSON object of title -> list of strings.
    #[error("malformed review corpus in {}: {source}", path.display())]
    MalformedCorpus {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A previously written output file is not a `{title: [[term, score], ...]}` object.
    #[error("malformed output file {}: {source}", path.display())]
    MalformedArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Tokenization and stop-word filtering left no terms at all.
    #[error("empty vocabulary: no terms remain after filtering {documents} documents")]
    EmptyVocabulary { documents: usize },

    /// The corpus contains zero reviews, so the IDF denominator is undefined.
    #[error("invalid corpus: total review count is zero")]
    InvalidCorpus,

    /// A vocabulary term has zero occurrences across all classes.
    #[error("degenerate term {term:?}: zero occurrences across all classes")]
    DegenerateTerm { term: String },

    /// Matrix, vocabulary and title lengths disagree.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A parameter is out of range (n-gram bounds, top-n).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output artifact could not be written.
    #[error("failed to write output file {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
