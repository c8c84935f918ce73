// Loading a review corpus from a JSON file on disk.

use std::fs;
use std::path::Path;

use tracing::info;

use super::ReviewCorpus;
use crate::error::{Result, ReviewerError};

/// Read and parse a `{title: [review, ...]}` JSON file.
pub fn load(path: &Path) -> Result<ReviewCorpus> {
    let raw = fs::read_to_string(path).map_err(|source| ReviewerError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let corpus = parse(&raw).map_err(|source| ReviewerError::MalformedCorpus {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        titles = corpus.len(),
        reviews = corpus.total_reviews(),
        "Loaded review corpus"
    );

    Ok(corpus)
}

/// Parse corpus JSON from a string.
pub fn parse(raw: &str) -> serde_json::Result<ReviewCorpus> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ReviewerError::InputNotFound { .. }));
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(br#"{"Up": "not a list"}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ReviewerError::MalformedCorpus { .. }));
    }

    #[test]
    fn test_load_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        fs::write(&path, r#"{"Up": ["balloons", "house"], "Coco": ["guitar"]}"#).unwrap();

        let corpus = load(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.total_reviews(), 3);
    }
}
