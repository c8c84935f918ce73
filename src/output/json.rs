// Writing JSON artifacts.
//
// The whole value is serialized in memory first, written to a temporary
// sibling file and then renamed over the target. A failed run never leaves
// a truncated or partial output file behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::{Result, ReviewerError};

/// Serialize `value` as JSON and atomically replace `path` with it.
pub fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let write_err = |source: std::io::Error| ReviewerError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let bytes = serde_json::to_vec(value).map_err(|e| write_err(e.into()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    info!(path = %path.display(), bytes = bytes.len(), "Wrote output file");
    Ok(())
}

/// Read a JSON artifact back (used by `reviewer show`).
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|source| ReviewerError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ReviewerError::MalformedArtifact {
        path: path.to_path_buf(),
        source,
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        let mut value = BTreeMap::new();
        value.insert("Up".to_string(), vec![("balloon".to_string(), 3u64)]);
        write_atomic(&path, &value).unwrap();

        let back: BTreeMap<String, Vec<(String, u64)>> = read(&path).unwrap();
        assert_eq!(back, value);
        assert!(!dir.path().join("nested").join("out.json.tmp").exists());
    }

    #[test]
    fn test_read_malformed_artifact_names_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixar_tfidf.json");
        fs::write(&path, r#"{"Up": "not pairs"}"#).unwrap();

        let err = read::<BTreeMap<String, Vec<(String, f64)>>>(&path).unwrap_err();
        assert!(matches!(err, ReviewerError::MalformedArtifact { .. }));
        let msg = err.to_string();
        assert!(msg.contains("malformed output file"), "got {msg}");
        assert!(!msg.contains("review corpus"), "got {msg}");
    }

    #[test]
    fn test_overwrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let value = vec![("a".to_string(), 0.5f64)];

        write_atomic(&path, &value).unwrap();
        let first = fs::read(&path).unwrap();
        write_atomic(&path, &value).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }
}
