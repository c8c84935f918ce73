// Output: JSON artifacts on disk and terminal summaries.

pub mod json;
pub mod terminal;

use std::path::{Path, PathBuf};

/// Which artifact a run produces. Each kind has its own file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Plain top-N word counts: `<prefix>_count.json`
    Count,
    /// Class-based TF-IDF scores: `<prefix>_tfidf.json`
    TfIdf,
    /// Relative-importance scores: `<prefix>_tfidf_relative.json`
    TfIdfRelative,
}

impl OutputKind {
    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::Count => "count",
            OutputKind::TfIdf => "tfidf",
            OutputKind::TfIdfRelative => "tfidf_relative",
        }
    }
}

/// `<data_dir>/<prefix>_<suffix>.json`
pub fn output_path(data_dir: &Path, save_prefix: &str, kind: OutputKind) -> PathBuf {
    data_dir.join(format!("{save_prefix}_{}.json", kind.suffix()))
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so titles with accented letters or
/// emoji never cause a panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
