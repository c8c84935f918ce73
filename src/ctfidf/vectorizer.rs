// Count extraction: turns joined class documents into a term-count matrix.
//
// Pipeline per document: lower-case, split into word tokens of two or more
// characters, drop stop words, then assemble n-grams from the surviving
// tokens. Stop words are removed before n-gram assembly, so "toy story" can
// appear as a bigram even if the original text was "toy of story".
//
// The vocabulary is returned alongside the matrix as an immutable value.
// Nothing is cached between calls.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::traits::Vectorizer;
use crate::error::{Result, ReviewerError};

/// Which stop words to drop from the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StopWords {
    /// The English list from the `stop-words` crate.
    #[default]
    English,
    /// Keep every token.
    None,
    /// A caller-supplied list (matched after lower-casing).
    Custom(HashSet<String>),
}

impl StopWords {
    /// Materialize the policy into a lookup set.
    pub fn to_set(&self) -> HashSet<String> {
        match self {
            StopWords::English => get(LANGUAGE::English)
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect(),
            StopWords::None => HashSet::new(),
            StopWords::Custom(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl FromStr for StopWords {
    type Err = ReviewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(StopWords::English),
            "none" | "" => Ok(StopWords::None),
            other => Err(ReviewerError::InvalidConfig(format!(
                "unknown stop-word policy {other:?} (expected \"english\" or \"none\")"
            ))),
        }
    }
}

/// Split text into lower-cased word tokens.
///
/// A token is a maximal run of alphanumeric characters or underscores, at
/// least two characters long. Single-character tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String) {
    if token.chars().count() >= 2 {
        tokens.push(token);
    }
}

/// Deduplicated, lexicographically ordered term list with a reverse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term at column `j`.
    pub fn term(&self, j: usize) -> Option<&str> {
        self.terms.get(j).map(String::as_str)
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    /// Builds a vocabulary from arbitrary terms (deduplicated and sorted).
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        Self::from_sorted(set.into_iter().collect())
    }
}

/// Dense class x term matrix of occurrence counts, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCountMatrix {
    rows: usize,
    cols: usize,
    counts: Vec<u64>,
}

impl TermCountMatrix {
    /// Build from explicit rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ReviewerError::InvalidConfig(
                "count matrix rows have differing lengths".to_string(),
            ));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            counts: rows.into_iter().flatten().collect(),
        })
    }

    /// (classes, terms)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.counts[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.counts[i * self.cols..(i + 1) * self.cols]
    }

    /// Total words in class `i`.
    pub fn row_total(&self, i: usize) -> u64 {
        self.row(i).iter().sum()
    }

    /// Occurrences of term `j` across all classes.
    pub fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.cols];
        for i in 0..self.rows {
            for (total, &count) in totals.iter_mut().zip(self.row(i)) {
                *total += count;
            }
        }
        totals
    }
}

/// Bag-of-n-grams counter with a fixed n-gram range and stop-word policy.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    min_n: usize,
    max_n: usize,
    stop_words: HashSet<String>,
}

impl CountVectorizer {
    /// Create a vectorizer for n-grams of length `min_n..=max_n`.
    pub fn new(ngram_range: (usize, usize), stop_words: &StopWords) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ReviewerError::InvalidConfig(format!(
                "invalid n-gram range ({min_n}, {max_n}): need 1 <= min_n <= max_n"
            )));
        }
        Ok(Self {
            min_n,
            max_n,
            stop_words: stop_words.to_set(),
        })
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }

    /// Produce the terms of one document, in text order, with repeats.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(document)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        let mut terms = Vec::new();
        for n in self.min_n..=self.max_n {
            if n > tokens.len() {
                break;
            }
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }
}

impl Vectorizer for CountVectorizer {
    fn fit_transform(&self, documents: &[String]) -> Result<(TermCountMatrix, Vocabulary)> {
        let per_document: Vec<HashMap<String, u64>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in self.analyze(doc) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let vocabulary: Vocabulary = per_document
            .iter()
            .flat_map(|counts| counts.keys().cloned())
            .collect();

        if vocabulary.is_empty() {
            return Err(ReviewerError::EmptyVocabulary {
                documents: documents.len(),
            });
        }

        let cols = vocabulary.len();
        let mut matrix = vec![0u64; documents.len() * cols];
        for (i, counts) in per_document.iter().enumerate() {
            for (term, &count) in counts {
                if let Some(j) = vocabulary.index_of(term) {
                    matrix[i * cols + j] = count;
                }
            }
        }

        debug!(
            classes = documents.len(),
            terms = cols,
            min_n = self.min_n,
            max_n = self.max_n,
            "Built term-count matrix"
        );

        Ok((
            TermCountMatrix {
                rows: documents.len(),
                cols,
                counts: matrix,
            },
            vocabulary,
        ))
    }
}

/// Count n-grams over `documents` with a fresh vectorizer.
pub fn count_matrix(
    documents: &[String],
    ngram_range: (usize, usize),
    stop_words: &StopWords,
) -> Result<(TermCountMatrix, Vocabulary)> {
    CountVectorizer::new(ngram_range, stop_words)?.fit_transform(documents)
}
