// Ranking: turn score matrices into per-title top-N term lists.
//
// Ordering: score descending, then term ascending. The secondary key makes
// output byte-identical across runs. NaN scores (from the relative mode's
// zero denominators) sort after everything else.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use indicatif::ProgressBar;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::traits::Vectorizer;
use super::vectorizer::{CountVectorizer, StopWords, Vocabulary};
use super::weighting::ImportanceMatrix;
use crate::error::{Result, ReviewerError};

/// Title -> ordered (term, score) pairs. Serializes as a JSON object whose
/// values are arrays of `[term, score]` pairs, keys in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTermList<S> {
    entries: Vec<(String, Vec<(String, S)>)>,
}

impl<S> Default for RankedTermList<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> RankedTermList<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: impl Into<String>, terms: Vec<(String, S)>) {
        self.entries.push((title.into(), terms));
    }

    pub fn get(&self, title: &str) -> Option<&[(String, S)]> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, terms)| terms.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, S)])> {
        self.entries
            .iter()
            .map(|(t, terms)| (t.as_str(), terms.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Serialize> Serialize for RankedTermList<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> std::result::Result<Z::Ok, Z::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, terms) in &self.entries {
            map.serialize_entry(title, terms)?;
        }
        map.end()
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for RankedTermList<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ListVisitor<S>(PhantomData<S>);

        impl<'de, S: Deserialize<'de>> Visitor<'de> for ListVisitor<S> {
            type Value = RankedTermList<S>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping titles to arrays of [term, score] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut list = RankedTermList::new();
                while let Some((title, terms)) = map.next_entry::<String, Vec<(String, S)>>()? {
                    list.push(title, terms);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ListVisitor(PhantomData))
    }
}

/// Score-descending comparison with NaN last. `-0.0` and `0.0` compare
/// equal so the term decides between them.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Rank one row of scores against the vocabulary and keep the first `n`.
pub fn rank_row(scores: &[f64], vocabulary: &Vocabulary, n: usize) -> Result<Vec<(String, f64)>> {
    let terms = vocabulary.terms();
    if scores.len() != terms.len() {
        return Err(ReviewerError::ShapeMismatch {
            what: "score row vs vocabulary",
            expected: terms.len(),
            actual: scores.len(),
        });
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        by_score_desc(scores[a], scores[b]).then_with(|| terms[a].cmp(&terms[b]))
    });
    Ok(order
        .into_iter()
        .take(n)
        .map(|j| (terms[j].clone(), scores[j]))
        .collect())
}

/// Top `n` terms per title by importance score.
pub fn top_n(
    importance: &ImportanceMatrix,
    vocabulary: &Vocabulary,
    titles: &[String],
    n: usize,
) -> Result<RankedTermList<f64>> {
    top_n_with_progress(importance, vocabulary, titles, n, &ProgressBar::hidden())
}

/// Same as [`top_n`], ticking `progress` once per title.
pub fn top_n_with_progress(
    importance: &ImportanceMatrix,
    vocabulary: &Vocabulary,
    titles: &[String],
    n: usize,
    progress: &ProgressBar,
) -> Result<RankedTermList<f64>> {
    let (rows, _) = importance.shape();
    if titles.len() != rows {
        return Err(ReviewerError::ShapeMismatch {
            what: "titles vs importance rows",
            expected: rows,
            actual: titles.len(),
        });
    }

    let mut ranked = RankedTermList::new();
    for (i, title) in titles.iter().enumerate() {
        ranked.push(title.clone(), rank_row(importance.row(i), vocabulary, n)?);
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(ranked)
}

/// Each class's score divided by the sum of every other class's score for
/// the same term. Returns a new matrix; the input is left untouched.
pub fn relative_importance(importance: &ImportanceMatrix) -> ImportanceMatrix {
    let (rows, cols) = importance.shape();

    let mut column_totals = vec![0.0f64; cols];
    for i in 0..rows {
        for (total, &s) in column_totals.iter_mut().zip(importance.row(i)) {
            *total += s;
        }
    }

    let mut relative = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        relative.extend(
            importance
                .row(i)
                .iter()
                .zip(&column_totals)
                .map(|(&own, &total)| own / (total - own)),
        );
    }

    ImportanceMatrix::from_raw(rows, cols, relative)
}

/// Top `n` terms per title by relative importance.
pub fn top_n_relative(
    importance: &ImportanceMatrix,
    vocabulary: &Vocabulary,
    titles: &[String],
    n: usize,
) -> Result<RankedTermList<f64>> {
    top_n(&relative_importance(importance), vocabulary, titles, n)
}

/// Most frequent unigrams across `reviews`, by raw count.
///
/// Ties are broken by term ascending.
pub fn top_n_words(
    reviews: &[String],
    n: usize,
    stop_words: &StopWords,
) -> Result<Vec<(String, u64)>> {
    let vectorizer = CountVectorizer::new((1, 1), stop_words)?;
    let (counts, vocabulary) = vectorizer.fit_transform(reviews)?;

    let mut words: Vec<(String, u64)> = vocabulary
        .terms()
        .iter()
        .cloned()
        .zip(counts.column_totals())
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(n);
    Ok(words)
}
