// c-TF-IDF weighting.
//
// Given counts t[i][j] (class i, term j) and the total number of original
// reviews m:
//
//   w[i]          = sum_j t[i][j]                 words in class i
//   tf[i][j]      = (t[i][j] + 1) / (w[i] + 1)     Laplace-smoothed
//   sum_t[j]      = sum_i t[i][j]                 occurrences of term j
//   idf[j]        = ln(m / sum_t[j])
//   score[i][j]   = tf[i][j] * idf[j]
//
// m is the number of individual reviews, not the number of classes. Terms
// that are rare relative to the whole review pool get boosted; terms that
// occur more often than there are reviews get a negative idf.

use tracing::debug;

use super::vectorizer::{TermCountMatrix, Vocabulary};
use crate::error::{Result, ReviewerError};

/// Dense class x term matrix of importance scores, same shape as the counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f64>,
}

impl ImportanceMatrix {
    pub(crate) fn from_raw(rows: usize, cols: usize, scores: Vec<f64>) -> Self {
        debug_assert_eq!(scores.len(), rows * cols);
        Self { rows, cols, scores }
    }

    /// (classes, terms)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.scores[i * self.cols..(i + 1) * self.cols]
    }
}

/// Per-term inverse frequency `ln(m / sum_t[j])`.
pub fn idf(counts: &TermCountMatrix, vocabulary: &Vocabulary, m: usize) -> Result<Vec<f64>> {
    if m == 0 {
        return Err(ReviewerError::InvalidCorpus);
    }
    let (_, cols) = counts.shape();
    if vocabulary.len() != cols {
        return Err(ReviewerError::ShapeMismatch {
            what: "vocabulary vs count columns",
            expected: cols,
            actual: vocabulary.len(),
        });
    }

    let m = m as f64;
    counts
        .column_totals()
        .into_iter()
        .enumerate()
        .map(|(j, total)| {
            if total == 0 {
                let term = vocabulary.term(j).unwrap_or_default().to_string();
                return Err(ReviewerError::DegenerateTerm { term });
            }
            Ok((m / total as f64).ln())
        })
        .collect()
}

/// Convert raw counts into c-TF-IDF importance scores.
pub fn weight(
    counts: &TermCountMatrix,
    vocabulary: &Vocabulary,
    m: usize,
) -> Result<ImportanceMatrix> {
    let idf = idf(counts, vocabulary, m)?;
    let (rows, cols) = counts.shape();

    let mut scores = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        let smoothed_total = (counts.row_total(i) + 1) as f64;
        scores.extend(
            counts
                .row(i)
                .iter()
                .zip(&idf)
                .map(|(&t, &idf_j)| (t + 1) as f64 / smoothed_total * idf_j),
        );
    }

    debug!(classes = rows, terms = cols, m, "Applied c-TF-IDF weighting");

    Ok(ImportanceMatrix::from_raw(rows, cols, scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(n: usize) -> Vocabulary {
        (0..n).map(|j| format!("t{j}")).collect()
    }

    #[test]
    fn test_formula_by_hand() {
        // class 0: [2, 0], class 1: [1, 3], m = 8
        let counts = TermCountMatrix::from_rows(vec![vec![2, 0], vec![1, 3]]).unwrap();
        let scores = weight(&counts, &vocab(2), 8).unwrap();

        let idf0 = (8.0f64 / 3.0).ln();
        let idf1 = (8.0f64 / 3.0).ln();
        assert!((scores.get(0, 0) - 3.0 / 3.0 * idf0).abs() < 1e-12);
        assert!((scores.get(0, 1) - 1.0 / 3.0 * idf1).abs() < 1e-12);
        assert!((scores.get(1, 0) - 2.0 / 5.0 * idf0).abs() < 1e-12);
        assert!((scores.get(1, 1) - 4.0 / 5.0 * idf1).abs() < 1e-12);
    }

    #[test]
    fn test_same_shape_as_counts() {
        let counts = TermCountMatrix::from_rows(vec![vec![1, 2, 3], vec![0, 0, 1]]).unwrap();
        let scores = weight(&counts, &vocab(3), 10).unwrap();
        assert_eq!(scores.shape(), counts.shape());
    }

    #[test]
    fn test_zero_m_is_invalid_corpus() {
        let counts = TermCountMatrix::from_rows(vec![vec![1]]).unwrap();
        let err = weight(&counts, &vocab(1), 0).unwrap_err();
        assert!(matches!(err, ReviewerError::InvalidCorpus));
    }

    #[test]
    fn test_zero_column_is_degenerate() {
        let counts = TermCountMatrix::from_rows(vec![vec![1, 0], vec![2, 0]]).unwrap();
        let err = weight(&counts, &vocab(2), 4).unwrap_err();
        match err {
            ReviewerError::DegenerateTerm { term } => assert_eq!(term, "t1"),
            other => panic!("expected DegenerateTerm, got {other:?}"),
        }
    }

    #[test]
    fn test_idf_independent_of_other_class_scaling() {
        // Scaling class 0 changes its tf; idf depends only on column totals,
        // so a term that only class 1 uses keeps its idf.
        let a = TermCountMatrix::from_rows(vec![vec![1, 0], vec![0, 2]]).unwrap();
        let b = TermCountMatrix::from_rows(vec![vec![5, 0], vec![0, 2]]).unwrap();
        let idf_a = idf(&a, &vocab(2), 20).unwrap();
        let idf_b = idf(&b, &vocab(2), 20).unwrap();
        assert!((idf_a[1] - idf_b[1]).abs() < 1e-12);
        assert!(idf_b[0] < idf_a[0]);
    }

    #[test]
    fn test_common_term_gets_negative_idf() {
        let counts = TermCountMatrix::from_rows(vec![vec![10]]).unwrap();
        let idf = idf(&counts, &vocab(1), 2).unwrap();
        assert!(idf[0] < 0.0);
    }
}
