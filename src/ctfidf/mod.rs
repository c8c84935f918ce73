// Class-based TF-IDF scoring.

pub mod aggregate;
pub mod ranking;
pub mod traits;
pub mod vectorizer;
pub mod weighting;

use tracing::info;

use self::aggregate::PreparedCorpus;
use self::traits::Vectorizer;
use self::vectorizer::Vocabulary;
use self::weighting::ImportanceMatrix;
use crate::error::{Result, ReviewerError};

/// Importance scores for every class, with the vocabulary that indexes
/// their columns.
#[derive(Debug, Clone)]
pub struct ClassScores {
    pub titles: Vec<String>,
    pub vocabulary: Vocabulary,
    pub importance: ImportanceMatrix,
}

/// Count and weight a prepared corpus in one step.
///
/// A corpus with no reviews at all fails with `InvalidCorpus` before any
/// counting happens.
pub fn score(prepared: &PreparedCorpus, vectorizer: &dyn Vectorizer) -> Result<ClassScores> {
    if prepared.m == 0 {
        return Err(ReviewerError::InvalidCorpus);
    }
    let (counts, vocabulary) = vectorizer.fit_transform(&prepared.documents)?;
    let importance = weighting::weight(&counts, &vocabulary, prepared.m)?;

    info!(
        classes = prepared.titles.len(),
        terms = vocabulary.len(),
        reviews = prepared.m,
        "Computed class-based TF-IDF"
    );

    Ok(ClassScores {
        titles: prepared.titles.clone(),
        vocabulary,
        importance,
    })
}
