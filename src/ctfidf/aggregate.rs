// Aggregation: one joined document per movie.
//
// c-TF-IDF treats each class as a single long document, so all reviews for
// a title are concatenated. The count of individual reviews is kept as `m`
// because the IDF term divides by it.

use crate::corpus::ReviewCorpus;

/// Titles, their joined documents, and the total review count.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCorpus {
    /// Titles in corpus order. `titles[i]` owns `documents[i]`.
    pub titles: Vec<String>,
    /// Space-joined reviews, one per title.
    pub documents: Vec<String>,
    /// Total number of individual reviews across all titles.
    pub m: usize,
}

/// Join each title's reviews into a single document.
pub fn prepare(corpus: &ReviewCorpus) -> PreparedCorpus {
    let mut titles = Vec::with_capacity(corpus.len());
    let mut documents = Vec::with_capacity(corpus.len());
    let mut m = 0;

    for (title, reviews) in corpus.iter() {
        titles.push(title.to_string());
        documents.push(reviews.join(" "));
        m += reviews.len();
    }

    PreparedCorpus {
        titles,
        documents,
        m,
    }
}
