// Vectorizer trait: the counting step as a swap-ready abstraction.
//
// Weighting and ranking only need a count matrix and its vocabulary, so any
// tokenizer/counter that produces those can be plugged in. The default is
// `CountVectorizer`.

use super::vectorizer::{TermCountMatrix, Vocabulary};
use crate::error::Result;

/// Trait for turning a list of documents into term counts.
pub trait Vectorizer {
    /// Count terms in each document. Row `i` of the matrix corresponds to
    /// `documents[i]`; columns follow the returned vocabulary.
    fn fit_transform(&self, documents: &[String]) -> Result<(TermCountMatrix, Vocabulary)>;
}
