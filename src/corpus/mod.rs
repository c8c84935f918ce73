// Review corpus: movie titles mapped to their individual reviews.
//
// Title order is the order keys appear in the input file. Everything
// downstream (document rows, output keys) follows this order, so two runs
// over the same file produce identical artifacts.

pub mod loader;

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// An ordered mapping from movie title to its reviews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewCorpus {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl ReviewCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a title. Re-inserting an existing title replaces its reviews but
    /// keeps its original position.
    pub fn insert(&mut self, title: impl Into<String>, reviews: Vec<String>) {
        let title = title.into();
        match self.index.get(&title) {
            Some(&i) => self.entries[i].1 = reviews,
            None => {
                self.index.insert(title.clone(), self.entries.len());
                self.entries.push((title, reviews));
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.index
            .get(title)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Titles in file order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(t, r)| (t.as_str(), r.as_slice()))
    }

    /// The first title and its reviews, if any.
    pub fn first(&self) -> Option<(&str, &[String])> {
        self.iter().next()
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of individual reviews across all titles.
    pub fn total_reviews(&self) -> usize {
        self.entries.iter().map(|(_, r)| r.len()).sum()
    }
}

impl<T: Into<String>> FromIterator<(T, Vec<String>)> for ReviewCorpus {
    fn from_iter<I: IntoIterator<Item = (T, Vec<String>)>>(iter: I) -> Self {
        let mut corpus = ReviewCorpus::new();
        for (title, reviews) in iter {
            corpus.insert(title, reviews);
        }
        corpus
    }
}

// Deserialized by hand so key order from the file is kept without pulling
// in an ordered map type.
impl<'de> Deserialize<'de> for ReviewCorpus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CorpusVisitor;

        impl<'de> Visitor<'de> for CorpusVisitor {
            type Value = ReviewCorpus;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping movie titles to arrays of review strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ReviewCorpus, A::Error> {
                let mut corpus = ReviewCorpus::new();
                while let Some((title, reviews)) = map.next_entry::<String, Vec<String>>()? {
                    corpus.insert(title, reviews);
                }
                Ok(corpus)
            }
        }

        deserializer.deserialize_map(CorpusVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keeps_file_order() {
        let corpus: ReviewCorpus =
            serde_json::from_str(r#"{"Zootopia": ["a"], "Antz": ["b"], "Moana": ["c"]}"#).unwrap();
        let titles: Vec<&str> = corpus.titles().collect();
        assert_eq!(titles, vec!["Zootopia", "Antz", "Moana"]);
    }

    #[test]
    fn test_duplicate_title_keeps_position_takes_last_value() {
        let mut corpus = ReviewCorpus::new();
        corpus.insert("Up", reviews(&["first"]));
        corpus.insert("Cars", reviews(&["vroom"]));
        corpus.insert("Up", reviews(&["second", "third"]));

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.first().unwrap().0, "Up");
        assert_eq!(corpus.get("Up").unwrap(), &reviews(&["second", "third"])[..]);
    }

    #[test]
    fn test_total_reviews() {
        let corpus: ReviewCorpus = vec![
            ("A", reviews(&["x", "y"])),
            ("B", reviews(&[])),
            ("C", reviews(&[""])),
        ]
        .into_iter()
        .collect();
        assert_eq!(corpus.total_reviews(), 3);
    }

    #[test]
    fn test_rejects_non_string_reviews() {
        let result: Result<ReviewCorpus, _> = serde_json::from_str(r#"{"A": [1, 2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_top_level_array() {
        let result: Result<ReviewCorpus, _> = serde_json::from_str(r#"[["A", ["x"]]]"#);
        assert!(result.is_err());
    }
}
