// Unit tests for ranking and extraction.
//
// Covers ordering, tie-breaking, truncation, the relative-importance
// variant, and the plain top-N word counter.

use reviewer::corpus::ReviewCorpus;
use reviewer::ctfidf::aggregate::prepare;
use reviewer::ctfidf::ranking::{relative_importance, top_n, top_n_relative, top_n_words};
use reviewer::ctfidf::score;
use reviewer::ctfidf::vectorizer::{CountVectorizer, StopWords};
use reviewer::error::ReviewerError;

fn reviews(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn pixar_scores() -> reviewer::ctfidf::ClassScores {
    let corpus: ReviewCorpus = vec![
        ("Toy Story", reviews(&["cowboy toys", "cowboy astronaut"])),
        ("Nemo", reviews(&["ocean fish", "fish reef"])),
        ("Wall-E", reviews(&["robot trash"])),
    ]
    .into_iter()
    .collect();
    let v = CountVectorizer::new((1, 1), &StopWords::None).unwrap();
    score(&prepare(&corpus), &v).unwrap()
}

fn terms(list: &[(String, f64)]) -> Vec<&str> {
    list.iter().map(|(t, _)| t.as_str()).collect()
}

// ============================================================
// top_n
// ============================================================

#[test]
fn top_n_full_order_for_toy_story() {
    let s = pixar_scores();
    let ranked = top_n(&s.importance, &s.vocabulary, &s.titles, 100).unwrap();
    let toy = ranked.get("Toy Story").unwrap();

    // astronaut/toys tie at 2/5 * ln 5 and break alphabetically.
    assert_eq!(
        terms(toy),
        vec!["astronaut", "toys", "cowboy", "ocean", "reef", "robot", "trash", "fish"]
    );
}

#[test]
fn top_n_scores_descending() {
    let s = pixar_scores();
    let ranked = top_n(&s.importance, &s.vocabulary, &s.titles, 100).unwrap();
    for (_, list) in ranked.iter() {
        assert!(list.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}

#[test]
fn top_n_truncates() {
    let s = pixar_scores();
    let ranked = top_n(&s.importance, &s.vocabulary, &s.titles, 2).unwrap();
    assert!(ranked.iter().all(|(_, list)| list.len() == 2));
}

#[test]
fn top_n_larger_than_vocabulary_returns_all() {
    let s = pixar_scores();
    let ranked = top_n(&s.importance, &s.vocabulary, &s.titles, 2000).unwrap();
    assert!(ranked.iter().all(|(_, list)| list.len() == s.vocabulary.len()));
}

#[test]
fn top_n_keeps_title_order() {
    let s = pixar_scores();
    let ranked = top_n(&s.importance, &s.vocabulary, &s.titles, 1).unwrap();
    let titles: Vec<&str> = ranked.iter().map(|(t, _)| t).collect();
    assert_eq!(titles, vec!["Toy Story", "Nemo", "Wall-E"]);
}

#[test]
fn top_n_is_deterministic() {
    let a = serde_json::to_string(&{
        let s = pixar_scores();
        top_n(&s.importance, &s.vocabulary, &s.titles, 5).unwrap()
    })
    .unwrap();
    let b = serde_json::to_string(&{
        let s = pixar_scores();
        top_n(&s.importance, &s.vocabulary, &s.titles, 5).unwrap()
    })
    .unwrap();
    assert_eq!(a, b);
}

// ============================================================
// relative importance
// ============================================================

#[test]
fn relative_leaves_input_unchanged() {
    let s = pixar_scores();
    let before = s.importance.clone();
    let _ = relative_importance(&s.importance);
    assert_eq!(s.importance, before);
}

#[test]
fn relative_own_terms_rank_first() {
    let s = pixar_scores();
    let ranked = top_n_relative(&s.importance, &s.vocabulary, &s.titles, 1).unwrap();
    let top = &ranked.get("Wall-E").unwrap()[0].0;
    assert!(top == "robot" || top == "trash", "got {top}");
}

#[test]
fn relative_single_class_is_non_finite() {
    let corpus: ReviewCorpus = vec![("Only", reviews(&["lonely robot", "robot"]))]
        .into_iter()
        .collect();
    let v = CountVectorizer::new((1, 1), &StopWords::None).unwrap();
    let s = score(&prepare(&corpus), &v).unwrap();
    let r = relative_importance(&s.importance);
    assert!(!r.get(0, 0).is_finite());
}

// ============================================================
// top_n_words
// ============================================================

#[test]
fn top_n_words_sums_across_reviews() {
    let words = top_n_words(
        &reviews(&["clownfish anemone", "clownfish ocean", "clownfish"]),
        1,
        &StopWords::None,
    )
    .unwrap();
    assert_eq!(words, vec![("clownfish".to_string(), 3)]);
}

#[test]
fn top_n_words_unigrams_only() {
    let words = top_n_words(&reviews(&["space ranger"]), 10, &StopWords::None).unwrap();
    assert!(words.iter().all(|(w, _)| !w.contains(' ')));
}

#[test]
fn top_n_words_empty_is_error() {
    let err = top_n_words(&reviews(&["", "!!"]), 10, &StopWords::None).unwrap_err();
    assert!(matches!(err, ReviewerError::EmptyVocabulary { .. }));
}
