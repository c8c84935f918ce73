// Colored terminal output for ranked term lists.
//
// Full results go to the JSON file; the terminal only shows the leading
// terms of each title so a run can be sanity-checked at a glance.

use colored::{ColoredString, Colorize};

use crate::ctfidf::ranking::RankedTermList;

/// Longest title shown before truncation.
const TITLE_WIDTH: usize = 40;

/// Display the top `limit` c-TF-IDF terms per title.
pub fn display_scores(heading: &str, list: &RankedTermList<f64>, limit: usize) {
    display_with(heading, list, limit, |s| colorize_score(Some(*s)));
}

/// Display the top `limit` words per title with raw counts.
pub fn display_counts(heading: &str, list: &RankedTermList<u64>, limit: usize) {
    display_with(heading, list, limit, |c| c.to_string().normal());
}

/// Display a reloaded artifact. Non-finite scores were written as `null`.
pub fn display_loaded(heading: &str, list: &RankedTermList<Option<f64>>, limit: usize) {
    display_with(heading, list, limit, |s| colorize_score(*s));
}

fn display_with<S>(
    heading: &str,
    list: &RankedTermList<S>,
    limit: usize,
    format_score: impl Fn(&S) -> ColoredString,
) {
    if list.is_empty() {
        println!("No titles to display.");
        return;
    }

    println!(
        "\n{}",
        format!("=== {heading} ({} titles) ===", list.len()).bold()
    );
    println!();

    for (title, terms) in list.iter() {
        println!(
            "  {}  {}",
            super::truncate_chars(title, TITLE_WIDTH).bold(),
            format!("({} terms)", terms.len()).dimmed()
        );
        for (rank, (term, score)) in terms.iter().take(limit).enumerate() {
            println!("    {:>3}. {:<32} {}", rank + 1, term, format_score(score));
        }
        println!();
    }
}

/// Positive scores green, negative red, zero and missing dimmed.
fn colorize_score(score: Option<f64>) -> ColoredString {
    match score {
        Some(s) if s > 0.0 => format!("{s:.4}").green(),
        Some(s) if s < 0.0 => format!("{s:.4}").red(),
        Some(s) => format!("{s:.4}").dimmed(),
        None => "null".dimmed(),
    }
}
