//! Enumeration-label filter
//!
//! Regulatory text numbers its paragraphs with letters and Roman numerals
//! (`(a)`, `(iv)`, `XII.`). Edges touching such tokens are dropped before any
//! stage runs.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use regvoc_parser::DependencyGraph;

static ROMAN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^M{0,4}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$")
        .expect("roman numeral pattern is valid")
});

/// Single characters and upper-case Roman numerals
pub fn is_enumeration_label(text: &str) -> bool {
    text.chars().count() == 1 || ROMAN_NUMERAL.is_match(text)
}

/// Copy of `graph` without edges touching an enumeration label
pub fn without_enumerations(graph: &DependencyGraph) -> DependencyGraph {
    let mut filtered = graph.clone();
    filtered.retain_edges(|edge| {
        let keep = !is_enumeration_label(graph.text(edge.governor))
            && !is_enumeration_label(graph.text(edge.dependent));
        if !keep {
            trace!(relation = %edge.relation, "dropped enumeration edge");
        }
        keep
    });
    filtered
}
