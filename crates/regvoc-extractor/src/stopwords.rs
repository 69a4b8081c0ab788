//! Stop words for adjectival qualification
//!
//! The default set is the English list from the `stop-words` crate plus
//! the quantifiers and deictic adjectives that regulatory text uses as
//! qualifiers ("other records", "such requests", "certain agencies").
//! The adjectival stage never uses a stop word as a qualifier.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Adjectives that never qualify a term, on top of the English list
pub const DOMAIN_STOPWORDS: &[&str] = &[
    "other", "such", "same", "own", "certain", "various", "several", "many", "few", "any",
];

/// Case-insensitive stop word set
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// English stop words plus `DOMAIN_STOPWORDS`
    pub fn english() -> Self {
        let mut words: FxHashSet<String> = get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_string().to_lowercase())
            .collect();
        words.extend(DOMAIN_STOPWORDS.iter().map(|w| w.to_string()));
        Self { words }
    }

    /// Only `DOMAIN_STOPWORDS`
    pub fn domain() -> Self {
        Self::from_list(DOMAIN_STOPWORDS)
    }

    /// A filter that lets everything through
    pub fn empty() -> Self {
        Self {
            words: FxHashSet::default(),
        }
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add configured words
    pub fn with_words(mut self, words: &[String]) -> Self {
        self.words.extend(
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let filter = StopwordFilter::default();
        assert!(filter.is_stopword("Other"));
        assert!(filter.is_stopword("such"));
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("which"));
        assert!(!filter.is_stopword("suburban"));
        assert!(filter.len() > DOMAIN_STOPWORDS.len());
    }

    #[test]
    fn test_domain_list() {
        let filter = StopwordFilter::domain();
        assert_eq!(filter.len(), DOMAIN_STOPWORDS.len());
        assert!(filter.is_stopword("VARIOUS"));
        assert!(!filter.is_stopword("the"));
    }

    #[test]
    fn test_with_words() {
        let filter = StopwordFilter::empty().with_words(&[" Prompt ".to_string(), "  ".to_string()]);
        assert_eq!(filter.len(), 1);
        assert!(filter.is_stopword("prompt"));
        assert!(!filter.is_stopword("other"));
    }
}
