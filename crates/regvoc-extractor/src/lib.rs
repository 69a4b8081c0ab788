//! regvoc Extractor - Relation triple extraction engine
//!
//! Walks the syntactic structure of one sentence and writes SKOS-style
//! triples into a shared `TripleSink`:
//! - `DependencyStrategy`: typed-dependency heuristics run as fixed stages
//! - `ConstituencyStrategy`: one pre-order pass over a phrase-structure tree
//! - `Coordinator`: fans the text blocks of a document out to a worker pool

pub mod constituency;
pub mod coordinator;
pub mod dependency;
pub mod stopwords;

pub use constituency::ConstituencyStrategy;
pub use coordinator::{Coordinator, DocumentReport};
pub use dependency::DependencyStrategy;
pub use stopwords::StopwordFilter;

use regvoc_core::{ExtractionConfig, Result, Strategy, Triple, TripleSink, VocabError};
use regvoc_parser::{ParseForm, SentenceParse};

/// Modifier text that never forms a vocabulary term ("other records")
pub const PLACEHOLDER: &str = "other";

// ============================================================================
// Strategy Trait
// ============================================================================

/// One way of turning a sentence parse into triples
pub trait ExtractionStrategy: Send + Sync {
    /// The parse form this strategy walks
    fn form(&self) -> ParseForm;

    /// Extract triples from one sentence, returning how many were new
    fn extract(&self, parse: &SentenceParse, sink: &TripleSink) -> Result<usize>;
}

pub(crate) fn form_mismatch(expected: ParseForm, parse: &SentenceParse) -> VocabError {
    VocabError::ParseFormMismatch {
        expected: expected.as_str(),
        actual: parse.form().as_str(),
    }
}

// ============================================================================
// Relation Extractor
// ============================================================================

/// Runs the configured strategy over sentence parses
pub struct RelationExtractor {
    strategy: Strategy,
    inner: Box<dyn ExtractionStrategy>,
}

impl RelationExtractor {
    pub fn new(strategy: Strategy, stopwords: StopwordFilter) -> Self {
        let inner: Box<dyn ExtractionStrategy> = match strategy {
            Strategy::Dependency => Box::new(DependencyStrategy::new(stopwords)),
            Strategy::Constituency => Box::new(ConstituencyStrategy::new()),
        };
        Self { strategy, inner }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        let stopwords = StopwordFilter::default().with_words(&config.stop_words);
        Self::new(config.strategy, stopwords)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn form(&self) -> ParseForm {
        self.inner.form()
    }

    pub fn extract(&self, parse: &SentenceParse, sink: &TripleSink) -> Result<usize> {
        self.inner.extract(parse, sink)
    }
}

impl Default for RelationExtractor {
    fn default() -> Self {
        Self::new(Strategy::default(), StopwordFilter::default())
    }
}

impl std::fmt::Debug for RelationExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationExtractor")
            .field("strategy", &self.strategy)
            .finish()
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Writes into the sink and counts newly stored triples
pub(crate) struct Emitter<'a> {
    sink: &'a TripleSink,
    added: usize,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(sink: &'a TripleSink) -> Self {
        Self { sink, added: 0 }
    }

    pub(crate) fn emit(&mut self, triple: Triple) {
        if self.sink.insert(triple) {
            self.added += 1;
        }
    }

    pub(crate) fn emit_with_inversion(&mut self, triple: Triple) {
        if self.sink.insert_with_inversion(triple) {
            self.added += 1;
        }
    }

    pub(crate) fn added(&self) -> usize {
        self.added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regvoc_parser::{ConstituencyTree, DependencyGraph};

    #[test]
    fn test_strategy_selection() {
        let extractor = RelationExtractor::new(Strategy::Constituency, StopwordFilter::default());
        assert_eq!(extractor.form(), ParseForm::Constituency);
        assert_eq!(RelationExtractor::default().form(), ParseForm::Dependency);
    }

    #[test]
    fn test_form_mismatch() {
        let extractor = RelationExtractor::default();
        let tree = ConstituencyTree::from_bracketed("(ROOT (NP (NN fox)))").unwrap();
        let result = extractor.extract(&SentenceParse::Constituents(tree), &TripleSink::new());
        assert!(matches!(result, Err(VocabError::ParseFormMismatch { .. })));

        let extractor = RelationExtractor::new(Strategy::Constituency, StopwordFilter::empty());
        let graph = DependencyGraph::from_stanford("fox/NN", "").unwrap();
        let result = extractor.extract(&SentenceParse::Dependencies(graph), &TripleSink::new());
        assert!(matches!(result, Err(VocabError::ParseFormMismatch { .. })));
    }

    #[test]
    fn test_from_config_stop_words() {
        let config = ExtractionConfig {
            stop_words: vec!["prompt".to_string()],
            ..ExtractionConfig::default()
        };
        let extractor = RelationExtractor::from_config(&config);
        let graph = DependencyGraph::from_stanford(
            "prompt/JJ formal/JJ notice/NN",
            "amod(notice-3, prompt-1)\namod(notice-3, formal-2)",
        )
        .unwrap();

        let sink = TripleSink::new();
        extractor
            .extract(&SentenceParse::Dependencies(graph), &sink)
            .unwrap();
        assert!(sink.contains(&Triple::narrower("notice", "formal notice")));
        assert!(!sink.contains(&Triple::narrower("notice", "prompt notice")));
    }
}
