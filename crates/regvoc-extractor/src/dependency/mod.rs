//! Typed-dependency extraction strategy
//!
//! Stages run in a fixed order because later stages read the tables built by
//! earlier ones:
//!
//! 1. compound qualification (`nn`)
//! 2. adjectival qualification (`amod`)
//! 3. prepositional phrases (`prep_*`, `prepc_*`)
//! 4. conjunction and negation tables, then `related` between conjuncts
//! 5. Hearst hyponymy patterns
//! 6. subject/object tables, then custom-predicate triples

mod adjectival;
mod compound;
mod conjunction;
pub mod filter;
mod prepositional;
pub mod state;
mod subject_object;

use regvoc_core::{Result, TripleSink};
use regvoc_parser::{ParseForm, SentenceParse};
use tracing::debug;

use crate::{form_mismatch, Emitter, ExtractionStrategy, StopwordFilter};
use state::SentenceState;

/// Heuristics over a typed-dependency graph
#[derive(Debug, Clone, Default)]
pub struct DependencyStrategy {
    stopwords: StopwordFilter,
}

impl DependencyStrategy {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }
}

impl ExtractionStrategy for DependencyStrategy {
    fn form(&self) -> ParseForm {
        ParseForm::Dependency
    }

    fn extract(&self, parse: &SentenceParse, sink: &TripleSink) -> Result<usize> {
        let SentenceParse::Dependencies(graph) = parse else {
            return Err(form_mismatch(self.form(), parse));
        };

        let graph = filter::without_enumerations(graph);
        let mut state = SentenceState::new(graph.len());
        let mut out = Emitter::new(sink);

        compound::extract(&graph, &mut state, &mut out);
        adjectival::extract(&graph, &mut state, &self.stopwords, &mut out);
        prepositional::extract(&graph, &mut state, &mut out);
        conjunction::map(&graph, &mut state);
        conjunction::extract(&graph, &state, &mut out);
        prepositional::hearst_patterns(&graph, &mut out);
        subject_object::map(&graph, &mut state, &mut out);
        subject_object::extract(&graph, &state, &mut out);

        debug!(
            tokens = graph.len(),
            edges = graph.edges().len(),
            added = out.added(),
            "Extracted dependency triples"
        );
        Ok(out.added())
    }
}
