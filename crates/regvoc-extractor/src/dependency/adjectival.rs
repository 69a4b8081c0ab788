//! Adjectival qualification: `amod(notice, written)` yields
//! `notice ⊃ written notice`, qualified by any compound chain on the head.

use regvoc_core::Triple;
use regvoc_parser::{DependencyGraph, Relation};

use super::state::SentenceState;
use crate::{Emitter, StopwordFilter};

pub(crate) fn extract(
    graph: &DependencyGraph,
    state: &mut SentenceState,
    stopwords: &StopwordFilter,
    out: &mut Emitter<'_>,
) {
    for edge in graph
        .edges()
        .iter()
        .filter(|e| e.relation == Relation::AdjectivalModifier)
    {
        let adjective = graph.text(edge.dependent);
        if stopwords.is_stopword(adjective)
            || !graph.tag(edge.dependent).is_content()
            || !graph.tag(edge.governor).is_content()
        {
            continue;
        }

        let head = edge.governor.0;
        let resolved = state.compounds[head]
            .clone()
            .unwrap_or_else(|| graph.text(edge.governor).to_string());
        let phrase = format!("{adjective} {resolved}");

        out.emit_with_inversion(Triple::narrower(&resolved, &phrase));
        state.vocab[head].push(phrase);
    }
}
