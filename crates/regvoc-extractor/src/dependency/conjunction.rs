//! Conjunction and negation tables, and `related` triples between
//! conjoined terms of the same word class.

use regvoc_core::Triple;
use regvoc_parser::{DependencyGraph, PosTag, Relation};

use super::state::SentenceState;
use crate::{Emitter, PLACEHOLDER};

/// Fill the symmetric `conj` table and the negated set
pub(crate) fn map(graph: &DependencyGraph, state: &mut SentenceState) {
    for edge in graph.edges() {
        match edge.relation {
            Relation::Conjunction { .. } => {
                state.conj[edge.governor.0] = Some(edge.dependent);
                state.conj[edge.dependent.0] = Some(edge.governor);
            }
            Relation::Negation => state.negated[edge.governor.0] = true,
            _ => {}
        }
    }
}

/// `Related(a, b)` over qualified candidates of each conjoined pair
pub(crate) fn extract(graph: &DependencyGraph, state: &SentenceState, out: &mut Emitter<'_>) {
    for node in graph.node_ids() {
        let Some(partner) = state.partner(node) else {
            continue;
        };
        if !same_class(graph.tag(node), graph.tag(partner)) {
            continue;
        }

        let objects = state.candidates(graph, partner);
        for subject in state.candidates(graph, node) {
            for object in &objects {
                if subject != PLACEHOLDER && object != PLACEHOLDER {
                    out.emit(Triple::related(&subject, object));
                }
            }
        }
    }
}

fn same_class(a: &PosTag, b: &PosTag) -> bool {
    (a.is_noun() && b.is_noun()) || (a.is_verb() && b.is_verb()) || (a.is_adjective() && b.is_adjective())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regvoc_core::TripleSink;
    use regvoc_parser::NodeId;

    const TAGGED: &str = "records/NNS or/CC information/NN not/RB released/VBN";
    const DEPS: &str = "conj_or(records-1, information-3)\nneg(released-5, not-4)";

    #[test]
    fn test_map() {
        let graph = DependencyGraph::from_stanford(TAGGED, DEPS).unwrap();
        let mut state = SentenceState::new(graph.len());
        map(&graph, &mut state);

        assert_eq!(state.partner(NodeId(0)), Some(NodeId(2)));
        assert_eq!(state.partner(NodeId(2)), Some(NodeId(0)));
        assert!(state.negated[4]);
        assert_eq!(state.partner(NodeId(4)), None);
    }

    #[test]
    fn test_related_both_directions() {
        let graph = DependencyGraph::from_stanford(TAGGED, DEPS).unwrap();
        let mut state = SentenceState::new(graph.len());
        map(&graph, &mut state);
        state.vocab[0].push("agency records".to_string());

        let sink = TripleSink::new();
        extract(&graph, &state, &mut Emitter::new(&sink));
        assert!(sink.contains(&Triple::related("agency records", "information")));
        assert!(sink.contains(&Triple::related("information", "agency records")));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_mixed_classes_and_placeholder() {
        let graph = DependencyGraph::from_stanford(
            "rules/NNS and/CC publish/VB other/NN forms/NNS",
            "conj_and(rules-1, publish-3)\nconj_and(other-4, forms-5)",
        )
        .unwrap();
        let mut state = SentenceState::new(graph.len());
        map(&graph, &mut state);

        let sink = TripleSink::new();
        extract(&graph, &state, &mut Emitter::new(&sink));
        assert!(sink.is_empty());
    }
}
