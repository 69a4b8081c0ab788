//! Subject-verb-object relations
//!
//! Subject edges between two nominals (`nsubj(officer, director)` under a
//! copula) are taxonomic and emit `narrower` directly. Other subjects are
//! recorded per verb and paired with the verb's direct objects, or with the
//! first noun after the verb when it has none.

use regvoc_core::Triple;
use regvoc_parser::tag::is_noun_tag;
use regvoc_parser::{DependencyGraph, NodeId, Relation};

use super::state::SentenceState;
use crate::Emitter;

/// Fill the subject and object tables; emit nominal-subject narrowers
pub(crate) fn map(graph: &DependencyGraph, state: &mut SentenceState, out: &mut Emitter<'_>) {
    for edge in graph.edges() {
        if edge.relation.is_subject() {
            let governor = graph.tag(edge.governor);
            let dependent = graph.tag(edge.dependent);

            if dependent.is_noun() && (governor.is_noun() || governor.is_adjective()) {
                let objects = state.candidates(graph, edge.dependent);
                for subject in state.candidates(graph, edge.governor) {
                    for object in &objects {
                        out.emit(Triple::narrower(&subject, object));
                    }
                }
            } else if dependent.is_noun() {
                state.subjects[edge.governor.0].push(edge.dependent);
            }
        } else if edge.relation == Relation::DirectObject {
            state.objects[edge.governor.0].push(edge.dependent);
        }
    }
}

/// Emit a custom-predicate triple for every verb with recorded subjects
pub(crate) fn extract(graph: &DependencyGraph, state: &SentenceState, out: &mut Emitter<'_>) {
    for verb in graph.node_ids() {
        let subjects = &state.subjects[verb.0];
        if subjects.is_empty() {
            continue;
        }

        let predicate = if state.negated[verb.0] {
            format!("not {}", graph.text(verb))
        } else {
            graph.text(verb).to_string()
        };

        let objects = &state.objects[verb.0];
        if objects.is_empty() {
            let Some(object) = first_noun_after(graph, verb) else {
                continue;
            };
            if is_noun_tag(graph.text(object)) {
                continue;
            }
            let tail = modifier_run(graph, object);
            for &subject in subjects {
                emit_pair(graph, state, subject, &predicate, object, &tail, out);
            }
        } else {
            for &subject in subjects {
                for &object in objects.iter().filter(|&&o| graph.tag(o).is_noun()) {
                    emit_pair(graph, state, subject, &predicate, object, "", out);
                }
            }
        }
    }
}

/// The pair itself plus the pairs with either side's conjunction partner
fn emit_pair(
    graph: &DependencyGraph,
    state: &SentenceState,
    subject: NodeId,
    predicate: &str,
    object: NodeId,
    tail: &str,
    out: &mut Emitter<'_>,
) {
    let subject_text = state.fully_qualified(graph, subject);
    let object_text = format!("{}{tail}", state.fully_qualified(graph, object));

    if let Some(partner) = state.partner(subject) {
        out.emit(Triple::custom(
            &state.fully_qualified(graph, partner),
            predicate,
            &object_text,
        ));
    }
    if let Some(partner) = state.partner(object) {
        out.emit(Triple::custom(
            &subject_text,
            predicate,
            &state.fully_qualified(graph, partner),
        ));
    }
    out.emit(Triple::custom(&subject_text, predicate, &object_text));
}

fn first_noun_after(graph: &DependencyGraph, verb: NodeId) -> Option<NodeId> {
    graph
        .node_ids()
        .skip(verb.0 + 1)
        .find(|&id| graph.tag(id).is_noun())
}

/// Space-prefixed nouns and adjectives directly following `object`
fn modifier_run(graph: &DependencyGraph, object: NodeId) -> String {
    graph
        .node_ids()
        .skip(object.0 + 1)
        .take_while(|&id| graph.tag(id).is_noun() || graph.tag(id).is_adjective())
        .map(|id| format!(" {}", graph.text(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::conjunction;
    use regvoc_core::TripleSink;

    fn run(tagged: &str, deps: &str) -> TripleSink {
        let graph = DependencyGraph::from_stanford(tagged, deps).unwrap();
        let sink = TripleSink::new();
        let mut state = SentenceState::new(graph.len());
        let mut out = Emitter::new(&sink);
        conjunction::map(&graph, &mut state);
        map(&graph, &mut state, &mut out);
        extract(&graph, &state, &mut out);
        sink
    }

    #[test]
    fn test_direct_objects_with_conjunction() {
        let sink = run(
            "agencies/NNS and/CC bureaus/NNS keep/VBP records/NNS",
            "nsubj(keep-4, agencies-1)\nconj_and(agencies-1, bureaus-3)\ndobj(keep-4, records-5)",
        );
        assert!(sink.contains(&Triple::custom("agencies", "keep", "records")));
        assert!(sink.contains(&Triple::custom("bureaus", "keep", "records")));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_negated_predicate() {
        let sink = run(
            "agency/NN does/VBZ not/RB release/VB drafts/NNS",
            "nsubj(release-4, agency-1)\naux(release-4, does-2)\nneg(release-4, not-3)\ndobj(release-4, drafts-5)",
        );
        assert_eq!(
            sink.snapshot(),
            vec![Triple::custom("agency", "not release", "drafts")]
        );
    }

    #[test]
    fn test_object_found_after_verb() {
        let sink = run(
            "requester/NN pays/VBZ for/IN search/NN review/NN costs/NNS today/RB",
            "nsubj(pays-2, requester-1)\nprep_for(pays-2, costs-6)",
        );
        assert_eq!(
            sink.snapshot(),
            vec![Triple::custom("requester", "pays", "search review costs")]
        );
    }

    #[test]
    fn test_nominal_subject_is_taxonomic() {
        let sink = run(
            "director/NN is/VBZ officer/NN",
            "nsubj(officer-3, director-1)\ncop(officer-3, is-2)",
        );
        assert_eq!(sink.snapshot(), vec![Triple::narrower("officer", "director")]);
    }

    #[test]
    fn test_verb_without_object_is_skipped() {
        let sink = run("records/NNS exist/VBP ./.", "nsubj(exist-2, records-1)");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tag_literal_object_skipped() {
        let sink = run(
            "agency/NN lists/VBZ NNS/NNS entries/NNS",
            "nsubj(lists-2, agency-1)",
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_negated_predicate_without_direct_object() {
        let sink = run(
            "agency/NN does/VBZ not/RB pay/VB for/IN search/NN costs/NNS",
            "nsubj(pay-4, agency-1)\naux(pay-4, does-2)\nneg(pay-4, not-3)\nprep_for(pay-4, costs-7)",
        );
        assert_eq!(
            sink.snapshot(),
            vec![Triple::custom("agency", "not pay", "search costs")]
        );
    }

    #[test]
    fn test_object_partner_without_modifier_run() {
        let sink = run(
            "requester/NN pays/VBZ for/IN search/NN costs/NNS or/CC review/NN",
            "nsubj(pays-2, requester-1)\nconj_or(search-4, review-7)",
        );
        assert!(sink.contains(&Triple::custom("requester", "pays", "search costs")));
        assert!(sink.contains(&Triple::custom("requester", "pays", "review")));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_direct_object_partner() {
        let sink = run(
            "agency/NN keeps/VBZ records/NNS and/CC files/NNS",
            "nsubj(keeps-2, agency-1)\ndobj(keeps-2, records-3)\nconj_and(records-3, files-5)",
        );
        assert!(sink.contains(&Triple::custom("agency", "keeps", "records")));
        assert!(sink.contains(&Triple::custom("agency", "keeps", "files")));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_non_noun_direct_object_dropped() {
        let sink = run(
            "agency/NN decides/VBZ whether/IN",
            "nsubj(decides-2, agency-1)\ndobj(decides-2, whether-3)",
        );
        assert!(sink.is_empty());
    }
}
