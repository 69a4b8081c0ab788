//! Prepositional phrases and Hearst hyponymy patterns
//!
//! `prep_for(fees, search)` yields `fees ⊃ fees for search` and
//! `search ~ fees for search`. Hearst markers (`such as`, `including`, `like`,
//! `as`) mark the dependent as a narrower term of the governor instead.

use regvoc_core::Triple;
use regvoc_parser::DependencyGraph;

use super::state::SentenceState;
use crate::Emitter;

/// Candidates of this many words are shortened to their head word
const LONG_CANDIDATE_WORDS: usize = 3;

pub(crate) fn extract(graph: &DependencyGraph, state: &mut SentenceState, out: &mut Emitter<'_>) {
    for edge in graph.edges() {
        let Some(preposition) = edge.relation.preposition() else {
            continue;
        };
        if edge.relation.is_hearst()
            || !graph.tag(edge.governor).is_noun()
            || !(graph.tag(edge.dependent).is_noun() || graph.tag(edge.dependent).is_verb())
        {
            continue;
        }

        let governor = graph.text(edge.governor);
        let dependent = graph.text(edge.dependent);

        let objects = state.candidates(graph, edge.dependent);
        for subject in state.candidates(graph, edge.governor) {
            for object in &objects {
                let (subject, object) = shorten(&subject, object, governor, dependent);
                let phrase = format!("{subject} {preposition} {object}");
                out.emit(Triple::narrower(subject, &phrase));
                out.emit(Triple::related(object, &phrase));
            }
        }

        state.vocab[edge.governor.0].push(format!("{governor} {preposition} {dependent}"));
    }
}

/// `Narrower(governor, dependent)` for every Hearst-marked edge
pub(crate) fn hearst_patterns(graph: &DependencyGraph, out: &mut Emitter<'_>) {
    for edge in graph.edges().iter().filter(|e| e.relation.is_hearst()) {
        out.emit(Triple::narrower(
            graph.text(edge.governor),
            graph.text(edge.dependent),
        ));
    }
}

/// Keeps phrases from stacking a second preposition onto a long candidate.
///
/// A long subject falls back to the governor word. The object falls back to
/// the dependent word when it is longer than three words and the subject is
/// long too, or when it has three or more words and the subject is short.
fn shorten<'a>(
    subject: &'a str,
    object: &'a str,
    governor: &'a str,
    dependent: &'a str,
) -> (&'a str, &'a str) {
    let s = subject.split_whitespace().count();
    let o = object.split_whitespace().count();
    match (s >= LONG_CANDIDATE_WORDS, o) {
        (true, o) if o > LONG_CANDIDATE_WORDS => (governor, dependent),
        (true, _) => (governor, object),
        (false, o) if o >= LONG_CANDIDATE_WORDS => (subject, dependent),
        (false, _) => (subject, object),
    }
}
