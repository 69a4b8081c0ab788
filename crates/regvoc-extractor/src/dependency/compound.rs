//! Noun-compound qualification
//!
//! `nn(officer, access)` yields `officer ⊃ access officer`. Repeated compounds
//! on one head nest: with `records officer` already recorded, the second
//! compound produces `records access officer` and links it below
//! `access officer`.

use regvoc_core::Triple;
use regvoc_parser::{DependencyGraph, Relation};

use super::state::SentenceState;
use crate::{Emitter, PLACEHOLDER};

pub(crate) fn extract(graph: &DependencyGraph, state: &mut SentenceState, out: &mut Emitter<'_>) {
    for edge in graph
        .edges()
        .iter()
        .filter(|e| e.relation == Relation::NounCompound)
    {
        let head = graph.text(edge.governor);
        let modifier = graph.text(edge.dependent);
        if modifier == PLACEHOLDER {
            continue;
        }

        let phrase = format!("{modifier} {head}");
        out.emit_with_inversion(Triple::narrower(head, &phrase));

        let h = edge.governor.0;
        state.compounds[h] = Some(match state.compounds[h].take() {
            Some(chain) => format!("{modifier} {chain}"),
            None => phrase.clone(),
        });

        let nested = state.vocab[h]
            .last()
            .map(|previous| splice(previous, head, modifier));
        match nested {
            Some(nested) => {
                out.emit_with_inversion(Triple::narrower(&phrase, &nested));
                state.vocab[h].push(nested);
            }
            None => state.vocab[h].push(phrase),
        }
    }
}

/// Insert `modifier` just before the trailing `head` of `previous`
fn splice(previous: &str, head: &str, modifier: &str) -> String {
    match previous.strip_suffix(head) {
        Some(prefix) if prefix.is_empty() || prefix.ends_with(' ') => {
            format!("{prefix}{modifier} {head}")
        }
        _ => format!("{modifier} {previous}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regvoc_core::TripleSink;

    #[test]
    fn test_splice() {
        assert_eq!(splice("records officer", "officer", "access"), "records access officer");
        assert_eq!(splice("officer", "officer", "access"), "access officer");
        assert_eq!(splice("chief officers", "officer", "access"), "access chief officers");
    }

    #[test]
    fn test_compound_chain() {
        let graph = DependencyGraph::from_stanford(
            "records/NNS access/NN officer/NN",
            "nn(officer-3, records-1)\nnn(officer-3, access-2)",
        )
        .unwrap();
        let sink = TripleSink::new();
        let mut out = Emitter::new(&sink);
        let mut state = SentenceState::new(graph.len());
        extract(&graph, &mut state, &mut out);

        assert_eq!(state.vocab[2], vec!["records officer", "records access officer"]);
        assert_eq!(state.compounds[2].as_deref(), Some("access records officer"));

        assert!(sink.contains(&Triple::narrower("officer", "records officer")));
        assert!(sink.contains(&Triple::broader("records officer", "officer")));
        assert!(sink.contains(&Triple::narrower("officer", "access officer")));
        assert!(sink.contains(&Triple::narrower("access officer", "records access officer")));
        assert!(sink.contains(&Triple::broader("records access officer", "access officer")));
        assert_eq!(sink.len(), 6);
        assert_eq!(out.added(), 3);
    }

    #[test]
    fn test_placeholder_modifier_skipped() {
        let graph =
            DependencyGraph::from_stanford("other/JJ records/NNS", "nn(records-2, other-1)").unwrap();
        let sink = TripleSink::new();
        let mut state = SentenceState::new(graph.len());
        extract(&graph, &mut state, &mut Emitter::new(&sink));
        assert!(sink.is_empty());
        assert!(state.vocab[1].is_empty());
    }
}
