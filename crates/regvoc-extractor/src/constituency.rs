//! Constituency-tree extraction strategy
//!
//! One pre-order pass over the tree. Noun phrases qualify their head with
//! the preceding nouns and adjectives, coordinations relate their conjuncts,
//! and clauses yield a subject-verb-object triple together with the
//! attributes found around each of the three.

use regvoc_core::{normalize, Result, Triple, TripleSink};
use regvoc_parser::{ConstituencyTree, NodeId, ParseForm, SentenceParse};
use tracing::debug;

use crate::{form_mismatch, Emitter, ExtractionStrategy};

/// Nested VPs searched below a clause's VP
const MAX_VERB_DEPTH: usize = 8;

const CLAUSE_LABELS: [&str; 3] = ["S", "SINV", "SQ"];

/// Siblings that qualify a noun
const NOUN_ATTRIBUTE_LABELS: [&str; 9] = ["DT", "PRP$", "POS", "JJ", "JJR", "JJS", "CD", "QP", "NP"];

/// Heuristics over a Penn-Treebank constituency tree
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstituencyStrategy;

impl ConstituencyStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStrategy for ConstituencyStrategy {
    fn form(&self) -> ParseForm {
        ParseForm::Constituency
    }

    fn extract(&self, parse: &SentenceParse, sink: &TripleSink) -> Result<usize> {
        let SentenceParse::Constituents(tree) = parse else {
            return Err(form_mismatch(self.form(), parse));
        };

        let mut out = Emitter::new(sink);
        for id in tree.preorder() {
            let label = tree.label(id);
            if label.as_str() == "NP" {
                noun_phrase(tree, id, &mut out);
            } else if label.is_coordinator() {
                coordination(tree, id, &mut out);
            } else if CLAUSE_LABELS.contains(&label.as_str()) {
                clause(tree, id, &mut out);
            }
        }

        debug!(nodes = tree.len(), added = out.added(), "Extracted constituency triples");
        Ok(out.added())
    }
}

// ============================================================================
// Noun Phrases and Coordination
// ============================================================================

fn noun_phrase(tree: &ConstituencyTree, np: NodeId, out: &mut Emitter<'_>) {
    let Some((&main, modifiers)) = tree.children(np).split_last() else {
        return;
    };
    let Some(head) = tree.word(main).filter(|_| tree.label(main).is_noun()) else {
        return;
    };

    for &child in modifiers {
        let tag = tree.label(child);
        if let Some(word) = tree.word(child).filter(|_| tag.is_noun() || tag.is_adjective()) {
            out.emit_with_inversion(Triple::narrower(head, &format!("{word} {head}")));
        }
    }
}

fn coordination(tree: &ConstituencyTree, cc: NodeId, out: &mut Emitter<'_>) {
    let conjuncts: Vec<String> = tree
        .siblings(cc)
        .filter_map(|sibling| conjunct_term(tree, collapse(tree, sibling)))
        .collect();

    for (i, a) in conjuncts.iter().enumerate() {
        for b in &conjuncts[i + 1..] {
            if a != b {
                out.emit(Triple::related(a, b));
            }
        }
    }
}

/// Descend through leading nested NPs
fn collapse(tree: &ConstituencyTree, mut id: NodeId) -> NodeId {
    while tree.label(id).as_str() == "NP" {
        match tree
            .children(id)
            .iter()
            .copied()
            .find(|&c| tree.label(c).as_str() == "NP")
        {
            Some(nested) => id = nested,
            None => break,
        }
    }
    id
}

/// A noun word, or the noun/adjective words of an NP headed by a noun
fn conjunct_term(tree: &ConstituencyTree, id: NodeId) -> Option<String> {
    if tree.is_preterminal(id) {
        return tree
            .word(id)
            .filter(|_| tree.label(id).is_noun())
            .map(str::to_string);
    }
    if tree.label(id).as_str() != "NP" {
        return None;
    }

    let leaves = tree.leaves(id);
    let last = *leaves.last()?;
    if !tree.label(last).is_noun() {
        return None;
    }
    let words: Vec<&str> = leaves
        .into_iter()
        .filter(|&leaf| tree.label(leaf).is_noun() || tree.label(leaf).is_adjective())
        .filter_map(|leaf| tree.word(leaf))
        .collect();
    Some(words.join(" "))
}

// ============================================================================
// Clauses
// ============================================================================

fn clause(tree: &ConstituencyTree, clause: NodeId, out: &mut Emitter<'_>) {
    let find_child = |label: &str| {
        tree.children(clause)
            .iter()
            .copied()
            .find(|&c| tree.label(c).as_str() == label)
    };
    let (Some(np), Some(vp)) = (find_child("NP"), find_child("VP")) else {
        return;
    };

    let Some(subject) = tree.find_first(np, |tag| tag.is_noun()) else {
        return;
    };
    let Some(verb) = deepest_verb(tree, vp) else {
        return;
    };
    let Some(object) = find_object(tree, verb) else {
        return;
    };

    for head in [subject, verb, object] {
        emit_attributes(tree, head, out);
    }

    let (Some(s), Some(v), Some(o)) = (tree.word(subject), tree.word(verb), tree.word(object)) else {
        return;
    };
    if !normalize(v).is_empty() {
        out.emit(Triple::custom(s, v, o));
    }
}

/// Verb pre-terminal at the greatest VP depth; the first one wins ties
fn deepest_verb(tree: &ConstituencyTree, vp: NodeId) -> Option<NodeId> {
    let mut best: Option<(usize, NodeId)> = None;
    search_verb(tree, vp, 0, &mut best);
    best.map(|(_, id)| id)
}

fn search_verb(tree: &ConstituencyTree, vp: NodeId, depth: usize, best: &mut Option<(usize, NodeId)>) {
    for &child in tree.children(vp) {
        if tree.is_preterminal(child) && tree.label(child).is_verb() {
            if best.map_or(true, |(d, _)| depth > d) {
                *best = Some((depth, child));
            }
        } else if tree.label(child).as_str() == "VP" && depth < MAX_VERB_DEPTH {
            search_verb(tree, child, depth + 1, best);
        }
    }
}

/// First noun of a PP/NP, or first adjective of an ADJP, beside the verb
fn find_object(tree: &ConstituencyTree, verb: NodeId) -> Option<NodeId> {
    let parent = tree.parent(verb)?;
    tree.children(parent).iter().find_map(|&child| match tree.label(child).as_str() {
        "PP" | "NP" => tree.find_first(child, |tag| tag.is_noun()),
        "ADJP" => tree.find_first(child, |tag| tag.is_adjective()),
        _ => None,
    })
}

fn emit_attributes(tree: &ConstituencyTree, head: NodeId, out: &mut Emitter<'_>) {
    let Some(word) = tree.word(head) else {
        return;
    };
    for attribute in attributes(tree, head) {
        out.emit_with_inversion(Triple::narrower(word, &format!("{attribute} {word}")));
    }
}

/// Surface texts of the satellites qualifying `head`
fn attributes(tree: &ConstituencyTree, head: NodeId) -> Vec<String> {
    let tag = tree.label(head);
    let uncles: Vec<NodeId> = tree
        .parent(head)
        .map(|p| tree.siblings(p).collect())
        .unwrap_or_default();

    let mut found = Vec::new();
    if tag.is_adjective() {
        found.extend(
            tree.siblings(head)
                .filter(|&s| tree.is_preterminal(s) && tree.label(s).is_adverb()),
        );
    } else if tag.is_noun() {
        found.extend(
            tree.siblings(head)
                .filter(|&s| NOUN_ATTRIBUTE_LABELS.contains(&tree.label(s).as_str())),
        );
        found.extend(uncles.iter().copied().filter(|&u| tree.label(u).as_str() == "PP"));
    } else if tag.is_verb() {
        found.extend(tree.siblings(head).filter(|&s| tree.label(s).as_str() == "ADVP"));
        found.extend(
            uncles
                .iter()
                .copied()
                .filter(|&u| tree.is_preterminal(u) && tree.label(u).is_verb()),
        );
    }

    found.into_iter().map(|id| tree.surface_text(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "(ROOT (S (NP (DT The) (JJ quick) (JJ brown) (NN fox)) \
        (VP (VBZ jumps) (PP (IN over) (NP (DT the) (JJ lazy) (NN dog)))) (. .)))";

    fn extract(bracketed: &str) -> TripleSink {
        let tree = ConstituencyTree::from_bracketed(bracketed).unwrap();
        let sink = TripleSink::new();
        ConstituencyStrategy
            .extract(&SentenceParse::Constituents(tree), &sink)
            .unwrap();
        sink
    }

    #[test]
    fn test_fox_clause() {
        let sink = extract(FOX);
        assert!(sink.contains(&Triple::custom("fox", "jumps", "dog")));
        assert!(sink.contains(&Triple::narrower("fox", "quick fox")));
        assert!(sink.contains(&Triple::broader("brown fox", "fox")));
        assert!(sink.contains(&Triple::narrower("dog", "lazy dog")));
        assert!(sink.contains(&Triple::narrower("fox", "the fox")));
    }

    #[test]
    fn test_deepest_verb_under_auxiliaries() {
        let tree = ConstituencyTree::from_bracketed(
            "(ROOT (S (NP (NN agency)) (VP (MD may) (VP (VB have) (VP (VBN denied) (NP (NNS requests)))))))",
        )
        .unwrap();
        let vp = tree
            .preorder()
            .into_iter()
            .find(|&id| tree.label(id).as_str() == "VP")
            .unwrap();
        let verb = deepest_verb(&tree, vp).unwrap();
        assert_eq!(tree.word(verb), Some("denied"));
        assert_eq!(
            find_object(&tree, verb).and_then(|o| tree.word(o)),
            Some("requests")
        );
    }

    #[test]
    fn test_adjective_object() {
        let sink = extract(
            "(ROOT (S (NP (DT The) (NN agency)) (VP (VBZ remains) (ADJP (RB fully) (JJ responsible))) (. .)))",
        );
        assert!(sink.contains(&Triple::custom("agency", "remains", "responsible")));
        assert!(sink.contains(&Triple::narrower("responsible", "fully responsible")));
    }

    #[test]
    fn test_coordination() {
        let sink = extract(
            "(ROOT (NP (NP (NN reference) (NN material)) (CC or) (NP (DT a) (NN guide))))",
        );
        assert!(sink.contains(&Triple::related("reference material", "guide")));
        assert!(sink.contains(&Triple::narrower("material", "reference material")));
        assert!(sink.contains(&Triple::broader("reference material", "material")));
    }

    #[test]
    fn test_coordination_of_bare_nouns() {
        let sink = extract("(ROOT (NP (NNS records) (CC or) (NN information)))");
        assert!(sink.contains(&Triple::related("records", "information")));
        assert!(!sink.contains(&Triple::related("information", "records")));
    }

    #[test]
    fn test_clause_without_object_is_abandoned() {
        let sink = extract("(ROOT (S (NP (NNS records)) (VP (VBP exist)) (. .)))");
        assert!(sink.is_empty());
    }
}
