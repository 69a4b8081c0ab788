//! Per-sentence tables shared between dependency stages
//!
//! Every table is indexed by `NodeId` and sized to the sentence, so stages
//! never hash nodes. The state lives for one `extract` call.

use regvoc_parser::{DependencyGraph, NodeId};

#[derive(Debug, Clone, Default)]
pub struct SentenceState {
    /// Qualified phrases recorded per node, in insertion order
    pub vocab: Vec<Vec<String>>,
    /// Compound-modifier chain per head (`"access records officer"`)
    pub compounds: Vec<Option<String>>,
    /// Symmetric conjunction partner
    pub conj: Vec<Option<NodeId>>,
    /// Predicates carrying a negation
    pub negated: Vec<bool>,
    /// Verb → subject nodes
    pub subjects: Vec<Vec<NodeId>>,
    /// Verb → direct-object nodes
    pub objects: Vec<Vec<NodeId>>,
}

impl SentenceState {
    pub fn new(len: usize) -> Self {
        Self {
            vocab: vec![Vec::new(); len],
            compounds: vec![None; len],
            conj: vec![None; len],
            negated: vec![false; len],
            subjects: vec![Vec::new(); len],
            objects: vec![Vec::new(); len],
        }
    }

    /// Longest recorded phrase (first on ties), else the surface text
    pub fn fully_qualified(&self, graph: &DependencyGraph, id: NodeId) -> String {
        let mut best: Option<&String> = None;
        for phrase in &self.vocab[id.0] {
            if best.map_or(true, |b| phrase.chars().count() > b.chars().count()) {
                best = Some(phrase);
            }
        }
        best.cloned()
            .unwrap_or_else(|| graph.text(id).to_string())
    }

    /// Every recorded phrase, else just the surface text
    pub fn candidates(&self, graph: &DependencyGraph, id: NodeId) -> Vec<String> {
        if self.vocab[id.0].is_empty() {
            vec![graph.text(id).to_string()]
        } else {
            self.vocab[id.0].clone()
        }
    }

    pub fn partner(&self, id: NodeId) -> Option<NodeId> {
        self.conj[id.0]
    }
}
