//! Constituency (phrase-structure) trees
//!
//! The tree is an arena: every node lives in one `Vec`, children are ordered
//! `NodeId` lists and parent links are plain indices. Pre-terminal nodes
//! carry the Penn-Treebank tag as their label and the word.

use serde::Serialize;

use crate::tag::PosTag;
use crate::{NodeId, ParserError, Result};

/// Deepest bracket nesting accepted by `from_bracketed`
pub const MAX_TREE_DEPTH: usize = 512;

/// One node of a constituency tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Phrase label (`NP`, `VP`, `S`) or POS tag for pre-terminals
    pub label: PosTag,
    /// The word, for pre-terminals only
    pub word: Option<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// Arena-backed constituency tree for one sentence
#[derive(Debug, Clone, Serialize)]
pub struct ConstituencyTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl ConstituencyTree {
    /// Parse Penn-Treebank bracket notation:
    /// `(ROOT (S (NP (DT The) (NN fox)) (VP (VBZ jumps))))`.
    ///
    /// An unlabeled outer bracket becomes a `ROOT` node. Trees nested deeper
    /// than `MAX_TREE_DEPTH` are rejected as malformed.
    pub fn from_bracketed(input: &str) -> Result<Self> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(ParserError::Malformed("empty tree".to_string()));
        }

        let (nodes, root) = build(&tokens)?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn label(&self, id: NodeId) -> &PosTag {
        &self.nodes[id.0].label
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn is_preterminal(&self, id: NodeId) -> bool {
        self.nodes[id.0].word.is_some()
    }

    /// The word of a pre-terminal
    pub fn word(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].word.as_deref()
    }

    /// Other children of this node's parent, in order
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.parent(id)
            .map(|p| self.children(p))
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |&s| s != id)
    }

    /// Pre-terminals below `id` in left-to-right order
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_leaves(id, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if self.is_preterminal(id) {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
    }

    /// Words below `id` joined by single spaces
    pub fn surface_text(&self, id: NodeId) -> String {
        self.leaves(id)
            .into_iter()
            .filter_map(|leaf| self.word(leaf))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All nodes in depth-first pre-order
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// First pre-terminal below `id` (depth-first) whose tag satisfies `pred`
    pub fn find_first(&self, id: NodeId, pred: impl Fn(&PosTag) -> bool) -> Option<NodeId> {
        self.leaves(id)
            .into_iter()
            .find(|&leaf| pred(self.label(leaf)))
    }
}

fn tokenize(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in input.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&input[s..i]);
            }
            if !c.is_whitespace() {
                tokens.push(&input[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&input[s..]);
    }
    tokens
}

fn build(tokens: &[&str]) -> Result<(Vec<TreeNode>, NodeId)> {
    let mut nodes: Vec<TreeNode> = Vec::new();
    let mut open: Vec<NodeId> = Vec::new();
    let mut root = None;
    let mut pos = 0;

    while let Some(&token) = tokens.get(pos) {
        match token {
            "(" => {
                let parent = open.last().copied();
                if parent.is_none() && root.is_some() {
                    return Err(ParserError::Malformed(format!(
                        "trailing input after tree at token {pos}"
                    )));
                }
                if let Some(p) = parent.filter(|p| nodes[p.0].word.is_some()) {
                    return Err(ParserError::Malformed(format!(
                        "pre-terminal {} has a child phrase",
                        nodes[p.0].label.as_str()
                    )));
                }
                if open.len() >= MAX_TREE_DEPTH {
                    return Err(ParserError::Malformed(format!(
                        "tree nested deeper than {MAX_TREE_DEPTH} levels"
                    )));
                }
                pos += 1;

                let label = match tokens.get(pos) {
                    Some(&"(") | Some(&")") | None => "ROOT",
                    Some(atom) => {
                        pos += 1;
                        *atom
                    }
                };
                let id = NodeId(nodes.len());
                nodes.push(TreeNode {
                    label: PosTag::new(label),
                    word: None,
                    children: Vec::new(),
                    parent,
                });
                match parent {
                    Some(p) => nodes[p.0].children.push(id),
                    None => root = Some(id),
                }
                open.push(id);
            }
            ")" => {
                if open.pop().is_none() {
                    return Err(ParserError::Malformed(format!("unexpected ')' at token {pos}")));
                }
                pos += 1;
            }
            word => {
                let Some(&id) = open.last() else {
                    return Err(ParserError::Malformed(format!("expected '(' at token {pos}")));
                };
                let node = &mut nodes[id.0];
                if node.word.is_some() || !node.children.is_empty() {
                    return Err(ParserError::Malformed(format!(
                        "unexpected word '{word}' in {}",
                        node.label.as_str()
                    )));
                }
                node.word = Some(word.to_string());
                pos += 1;
            }
        }
    }

    if !open.is_empty() {
        return Err(ParserError::Malformed("unbalanced brackets".to_string()));
    }
    let root = root.ok_or_else(|| ParserError::Malformed("empty tree".to_string()))?;
    Ok((nodes, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "(ROOT (S (NP (DT The) (JJ quick) (JJ brown) (NN fox)) \
        (VP (VBZ jumps) (PP (IN over) (NP (DT the) (JJ lazy) (NN dog)))) (. .)))";

    #[test]
    fn test_from_bracketed() {
        let tree = ConstituencyTree::from_bracketed(FOX).unwrap();
        assert_eq!(tree.label(tree.root()).as_str(), "ROOT");
        assert_eq!(
            tree.surface_text(tree.root()),
            "The quick brown fox jumps over the lazy dog ."
        );
        assert_eq!(tree.leaves(tree.root()).len(), 10);
    }

    #[test]
    fn test_parent_links_and_siblings() {
        let tree = ConstituencyTree::from_bracketed(FOX).unwrap();
        let fox = tree
            .find_first(tree.root(), |tag| tag.is_noun())
            .unwrap();
        assert_eq!(tree.word(fox), Some("fox"));

        let np = tree.parent(fox).unwrap();
        assert_eq!(tree.label(np).as_str(), "NP");
        let siblings: Vec<_> = tree.siblings(fox).filter_map(|s| tree.word(s)).collect();
        assert_eq!(siblings, vec!["The", "quick", "brown"]);
    }

    #[test]
    fn test_preorder_starts_at_root() {
        let tree = ConstituencyTree::from_bracketed(FOX).unwrap();
        let order = tree.preorder();
        assert_eq!(order.len(), tree.len());
        assert_eq!(order[0], tree.root());
        assert_eq!(tree.label(order[1]).as_str(), "S");
        assert_eq!(tree.label(order[2]).as_str(), "NP");
    }

    #[test]
    fn test_unlabeled_root() {
        let tree = ConstituencyTree::from_bracketed("((S (NP (NNS records)) (VP (VBP exist))))").unwrap();
        assert_eq!(tree.label(tree.root()).as_str(), "ROOT");
        assert_eq!(tree.surface_text(tree.root()), "records exist");
    }

    #[test]
    fn test_malformed_trees() {
        assert!(ConstituencyTree::from_bracketed("").is_err());
        assert!(ConstituencyTree::from_bracketed("(S (NP (NN fox))").is_err());
        assert!(ConstituencyTree::from_bracketed("(S (NN fox)) (S)").is_err());
        assert!(ConstituencyTree::from_bracketed("(NN fox dog)").is_err());
        assert!(ConstituencyTree::from_bracketed("(NN fox (NN dog))").is_err());
        assert!(ConstituencyTree::from_bracketed("fox (NN dog)").is_err());
        assert!(ConstituencyTree::from_bracketed("(NN fox))").is_err());
    }

    fn nested(depth: usize) -> String {
        format!("{}(NN x){}", "(NP ".repeat(depth - 1), ")".repeat(depth - 1))
    }

    #[test]
    fn test_depth_limit() {
        let tree = ConstituencyTree::from_bracketed(&nested(MAX_TREE_DEPTH)).unwrap();
        assert_eq!(tree.len(), MAX_TREE_DEPTH);
        assert_eq!(tree.surface_text(tree.root()), "x");

        let err = ConstituencyTree::from_bracketed(&nested(MAX_TREE_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, ParserError::Malformed(_)));
        assert!(ConstituencyTree::from_bracketed(&nested(20_000)).is_err());
    }
}
