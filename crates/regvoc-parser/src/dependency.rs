//! Typed-dependency graphs
//!
//! A `DependencyGraph` owns the tokens of one sentence in sentence order and
//! the labeled governor→dependent edges between them. Nodes are addressed by
//! `NodeId`, the token's 0-based position.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::relation::Relation;
use crate::tag::PosTag;
use crate::{NodeId, ParserError, Result};

/// `nsubj(jumps-5, fox-4)`; copied nodes carry trailing quotes (`jumps-5'`)
static DEPENDENCY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_:]+)\((.+?)-(\d+)'*,\s*(.+?)-(\d+)'*\)\s*$")
        .expect("dependency line pattern is valid")
});

/// A tagged token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub tag: PosTag,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: impl Into<PosTag>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// A labeled governor→dependent edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub governor: NodeId,
    pub dependent: NodeId,
    pub relation: Relation,
}

/// Tokens plus typed dependencies for one sentence
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    tokens: Vec<Token>,
    edges: Vec<Dependency>,
}

impl DependencyGraph {
    /// Create a graph with no edges
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            edges: Vec::new(),
        }
    }

    /// Build from a `word/TAG` token line and Stanford dependency lines.
    ///
    /// Edges governed by the artificial `ROOT-0` node are dropped.
    pub fn from_stanford(tagged: &str, dependencies: &str) -> Result<Self> {
        let mut graph = Self::new(parse_tagged(tagged)?);

        for line in dependencies.lines().filter(|l| !l.trim().is_empty()) {
            let caps = DEPENDENCY_LINE
                .captures(line)
                .ok_or_else(|| ParserError::Malformed(format!("dependency line: {line}")))?;

            let governor: usize = caps[3]
                .parse()
                .map_err(|_| ParserError::Malformed(format!("governor index: {line}")))?;
            let dependent: usize = caps[5]
                .parse()
                .map_err(|_| ParserError::Malformed(format!("dependent index: {line}")))?;

            if governor == 0 || dependent == 0 {
                continue;
            }
            graph.add_edge(
                NodeId(governor - 1),
                NodeId(dependent - 1),
                Relation::from_label(&caps[1]),
            )?;
        }

        Ok(graph)
    }

    /// Add an edge between existing tokens
    pub fn add_edge(&mut self, governor: NodeId, dependent: NodeId, relation: Relation) -> Result<()> {
        for id in [governor, dependent] {
            if id.0 >= self.tokens.len() {
                return Err(ParserError::Malformed(format!(
                    "node {} out of range for {} tokens",
                    id.0 + 1,
                    self.tokens.len()
                )));
            }
        }
        self.edges.push(Dependency {
            governor,
            dependent,
            relation,
        });
        Ok(())
    }

    /// Keep only the edges matching `keep`
    pub fn retain_edges(&mut self, keep: impl FnMut(&Dependency) -> bool) {
        self.edges.retain(keep);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn edges(&self) -> &[Dependency] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, id: NodeId) -> &Token {
        &self.tokens[id.0]
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.tokens[id.0].text
    }

    pub fn tag(&self, id: NodeId) -> &PosTag {
        &self.tokens[id.0].tag
    }

    /// Node ids in sentence order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.tokens.len()).map(NodeId)
    }
}

/// Split `The/DT quick/JJ fox/NN` into tokens; words may contain `/`
pub fn parse_tagged(tagged: &str) -> Result<Vec<Token>> {
    tagged
        .split_whitespace()
        .map(|pair| {
            pair.rsplit_once('/')
                .filter(|(word, tag)| !word.is_empty() && !tag.is_empty())
                .map(|(word, tag)| Token::new(word, tag))
                .ok_or_else(|| ParserError::Malformed(format!("tagged token: {pair}")))
        })
        .collect()
}
