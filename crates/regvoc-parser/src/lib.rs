//! regvoc Parser - Parse collaborators for the extraction engine
//!
//! The engine never tokenizes or parses text itself. This crate defines what
//! it consumes:
//! - `DependencyGraph`: tagged tokens plus typed dependencies
//! - `ConstituencyTree`: Penn-Treebank phrase-structure trees
//! - `ParseSource`: the collaborator that segments and parses sentences
//!
//! It also carries the text-level collaborators used around extraction:
//! markup cleanup and pronoun rewriting from coreference output.

pub mod cleanup;
pub mod constituency;
pub mod coref;
pub mod dependency;
pub mod relation;
pub mod source;
pub mod tag;

pub use constituency::{ConstituencyTree, TreeNode, MAX_TREE_DEPTH};
pub use dependency::{Dependency, DependencyGraph, Token};
pub use relation::Relation;
pub use source::{Corpus, ParseSource, Parser, PreparsedSource, SerializedParser};
pub use tag::PosTag;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use regvoc_core::VocabError;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by parse collaborators
#[derive(Error, Debug)]
pub enum ParserError {
    /// Parser or tagger model could not be loaded
    #[error("Failed to load model {name}: {reason}")]
    ModelLoad { name: String, reason: String },

    /// Notation could not be read
    #[error("Malformed parse: {0}")]
    Malformed(String),

    /// The source has no parse of the requested form for this sentence
    #[error("No {form} parse for sentence: {sentence}")]
    MissingParse { form: ParseForm, sentence: String },

    /// The source holds no text block with this content
    #[error("Unknown text block: {0}")]
    UnknownBlock(String),

    /// A previous call panicked while holding the parser
    #[error("Parser unavailable after a failed call")]
    Unavailable,

    /// IO error while reading a corpus
    #[error("IO error reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParserError>;

impl From<ParserError> for VocabError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::ModelLoad { .. } => VocabError::ModelLoad(err.to_string()),
            ParserError::Io { .. } | ParserError::Json(_) => {
                VocabError::MalformedInput(err.to_string())
            }
            other => VocabError::Parse(other.to_string()),
        }
    }
}

// ============================================================================
// Shared Types
// ============================================================================

/// Stable index of a node inside one sentence's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Byte range of a token within its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered slice, if the span lies on char boundaries of `text`
    pub fn covered<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// A segmented sentence with its token spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<TokenSpan>,
}

impl Sentence {
    /// Tokenize on whitespace
    pub fn from_whitespace(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut tokens = Vec::new();
        let mut start = None;
        for (i, c) in text.char_indices() {
            match (c.is_whitespace(), start) {
                (true, Some(s)) => {
                    tokens.push(TokenSpan::new(s, i));
                    start = None;
                }
                (false, None) => start = Some(i),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(TokenSpan::new(s, text.len()));
        }
        Self { text, tokens }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Which parse representation is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseForm {
    Dependency,
    Constituency,
}

impl ParseForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dependency => "dependency graph",
            Self::Constituency => "constituency tree",
        }
    }
}

impl std::fmt::Display for ParseForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<regvoc_core::Strategy> for ParseForm {
    fn from(strategy: regvoc_core::Strategy) -> Self {
        match strategy {
            regvoc_core::Strategy::Dependency => Self::Dependency,
            regvoc_core::Strategy::Constituency => Self::Constituency,
        }
    }
}

/// A parsed sentence in either form
#[derive(Debug, Clone)]
pub enum SentenceParse {
    Dependencies(DependencyGraph),
    Constituents(ConstituencyTree),
}

impl SentenceParse {
    pub fn form(&self) -> ParseForm {
        match self {
            Self::Dependencies(_) => ParseForm::Dependency,
            Self::Constituents(_) => ParseForm::Constituency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_from_whitespace() {
        let sentence = Sentence::from_whitespace("Caleb likes  dogs.");
        assert_eq!(sentence.token_count(), 3);
        assert_eq!(sentence.tokens[2].covered(&sentence.text), Some("dogs."));
        assert_eq!(sentence.tokens[1], TokenSpan::new(6, 11));
    }

    #[test]
    fn test_parser_error_conversion() {
        let err: VocabError = ParserError::ModelLoad {
            name: "en-parser".to_string(),
            reason: "missing".to_string(),
        }
        .into();
        assert!(matches!(err, VocabError::ModelLoad(_)));

        let err: VocabError = ParserError::Malformed("tree".to_string()).into();
        assert!(matches!(err, VocabError::Parse(_)));
    }

    #[test]
    fn test_parse_form_from_strategy() {
        assert_eq!(
            ParseForm::from(regvoc_core::Strategy::Constituency),
            ParseForm::Constituency
        );
    }
}
