//! Penn-Treebank part-of-speech tags

use serde::{Deserialize, Serialize};

/// A Penn-Treebank tag or phrase label (`NN`, `VBZ`, `NP`, `PP`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosTag(String);

impl PosTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_noun(&self) -> bool {
        is_noun_tag(&self.0)
    }

    pub fn is_verb(&self) -> bool {
        matches!(
            self.0.as_str(),
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ"
        )
    }

    pub fn is_adjective(&self) -> bool {
        matches!(self.0.as_str(), "JJ" | "JJR" | "JJS")
    }

    pub fn is_adverb(&self) -> bool {
        matches!(self.0.as_str(), "RB" | "RBR" | "RBS")
    }

    /// Coordinating conjunction
    pub fn is_coordinator(&self) -> bool {
        self.0 == "CC"
    }

    /// Personal pronoun
    pub fn is_pronoun(&self) -> bool {
        self.0 == "PRP"
    }

    /// Noun, verb or adjective
    pub fn is_content(&self) -> bool {
        self.is_noun() || self.is_verb() || self.is_adjective()
    }
}

/// Whether `s` is literally one of the noun tags
pub fn is_noun_tag(s: &str) -> bool {
    matches!(s, "NN" | "NNS" | "NNP" | "NNPS")
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PosTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
