//! Vocabulary triples
//!
//! A `Triple` is a `(subject, predicate, object)` statement between two
//! vocabulary terms. All three parts are normalized on construction, so
//! equality and hashing compare the normalized forms.

use serde::Serialize;

/// Terms must be strictly longer than this (in characters) to be stored
pub const MIN_TERM_LENGTH: usize = 2;

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a term for storage and comparison.
///
/// Lowercases, folds a fixed set of non-ASCII characters to ASCII, removes
/// commas, parentheses and the reserved URI characters `% $ # [ ]`, collapses
/// whitespace runs and trims. Applying it twice yields the same string.
pub fn normalize(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        if let Some(mapped) = fold_char(c) {
            folded.push(mapped);
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map one lowercased character; `None` drops it
fn fold_char(c: char) -> Option<char> {
    match c {
        ',' | '(' | ')' | '%' | '$' | '#' | '[' | ']' => None,
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => Some('\''),
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => Some('"'),
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => Some('-'),
        '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
        '\u{00F1}' => Some('n'),
        other => Some(other),
    }
}

fn is_storable(term: &str) -> bool {
    term.chars().count() > MIN_TERM_LENGTH
}

// ============================================================================
// Predicate
// ============================================================================

/// Relation kind of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Object is a narrower term of the subject
    Narrower,
    /// Object is a broader term of the subject
    Broader,
    /// Symmetric association
    Related,
    /// Free-form predicate, usually a verb phrase
    Custom(String),
}

impl Predicate {
    /// Build a custom predicate from raw text
    pub fn custom(text: &str) -> Self {
        Self::Custom(normalize(text))
    }

    /// Get the predicate text
    pub fn as_str(&self) -> &str {
        match self {
            Self::Narrower => "narrower",
            Self::Broader => "broader",
            Self::Related => "related",
            Self::Custom(text) => text,
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(text) => write!(f, "{text}"),
            skos => write!(f, "skos:{}", skos.as_str()),
        }
    }
}

// ============================================================================
// Triple
// ============================================================================

/// A normalized vocabulary statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Triple {
    subject: String,
    predicate: Predicate,
    object: String,
}

impl Triple {
    /// Create a triple, normalizing every part
    pub fn new(subject: &str, predicate: Predicate, object: &str) -> Self {
        let predicate = match predicate {
            Predicate::Custom(text) => Predicate::custom(&text),
            skos => skos,
        };
        Self {
            subject: normalize(subject),
            predicate,
            object: normalize(object),
        }
    }

    /// `object` is narrower than `subject`
    pub fn narrower(subject: &str, object: &str) -> Self {
        Self::new(subject, Predicate::Narrower, object)
    }

    /// `object` is broader than `subject`
    pub fn broader(subject: &str, object: &str) -> Self {
        Self::new(subject, Predicate::Broader, object)
    }

    /// `subject` and `object` are related
    pub fn related(subject: &str, object: &str) -> Self {
        Self::new(subject, Predicate::Related, object)
    }

    /// Free-form predicate triple
    pub fn custom(subject: &str, predicate: &str, object: &str) -> Self {
        Self::new(subject, Predicate::custom(predicate), object)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    /// Whether every part survives the length invariant
    pub fn is_valid(&self) -> bool {
        is_storable(&self.subject) && is_storable(self.predicate.as_str()) && is_storable(&self.object)
    }

    /// Swap subject and object, turning narrower into broader and back
    pub fn inversion(&self) -> Self {
        let predicate = match &self.predicate {
            Predicate::Narrower => Predicate::Broader,
            Predicate::Broader => Predicate::Narrower,
            other => other.clone(),
        };
        Self {
            subject: self.object.clone(),
            predicate,
            object: self.subject.clone(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}
