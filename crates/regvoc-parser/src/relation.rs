//! Grammatical relation kinds
//!
//! Labels follow the Stanford collapsed/CC-processed convention
//! (`nsubj`, `dobj`, `conj_and`, `prep_of`, `prepc_such_as`, ...). They are
//! converted once at the parse boundary; the extractors only ever match on
//! `Relation`.

use serde::{Deserialize, Serialize};

/// Prepositions that mark a Hearst hyponymy pattern ("X such as Y")
pub const HEARST_MARKERS: [&str; 4] = ["as", "such_as", "including", "like"];

/// Typed dependency relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// `nsubj`
    NominalSubject,
    /// `nsubjpass`
    PassiveNominalSubject,
    /// `dobj`
    DirectObject,
    /// `amod`
    AdjectivalModifier,
    /// `nn` / `compound`
    NounCompound,
    /// `neg`
    Negation,
    /// `det`
    Determiner,
    /// `aux` / `auxpass`
    Auxiliary,
    /// `root`
    Root,
    /// `conj` or `conj_<coordinator>`
    Conjunction { coordinator: Option<String> },
    /// `prep_<word>` or, when `clausal`, `prepc_<word>`
    Preposition { word: String, clausal: bool },
    /// Any label the engine has no pattern for
    Other(String),
}

impl Relation {
    /// Convert a Stanford label
    pub fn from_label(label: &str) -> Self {
        match label {
            "nsubj" => Self::NominalSubject,
            "nsubjpass" => Self::PassiveNominalSubject,
            "dobj" => Self::DirectObject,
            "amod" => Self::AdjectivalModifier,
            "nn" | "compound" => Self::NounCompound,
            "neg" => Self::Negation,
            "det" => Self::Determiner,
            "aux" | "auxpass" => Self::Auxiliary,
            "root" => Self::Root,
            "conj" => Self::Conjunction { coordinator: None },
            _ => {
                if let Some(coordinator) = label.strip_prefix("conj_") {
                    Self::Conjunction {
                        coordinator: Some(coordinator.to_string()),
                    }
                } else if let Some(word) = non_empty(label.strip_prefix("prepc_")) {
                    Self::Preposition {
                        word: word.to_string(),
                        clausal: true,
                    }
                } else if let Some(word) = non_empty(label.strip_prefix("prep_")) {
                    Self::Preposition {
                        word: word.to_string(),
                        clausal: false,
                    }
                } else {
                    Self::Other(label.to_string())
                }
            }
        }
    }

    /// Render back to the Stanford label
    pub fn label(&self) -> String {
        match self {
            Self::NominalSubject => "nsubj".to_string(),
            Self::PassiveNominalSubject => "nsubjpass".to_string(),
            Self::DirectObject => "dobj".to_string(),
            Self::AdjectivalModifier => "amod".to_string(),
            Self::NounCompound => "nn".to_string(),
            Self::Negation => "neg".to_string(),
            Self::Determiner => "det".to_string(),
            Self::Auxiliary => "aux".to_string(),
            Self::Root => "root".to_string(),
            Self::Conjunction { coordinator: None } => "conj".to_string(),
            Self::Conjunction {
                coordinator: Some(c),
            } => format!("conj_{c}"),
            Self::Preposition {
                word,
                clausal: false,
            } => format!("prep_{word}"),
            Self::Preposition {
                word,
                clausal: true,
            } => format!("prepc_{word}"),
            Self::Other(label) => label.clone(),
        }
    }

    /// Either subject relation
    pub fn is_subject(&self) -> bool {
        matches!(self, Self::NominalSubject | Self::PassiveNominalSubject)
    }

    /// Prepositional relation marking a hyponymy pattern
    pub fn is_hearst(&self) -> bool {
        match self {
            Self::Preposition { word, .. } => HEARST_MARKERS.contains(&word.as_str()),
            _ => false,
        }
    }

    /// The preposition as words (`out_of` becomes `out of`)
    pub fn preposition(&self) -> Option<String> {
        match self {
            Self::Preposition { word, .. } => Some(word.replace('_', " ")),
            _ => None,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
