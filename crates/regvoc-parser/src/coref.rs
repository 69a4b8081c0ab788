//! Coreference pronoun rewriting
//!
//! A `Coreference` collaborator groups mentions into discourse entities.
//! `resolve_pronouns` then replaces every personal-pronoun mention with its
//! entity's representative text, so later sentences name the entity
//! explicitly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tag::PosTag;
use crate::{Result, TokenSpan};

/// One mention of an entity in the document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Byte span in the document text
    pub span: TokenSpan,
    /// Tag of the mention's head token
    pub tag: PosTag,
}

impl Mention {
    pub fn new(start: usize, end: usize, tag: impl Into<PosTag>) -> Self {
        Self {
            span: TokenSpan::new(start, end),
            tag: tag.into(),
        }
    }
}

/// An entity with a representative mention text and all its mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscourseEntity {
    pub representative: String,
    pub mentions: Vec<Mention>,
}

impl DiscourseEntity {
    pub fn new(representative: impl Into<String>, mentions: Vec<Mention>) -> Self {
        Self {
            representative: representative.into(),
            mentions,
        }
    }
}

/// Groups the mentions of a document into discourse entities
pub trait Coreference: Send + Sync {
    fn resolve(&self, text: &str) -> Result<Vec<DiscourseEntity>>;
}

/// Replace pronoun mentions with their entity's representative.
///
/// Spans that overlap an earlier replacement or fall off char boundaries are
/// left untouched.
pub fn resolve_pronouns(text: &str, entities: &[DiscourseEntity]) -> String {
    let mut replacements: Vec<(TokenSpan, &str)> = entities
        .iter()
        .flat_map(|entity| {
            entity
                .mentions
                .iter()
                .filter(|m| m.tag.is_pronoun())
                .map(move |m| (m.span, entity.representative.as_str()))
        })
        .filter(|(span, _)| !span.is_empty() && span.covered(text).is_some())
        .collect();
    replacements.sort_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (span, representative) in replacements {
        if span.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..span.start]);
        out.push_str(representative);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);

    debug!(entities = entities.len(), "Resolved pronoun mentions");
    out
}

/// Run a collaborator and rewrite its pronouns
pub fn rewrite_with(coref: &dyn Coreference, text: &str) -> Result<String> {
    let entities = coref.resolve(text)?;
    Ok(resolve_pronouns(text, &entities))
}
