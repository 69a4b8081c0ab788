//! Text cleanup applied to regulatory text before segmentation
//!
//! Removes markup, enumeration numbers and parenthesized asides, and
//! rewrites punctuation so the parser sees plain declarative sentences.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ParserError, Result};

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*?>").expect("markup pattern is valid"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("space pattern is valid"));
static SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[§¤]").expect("section pattern is valid"));
static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;:]").expect("clause pattern is valid"));
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthesis pattern is valid"));
static NUMERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.*").expect("numeral pattern is valid"));
static CURLY_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[“”ÒÓ]").expect("quote pattern is valid"));

/// Replacement for configured agency names
pub const AGENCY: &str = "Agency";

/// Text cleaner with an optional agency-name list
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    agencies: Vec<String>,
}

impl Cleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agency names replaced by `Agency`, longest first
    pub fn with_agencies(mut self, agencies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.agencies
            .extend(agencies.into_iter().map(Into::<String>::into).filter(|a| !a.trim().is_empty()));
        self.agencies.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.agencies.dedup();
        self
    }

    /// Read one agency name per line
    pub fn from_agency_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ParserError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::new().with_agencies(content.lines().map(str::trim)))
    }

    pub fn agencies(&self) -> &[String] {
        &self.agencies
    }

    pub fn clean(&self, text: &str) -> String {
        let text = MARKUP.replace_all(text, "");
        let text = text.replace("and/or", "or").replace("and\\or", "or");
        let text = SPACES.replace_all(&text, " ");
        let text = SECTION.replace_all(&text, "Section");
        let text = CLAUSE_BREAK.replace_all(&text, ".");
        let text = PARENTHESIZED.replace_all(&text, "");
        let text = NUMERAL.replace_all(&text, "");
        let text = CURLY_QUOTE.replace_all(&text, "\"");
        let mut text = text.replace(", or", " or").replace(", and", " and");

        for agency in &self.agencies {
            text = text.replace(agency.as_str(), AGENCY);
        }

        SPACES.replace_all(&text, " ").trim().to_string()
    }
}

/// Clean with no agency list
pub fn clean_text(text: &str) -> String {
    Cleaner::new().clean(text)
}
