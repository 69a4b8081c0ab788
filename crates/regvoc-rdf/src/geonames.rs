//! GeoNames entity links
//!
//! A link file holds one `uri|name` entry per line, as preprocessed from the
//! GeoNames city and country dumps:
//!
//! ```text
//! http://sws.geonames.org/5128581/|New York City
//! http://sws.geonames.org/6252001/|United States
//! ```
//!
//! Names are matched against vocabulary terms after term normalization, so
//! the match is case-insensitive.

use std::collections::HashMap;
use std::path::Path;

use oxrdf::NamedNode;
use tracing::debug;

use regvoc_core::normalize;

use crate::{RdfError, Result};

/// GeoNames ontology namespace
pub const GEONAMES_ONTOLOGY: &str = "http://www.geonames.org/ontology#";

/// Name to GeoNames feature IRI
#[derive(Debug, Clone, Default)]
pub struct GeoNames {
    links: HashMap<String, String>,
}

impl GeoNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `uri|name` link file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RdfError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let geonames = Self::parse(&content)?;
        debug!(path = %path.display(), links = geonames.len(), "Loaded GeoNames links");
        Ok(geonames)
    }

    /// Parse link lines; blank lines are ignored and later entries win
    pub fn parse(content: &str) -> Result<Self> {
        let mut geonames = Self::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let entry_error = |reason: String| RdfError::GeoNamesEntry {
                line: index + 1,
                reason,
            };

            let Some((uri, name)) = line.split_once('|') else {
                return Err(entry_error("expected uri|name".to_string()));
            };
            geonames
                .insert(name, uri)
                .map_err(|e| entry_error(e.to_string()))?;
        }
        Ok(geonames)
    }

    /// Link `name` to `uri`. Names that normalize to nothing are ignored.
    pub fn insert(&mut self, name: &str, uri: &str) -> Result<()> {
        let uri = NamedNode::new(uri.trim())
            .map_err(|e| RdfError::InvalidIri(format!("{}: {e}", uri.trim())))?;
        let key = normalize(name);
        if !key.is_empty() {
            self.links.insert(key, uri.into_string());
        }
        Ok(())
    }

    /// Feature IRI for a vocabulary term
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.links.get(&normalize(term)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
