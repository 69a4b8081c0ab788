//! regvoc RDF - SKOS vocabulary output
//!
//! Turns a set of extracted triples into N-Triples:
//! - `narrower`/`broader`/`related` map to the SKOS properties
//! - custom predicates become properties in the vocabulary namespace, typed
//!   `owl:ObjectProperty` and `rdf:Property` and labeled with their text
//! - every term gets `skos:prefLabel` and `rdfs:label`
//! - with a GeoNames link map, terms naming a place get `skos:exactMatch`
//!   to the GeoNames feature, typed `gn:Feature`
//!
//! Triples with a part of two characters or fewer are skipped. IRIs are
//! validated with `oxrdf` and the document is written by `oxttl`.

pub mod geonames;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use oxrdf::{Literal, NamedNode, Term};
use oxttl::NTriplesSerializer;
use thiserror::Error;
use tracing::debug;

use regvoc_core::{Predicate, Triple, MIN_TERM_LENGTH};

pub use geonames::{GeoNames, GEONAMES_ONTOLOGY};

pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum RdfError {
    #[error("Invalid namespace IRI: {0}")]
    InvalidNamespace(String),

    #[error("Invalid IRI {0}")]
    InvalidIri(String),

    #[error("GeoNames line {line}: {reason}")]
    GeoNamesEntry { line: usize, reason: String },

    #[error("I/O error on {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RdfError>;

// ============================================================================
// Statements
// ============================================================================

/// Object position of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Object {
    Iri(String),
    Literal(String),
}

/// One RDF statement with absolute, validated IRIs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
}

impl Statement {
    fn iri(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Iri(object.to_string()),
        }
    }

    fn literal(subject: &str, predicate: &str, text: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Literal(text.to_string()),
        }
    }

    /// RDF model triple for serialization
    pub fn to_triple(&self) -> oxrdf::Triple {
        let object: Term = match &self.object {
            Object::Iri(iri) => NamedNode::new_unchecked(iri.as_str()).into(),
            Object::Literal(text) => Literal::new_simple_literal(text.as_str()).into(),
        };
        oxrdf::Triple::new(
            NamedNode::new_unchecked(self.subject.as_str()),
            NamedNode::new_unchecked(self.predicate.as_str()),
            object,
        )
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .", self.to_triple())
    }
}

// ============================================================================
// Vocabulary Graph
// ============================================================================

/// Deduplicated, ordered statement set for one document
#[derive(Debug, Clone)]
pub struct VocabularyGraph {
    namespace: String,
    statements: BTreeSet<Statement>,
    geonames: Option<Arc<GeoNames>>,
    skipped: usize,
}

impl VocabularyGraph {
    /// `namespace` must be an http(s) IRI ending in `#` or `/`
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let scheme_ok = namespace.starts_with("http://") || namespace.starts_with("https://");
        let end_ok = namespace.ends_with('#') || namespace.ends_with('/');
        if !scheme_ok || !end_ok || NamedNode::new(namespace.as_str()).is_err() {
            return Err(RdfError::InvalidNamespace(namespace));
        }
        Ok(Self {
            namespace,
            statements: BTreeSet::new(),
            geonames: None,
            skipped: 0,
        })
    }

    /// Build from a triple collection
    pub fn build<'a>(namespace: impl Into<String>, triples: impl IntoIterator<Item = &'a Triple>) -> Result<Self> {
        let mut graph = Self::new(namespace)?;
        graph.extend(triples);
        Ok(graph)
    }

    /// Link terms found in `geonames` to their GeoNames feature
    pub fn with_geonames(mut self, geonames: Arc<GeoNames>) -> Self {
        self.geonames = Some(geonames);
        self
    }

    pub fn extend<'a>(&mut self, triples: impl IntoIterator<Item = &'a Triple>) {
        for triple in triples {
            self.add(triple);
        }
        debug!(
            statements = self.len(),
            skipped = self.skipped,
            "Built vocabulary graph"
        );
    }

    /// Add one triple with its label and type statements.
    ///
    /// Returns `false` when a part is too short to become a resource.
    pub fn add(&mut self, triple: &Triple) -> bool {
        let predicate_text = triple.predicate().as_str();
        if [triple.subject(), predicate_text, triple.object()]
            .iter()
            .any(|part| part.chars().count() <= MIN_TERM_LENGTH)
        {
            self.skipped += 1;
            return false;
        }

        let (Some(subject), Some(object)) = (self.resource(triple.subject()), self.resource(triple.object())) else {
            self.skipped += 1;
            return false;
        };

        let property = match triple.predicate() {
            Predicate::Narrower => format!("{SKOS}narrower"),
            Predicate::Broader => format!("{SKOS}broader"),
            Predicate::Related => format!("{SKOS}related"),
            Predicate::Custom(text) => {
                let Some(property) = self.resource(text) else {
                    self.skipped += 1;
                    return false;
                };
                self.describe_property(&property, text);
                property
            }
        };

        self.label(&subject, triple.subject());
        self.label(&object, triple.object());
        self.statements
            .insert(Statement::iri(&subject, &property, &object));
        true
    }

    fn label(&mut self, resource: &str, text: &str) {
        self.statements
            .insert(Statement::literal(resource, &format!("{SKOS}prefLabel"), text));
        self.statements
            .insert(Statement::literal(resource, &format!("{RDFS}label"), text));

        let place = self
            .geonames
            .as_ref()
            .and_then(|geonames| geonames.lookup(text))
            .map(str::to_string);
        if let Some(place) = place {
            self.statements
                .insert(Statement::iri(resource, &format!("{SKOS}exactMatch"), &place));
            self.statements.insert(Statement::iri(
                &place,
                &format!("{RDF}type"),
                &format!("{GEONAMES_ONTOLOGY}Feature"),
            ));
        }
    }

    fn describe_property(&mut self, property: &str, text: &str) {
        self.statements
            .insert(Statement::literal(property, &format!("{RDFS}label"), text));
        self.statements.insert(Statement::iri(
            property,
            &format!("{RDF}type"),
            &format!("{OWL}ObjectProperty"),
        ));
        self.statements.insert(Statement::iri(
            property,
            &format!("{RDF}type"),
            &format!("{RDF}Property"),
        ));
    }

    fn resource(&self, text: &str) -> Option<String> {
        let local = to_uri(text);
        if local.is_empty() {
            return None;
        }
        NamedNode::new(format!("{}{local}", self.namespace))
            .ok()
            .map(NamedNode::into_string)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Triples rejected by `add`
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// N-Triples document, one statement per line in sorted order
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str(&statement.to_string());
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, writer: impl Write) -> std::io::Result<()> {
        let mut serializer = NTriplesSerializer::new().for_writer(writer);
        for statement in &self.statements {
            serializer.serialize_triple(&statement.to_triple())?;
        }
        serializer.finish().flush()
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| RdfError::Io {
            path: path.display().to_string(),
            source,
        };
        let file = std::fs::File::create(path).map_err(io_err)?;
        self.write_to(std::io::BufWriter::new(file)).map_err(io_err)
    }
}

// ============================================================================
// IRI and Literal Encoding
// ============================================================================

/// Local name for a term: spaces become `_`, reserved characters are
/// dropped and anything else illegal in an IRI is percent-encoded
pub fn to_uri(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().chars() {
        match c {
            ' ' => out.push('_'),
            '%' | '$' | '#' | '[' | ']' => {}
            c if is_iri_excluded(c) => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

fn is_iri_excluded(c: char) -> bool {
    c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}
