//! regvoc Core - Triple model, sink, errors and configuration
//!
//! This crate defines the abstractions shared by the whole workspace:
//! - The normalized `Triple` and its `Predicate` kinds
//! - The thread-safe, deduplicating `TripleSink`
//! - Common error types
//! - Configuration management

pub mod config;
pub mod sink;
pub mod triple;

pub use config::{AppConfig, ConfigError, ExtractionConfig, LoggingConfig, OutputConfig, Strategy};
pub use sink::TripleSink;
pub use triple::{normalize, Predicate, Triple, MIN_TERM_LENGTH};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for vocabulary extraction
#[derive(Error, Debug)]
pub enum VocabError {
    /// Required parser/tagger model artifacts are missing or unreadable
    #[error("Model load failure: {0}")]
    ModelLoad(String),

    /// Input rejected before parsing (too long, empty, unreadable)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The parse collaborator failed on a sentence
    #[error("Parse error: {0}")]
    Parse(String),

    /// The strategy received a parse of the wrong form
    #[error("Parse form mismatch: expected {expected}, got {actual}")]
    ParseFormMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A per-block extraction task failed
    #[error("Extraction task failed: {0}")]
    TaskFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VocabError>;
