//! Deduplicating triple sink
//!
//! One `TripleSink` collects every triple extracted from a document. Worker
//! tasks share it by reference; a single coarse lock guards the set because
//! insertion is cheap next to parsing.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::triple::Triple;

/// Thread-safe, deduplicated triple collection for one document
#[derive(Debug, Default)]
pub struct TripleSink {
    triples: Mutex<HashSet<Triple>>,
}

impl TripleSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    // A task that panicked mid-insert cannot leave the set half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<Triple>> {
        self.triples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a triple.
    ///
    /// Returns `false` when the triple violates the length invariant (it is
    /// dropped) or was already present.
    pub fn insert(&self, triple: Triple) -> bool {
        if !triple.is_valid() {
            tracing::trace!(%triple, "rejected triple");
            return false;
        }
        self.lock().insert(triple)
    }

    /// Insert a triple together with its inversion under one lock
    pub fn insert_with_inversion(&self, triple: Triple) -> bool {
        if !triple.is_valid() {
            tracing::trace!(%triple, "rejected triple");
            return false;
        }
        let inverse = triple.inversion();
        let mut set = self.lock();
        let added = set.insert(triple);
        set.insert(inverse) || added
    }

    /// Number of stored triples
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.lock().contains(triple)
    }

    /// Sorted copy of the current contents
    pub fn snapshot(&self) -> Vec<Triple> {
        let mut triples: Vec<Triple> = self.lock().iter().cloned().collect();
        triples.sort();
        triples
    }

    /// Consume the sink, returning its contents sorted
    pub fn into_sorted(self) -> Vec<Triple> {
        let set = self
            .triples
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let mut triples: Vec<Triple> = set.into_iter().collect();
        triples.sort();
        triples
    }
}
