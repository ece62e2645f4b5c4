//! Triple sinks
//!
//! The interpreter pushes every generated statement into a [`TripleSink`].
//! The sink can be:
//! - [`GraphCollector`]: collects triples in memory (previews, tests, export buffering)
//! - Any host sink: a streaming writer or a graph store connection
//!
//! Sink failures are fatal for the batch being written, since the store may
//! now be inconsistent; they are surfaced as [`TransformError::Sink`].
//!
//! [`TransformError::Sink`]: crate::TransformError::Sink

use std::collections::BTreeMap;
use std::fmt;

use crate::error::TransformResult;
use crate::materialize::RdfTerm;

/// A generated statement
///
/// Predicates are always absolute IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub s: RdfTerm,
    pub p: String,
    pub o: RdfTerm,
}

impl Triple {
    pub fn new(s: RdfTerm, p: impl Into<String>, o: RdfTerm) -> Self {
        Self { s, p: p.into(), o }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.s, self.p, self.o)
    }
}

/// Destination for generated statements
pub trait TripleSink {
    /// Called once per prefix before any statement of a run is emitted
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str);

    /// Accept one statement
    fn emit_triple(&mut self, triple: Triple) -> TransformResult<()>;
}

/// A sink that collects triples in memory
///
/// Bag semantics: duplicates are preserved until [`dedupe`](Self::dedupe)
/// is called.
#[derive(Debug, Clone, Default)]
pub struct GraphCollector {
    triples: Vec<Triple>,
    /// Prefix mappings announced to this sink (deterministic order)
    pub prefixes: BTreeMap<String, String>,
}

impl GraphCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples in emission order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Remove duplicate triples (apply set semantics)
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    /// Take every collected triple, leaving the collector empty
    ///
    /// Prefixes are kept.
    pub fn drain(&mut self) -> Vec<Triple> {
        std::mem::take(&mut self.triples)
    }

    /// Get all triples (consuming the collector)
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }
}

impl TripleSink for GraphCollector {
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.prefixes
            .insert(prefix.to_string(), namespace_iri.to_string());
    }

    fn emit_triple(&mut self, triple: Triple) -> TransformResult<()> {
        self.triples.push(triple);
        Ok(())
    }
}
