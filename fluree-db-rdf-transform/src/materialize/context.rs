//! Per-pass evaluation context

use oxiri::Iri;

use crate::config::TransformConfig;
use crate::error::TransformResult;
use crate::host::ExpressionEvaluator;
use crate::namespace::{PrefixLookup, VocabularyList};
use crate::sink::{Triple, TripleSink};

/// Everything a node needs while it evaluates one row or record
///
/// Borrowed for the duration of a pass; the node tree itself holds no
/// evaluation state.
pub struct EvalContext<'a> {
    base_iri: &'a Iri<String>,
    namespaces: &'a VocabularyList,
    evaluator: &'a dyn ExpressionEvaluator,
    sink: &'a mut dyn TripleSink,
    config: &'a TransformConfig,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        base_iri: &'a Iri<String>,
        namespaces: &'a VocabularyList,
        evaluator: &'a dyn ExpressionEvaluator,
        sink: &'a mut dyn TripleSink,
        config: &'a TransformConfig,
    ) -> Self {
        Self {
            base_iri,
            namespaces,
            evaluator,
            sink,
            config,
        }
    }

    pub fn base_iri(&self) -> &Iri<String> {
        self.base_iri
    }

    pub fn namespaces(&self) -> &VocabularyList {
        self.namespaces
    }

    pub fn evaluator(&self) -> &dyn ExpressionEvaluator {
        self.evaluator
    }

    /// Push one statement to the sink
    pub fn emit(&mut self, triple: Triple) -> TransformResult<()> {
        if self.config.debug {
            tracing::debug!(%triple, "emit");
        }
        self.sink.emit_triple(triple).inspect_err(|e| {
            tracing::error!(error = %e, "Triple sink rejected statement");
        })?;
        Ok(())
    }
}

/// Bound prefixes, with the empty prefix falling back to the base IRI
impl PrefixLookup for EvalContext<'_> {
    fn namespace(&self, prefix: &str) -> Option<&str> {
        match self.namespaces.find_namespace_by_prefix(prefix) {
            Some(ns) => Some(ns),
            None if prefix.is_empty() => Some(self.base_iri.as_str()),
            None => None,
        }
    }
}
