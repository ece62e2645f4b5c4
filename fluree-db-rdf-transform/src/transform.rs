//! The transform document
//!
//! An [`RdfTransform`] is the unit a host stores and applies: a base IRI, a
//! namespace table and the root subject nodes.

use once_cell::sync::Lazy;
use oxiri::Iri;

use crate::config::TransformConfig;
use crate::error::{TransformError, TransformResult};
use crate::host::ExpressionEvaluator;
use crate::mapper;
use crate::mapping::Node;
use crate::materialize::{EvalContext, RdfTerm};
use crate::namespace::VocabularyList;
use crate::record::Record;
use crate::sink::TripleSink;
use crate::vocab::RDFT;

static DEFAULT_BASE: Lazy<Iri<String>> = Lazy::new(|| {
    Iri::parse(RDFT::DEFAULT_BASE_IRI.to_string()).expect("valid default base IRI")
});

/// Parse an absolute base IRI
pub fn parse_base_iri(iri: &str) -> TransformResult<Iri<String>> {
    Iri::parse(iri.trim().to_string()).map_err(|e| TransformError::iri(iri, e))
}

/// A complete RDF transform
#[derive(Debug, Clone, PartialEq)]
pub struct RdfTransform {
    base_iri: Iri<String>,
    namespaces: VocabularyList,
    roots: Vec<Node>,
    version: String,
}

impl Default for RdfTransform {
    fn default() -> Self {
        Self {
            base_iri: DEFAULT_BASE.clone(),
            namespaces: VocabularyList::predefined(),
            roots: Vec::new(),
            version: RDFT::VERSION.to_string(),
        }
    }
}

impl RdfTransform {
    /// An empty transform over `base_iri` with no namespaces
    pub fn new(base_iri: &str) -> TransformResult<Self> {
        Ok(Self {
            base_iri: parse_base_iri(base_iri)?,
            namespaces: VocabularyList::new(),
            roots: Vec::new(),
            version: RDFT::VERSION.to_string(),
        })
    }

    /// Load a transform document with default configuration
    pub fn from_json(json: &str) -> TransformResult<Self> {
        mapper::from_json(json, &TransformConfig::default())
    }

    /// Serialize to a transform document
    pub fn to_json(&self) -> TransformResult<String> {
        mapper::to_json(self)
    }

    pub fn with_namespaces(mut self, namespaces: VocabularyList) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Append a root node; literal nodes cannot be subjects
    pub fn add_root(&mut self, node: Node) -> TransformResult<()> {
        if !node.is_resource() {
            return Err(TransformError::InvalidValue {
                property: RDFT::SUBJECT_MAPPINGS.to_string(),
                message: "a root node must be an IRI or blank node".to_string(),
            });
        }
        self.roots.push(node);
        Ok(())
    }

    pub fn with_root(mut self, node: Node) -> TransformResult<Self> {
        self.add_root(node)?;
        Ok(self)
    }

    pub fn base_iri(&self) -> &Iri<String> {
        &self.base_iri
    }

    pub fn set_base_iri(&mut self, base_iri: Iri<String>) {
        self.base_iri = base_iri;
    }

    pub fn namespaces(&self) -> &VocabularyList {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut VocabularyList {
        &mut self.namespaces
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Version the document was loaded from (current version for new ones)
    pub fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Prefix table for sinks, see [`VocabularyList::prefix_map`]
    pub fn prefix_map(&self) -> Vec<(String, String)> {
        self.namespaces.prefix_map(self.base_iri.as_str())
    }

    /// Announce every prefix to `sink`
    pub fn announce_prefixes(&self, sink: &mut dyn TripleSink) {
        for (prefix, namespace) in self.prefix_map() {
            sink.on_prefix(&prefix, &namespace);
        }
    }

    /// Evaluation context over this transform's base IRI and namespaces
    pub fn context<'a>(
        &'a self,
        evaluator: &'a dyn ExpressionEvaluator,
        sink: &'a mut dyn TripleSink,
        config: &'a TransformConfig,
    ) -> EvalContext<'a> {
        EvalContext::new(&self.base_iri, &self.namespaces, evaluator, sink, config)
    }

    /// Apply every root to one row
    ///
    /// Returns the root subject terms, in root order.
    pub fn apply_row(
        &self,
        evaluator: &dyn ExpressionEvaluator,
        sink: &mut dyn TripleSink,
        config: &TransformConfig,
        row: usize,
    ) -> TransformResult<Vec<RdfTerm>> {
        let mut ctx = self.context(evaluator, sink, config);
        let mut subjects = Vec::new();
        for root in &self.roots {
            subjects.extend(root.create_statements_for_row(&mut ctx, row)?);
        }
        Ok(subjects)
    }

    /// Apply every root to one record
    pub fn apply_record(
        &self,
        evaluator: &dyn ExpressionEvaluator,
        sink: &mut dyn TripleSink,
        config: &TransformConfig,
        record: Record,
    ) -> TransformResult<Vec<RdfTerm>> {
        let mut ctx = self.context(evaluator, sink, config);
        let mut subjects = Vec::new();
        for root in &self.roots {
            subjects.extend(root.create_statements_for_record(&mut ctx, record)?);
        }
        Ok(subjects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryTable;
    use crate::mapping::{CellResourceNode, CellSource, ConstantLiteralNode, RdfType};
    use crate::namespace::Vocabulary;
    use crate::sink::GraphCollector;
    use serde_json::json;

    #[test]
    fn test_default_transform() {
        let transform = RdfTransform::default();
        assert_eq!(transform.base_iri().as_str(), "http://localhost:3333/");
        assert_eq!(transform.version(), "2.3.6");
        assert!(transform.namespaces().contains_prefix("xsd"));
        assert!(transform.roots().is_empty());
    }

    #[test]
    fn test_relative_base_is_rejected() {
        assert!(matches!(
            RdfTransform::new("relative/base"),
            Err(TransformError::IriParse { .. })
        ));
    }

    #[test]
    fn test_literal_root_is_rejected() {
        let mut transform = RdfTransform::new("http://ex.org/").unwrap();
        let err = transform
            .add_root(ConstantLiteralNode::new("x").into())
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { .. }));
    }

    #[test]
    fn test_apply_row() {
        let table = MemoryTable::new(["name"])
            .with_row(vec![json!("Alice")])
            .with_row(vec![json!("Bob")]);
        let node: Node = CellResourceNode::new(CellSource::column("name"), Some("")).into();
        let transform = RdfTransform::new("http://ex.org/")
            .unwrap()
            .with_namespaces(
                [Vocabulary::new("foaf", "http://xmlns.com/foaf/0.1/")]
                    .into_iter()
                    .collect(),
            )
            .with_root(node.with_type(RdfType::new(Some("foaf"), "Person")))
            .unwrap();

        let config = TransformConfig::default();
        let mut sink = GraphCollector::new();
        transform.announce_prefixes(&mut sink);
        let subjects = transform.apply_row(&table, &mut sink, &config, 1).unwrap();

        assert_eq!(subjects, vec![RdfTerm::iri("http://ex.org/Bob")]);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.prefixes.get("").map(String::as_str), Some("http://ex.org/"));
        assert!(sink.prefixes.contains_key("foaf"));
    }
}
