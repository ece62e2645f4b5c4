//! Transform document mapper
//!
//! Reads and writes the JSON transform document. Reading is lenient: a
//! malformed node, type or property is logged and skipped, and the rest of
//! the document still loads. Only a document that is not JSON at all (or
//! whose top level has the wrong shape) fails.

mod document;

pub use document::{
    BaseIriDoc, BaseIriParts, DatatypeDoc, ExpressionDoc, NamespaceDoc, NodeDoc, PropertyDoc,
    TransformDoc, TypeDoc, ValueSourceDoc, ValueTypeDoc,
};

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::TransformConfig;
use crate::error::{TransformError, TransformResult};
use crate::mapping::{
    BlankLabelRule, CellBlankNode, CellLiteralNode, CellResourceNode, CellSource,
    ConstantBlankNode, ConstantLiteralNode, ConstantResourceNode, DatatypeRef, Expression, Node,
    NodeType, Property, RdfType, ValueType,
};
use crate::namespace::{LocationType, Vocabulary, VocabularyList};
use crate::transform::{parse_base_iri, RdfTransform};
use crate::vocab::RDFT;

/// Load a transform from a JSON string
pub fn from_json(json: &str, config: &TransformConfig) -> TransformResult<RdfTransform> {
    let value: Value = serde_json::from_str(json)?;
    from_value(value, config)
}

/// Load a transform from a parsed JSON document
pub fn from_value(value: Value, config: &TransformConfig) -> TransformResult<RdfTransform> {
    if config.debug_json {
        tracing::debug!(document = %value, "Loading transform document");
    }
    let doc: TransformDoc = serde_json::from_value(value)?;
    Mapper::new(config)?.read_transform(doc)
}

/// Serialize a transform to a JSON string
pub fn to_json(transform: &RdfTransform) -> TransformResult<String> {
    Ok(serde_json::to_string(&to_doc(transform)?)?)
}

/// Serialize a transform to a JSON value
pub fn to_value(transform: &RdfTransform) -> TransformResult<Value> {
    Ok(serde_json::to_value(to_doc(transform)?)?)
}

/// Build the document shape of a transform
pub fn to_doc(transform: &RdfTransform) -> TransformResult<TransformDoc> {
    let namespaces: Map<String, Value> = transform
        .namespaces()
        .iter()
        .map(|vocab| (vocab.prefix.clone(), write_namespace(vocab)))
        .collect();

    let roots = transform
        .roots()
        .iter()
        .map(|node| serde_json::to_value(write_node(node, true)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransformDoc {
        extension: Some(RDFT::EXTENSION_NAME.to_string()),
        version: Some(RDFT::VERSION.to_string()),
        base_iri: Some(BaseIriDoc::Text(transform.base_iri().as_str().to_string())),
        namespaces: Some(namespaces),
        subject_mappings: Some(roots),
    })
}

enum Source {
    Constant(String),
    Cell(CellSource),
}

/// Document reader
struct Mapper {
    blank_rule: Arc<BlankLabelRule>,
}

impl Mapper {
    fn new(config: &TransformConfig) -> TransformResult<Self> {
        Ok(Self {
            blank_rule: BlankLabelRule::from_config(config)?,
        })
    }

    fn read_transform(&self, doc: TransformDoc) -> TransformResult<RdfTransform> {
        let mut transform = RdfTransform::default();

        if let Some(extension) = doc.extension.as_deref() {
            if extension != RDFT::EXTENSION_NAME {
                tracing::warn!(extension, "Unexpected document extension");
            }
        }
        if let Some(version) = doc.version {
            if version != RDFT::VERSION {
                tracing::info!(
                    version = %version,
                    current = RDFT::VERSION,
                    "Transform document will be updated on save"
                );
            }
            transform.set_version(version);
        }

        match doc.base_iri {
            Some(base) => {
                let raw = match base {
                    BaseIriDoc::Text(text) => text,
                    BaseIriDoc::Parts(parts) => parts.assemble(),
                };
                match parse_base_iri(&raw) {
                    Ok(iri) => transform.set_base_iri(iri),
                    Err(e) => tracing::warn!(base_iri = %raw, error = %e, "Bad base IRI, using default"),
                }
            }
            None => tracing::debug!("No base IRI, using default"),
        }

        // an explicit `{}` is an empty table; only a missing key keeps the
        // predefined vocabularies
        match doc.namespaces {
            Some(namespaces) => *transform.namespaces_mut() = read_namespaces(namespaces),
            None => tracing::debug!("No namespaces, using predefined vocabularies"),
        }

        for (idx, value) in doc.subject_mappings.unwrap_or_default().into_iter().enumerate() {
            let node_doc: NodeDoc = match serde_json::from_value(value) {
                Ok(node_doc) => node_doc,
                Err(e) => {
                    tracing::error!(index = idx, error = %e, "Skipping malformed subject mapping");
                    continue;
                }
            };
            if let Err(e) = self
                .read_node(&node_doc, true)
                .and_then(|node| transform.add_root(node))
            {
                tracing::error!(index = idx, error = %e, "Skipping subject mapping");
            }
        }

        Ok(transform)
    }

    fn read_node(&self, doc: &NodeDoc, is_root: bool) -> TransformResult<Node> {
        let value_type = match doc.value_type.as_ref().map(|vt| vt.kind.as_str()) {
            Some(kind) if !kind.is_empty() => {
                ValueType::from_type_str(kind).ok_or_else(|| TransformError::InvalidValue {
                    property: RDFT::VALUE_TYPE.to_string(),
                    message: format!("unknown type '{}'", kind),
                })?
            }
            _ => ValueType::Iri,
        };
        if is_root && value_type.is_literal() {
            return Err(TransformError::InvalidValue {
                property: RDFT::SUBJECT_MAPPINGS.to_string(),
                message: "a root node must be an IRI or blank node".to_string(),
            });
        }

        let source = read_source(doc.value_source.as_ref())?;
        let expression = doc
            .expression
            .as_ref()
            .filter(|e| !e.code.trim().is_empty())
            .map(|e| Expression::parse(e.language.as_deref(), &e.code))
            .unwrap_or_default();

        if value_type.is_literal() {
            return Ok(self.read_literal(doc, source, expression));
        }

        let prefix = doc.prefix.as_deref();
        let mut node: Node = match (value_type, source) {
            (ValueType::Iri, Source::Constant(constant)) => {
                let mut node = ConstantResourceNode::new(&constant, prefix);
                node.expression = expression;
                node.into()
            }
            (ValueType::Iri, Source::Cell(cell)) => {
                CellResourceNode::new(cell.with_expression(expression), prefix).into()
            }
            (_, Source::Constant(constant)) => {
                let mut node =
                    ConstantBlankNode::new(constant).with_rule(Arc::clone(&self.blank_rule));
                node.expression = expression;
                node.into()
            }
            (_, Source::Cell(cell)) => CellBlankNode::new(cell.with_expression(expression)).into(),
        };

        if let Some(mappings) = node.subject_mappings_mut() {
            mappings.types = read_types(&doc.type_mappings);
            mappings.properties = self.read_properties(&doc.property_mappings);
        }
        Ok(node)
    }

    fn read_literal(&self, doc: &NodeDoc, source: Source, expression: Expression) -> Node {
        let value_type = doc.value_type.as_ref();
        let datatype = value_type
            .and_then(|vt| vt.datatype.as_ref())
            .and_then(read_datatype);
        let language = value_type
            .and_then(|vt| vt.language.as_deref())
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        match source {
            Source::Constant(constant) => ConstantLiteralNode {
                constant,
                datatype,
                language,
                expression,
            }
            .into(),
            Source::Cell(cell) => CellLiteralNode {
                source: cell.with_expression(expression),
                datatype,
                language,
            }
            .into(),
        }
    }

    fn read_properties(&self, docs: &[PropertyDoc]) -> Vec<Property> {
        let mut properties = Vec::with_capacity(docs.len());
        for doc in docs {
            let path = match constant_path(doc.value_source.as_ref()) {
                Ok(path) => path,
                Err(e) => {
                    tracing::error!(prefix = ?doc.prefix, error = %e, "Skipping property");
                    continue;
                }
            };
            let prefix = doc.prefix.as_deref();

            if doc.object_mappings.is_empty() {
                properties.push(Property::new(prefix, path, None));
                continue;
            }
            for object_doc in &doc.object_mappings {
                let object = match self.read_node(object_doc, false) {
                    Ok(object) => Some(object),
                    Err(e) => {
                        tracing::error!(path, error = %e, "Skipping property object");
                        None
                    }
                };
                properties.push(Property::new(prefix, path, object));
            }
        }
        properties
    }
}

fn read_source(doc: Option<&ValueSourceDoc>) -> TransformResult<Source> {
    let doc = doc.ok_or_else(|| TransformError::MissingProperty(RDFT::VALUE_SOURCE.to_string()))?;
    let node_type =
        NodeType::from_source_str(&doc.source).ok_or_else(|| TransformError::InvalidValue {
            property: RDFT::VALUE_SOURCE.to_string(),
            message: format!("unknown source '{}'", doc.source),
        })?;

    match node_type {
        NodeType::Row => Ok(Source::Cell(CellSource::row_index())),
        NodeType::Record => Ok(Source::Cell(CellSource::record_index())),
        NodeType::Column => match doc.column_name.as_deref() {
            Some(column) if !column.is_empty() => Ok(Source::Cell(CellSource::column(column))),
            _ => Err(TransformError::MissingProperty(RDFT::COLUMN_NAME.to_string())),
        },
        NodeType::Constant => match &doc.constant {
            Some(constant) => Ok(Source::Constant(constant.clone())),
            None => Err(TransformError::MissingProperty(RDFT::SOURCE_CONSTANT.to_string())),
        },
        NodeType::Expression => Err(TransformError::Unsupported(
            "expression value source".to_string(),
        )),
    }
}

/// Types, properties and datatypes name their IRI with a constant source
fn constant_path(doc: Option<&ValueSourceDoc>) -> TransformResult<&str> {
    let doc = doc.ok_or_else(|| TransformError::MissingProperty(RDFT::VALUE_SOURCE.to_string()))?;
    if doc.source != RDFT::SOURCE_CONSTANT {
        return Err(TransformError::InvalidValue {
            property: RDFT::VALUE_SOURCE.to_string(),
            message: format!("expected a constant source, found '{}'", doc.source),
        });
    }
    doc.constant
        .as_deref()
        .ok_or_else(|| TransformError::MissingProperty(RDFT::SOURCE_CONSTANT.to_string()))
}

fn read_types(docs: &[TypeDoc]) -> Vec<RdfType> {
    docs.iter()
        .filter_map(|doc| match constant_path(doc.value_source.as_ref()) {
            Ok(path) => Some(RdfType::new(doc.prefix.as_deref(), path)),
            Err(e) => {
                tracing::error!(prefix = ?doc.prefix, error = %e, "Skipping type");
                None
            }
        })
        .collect()
}

fn read_datatype(doc: &DatatypeDoc) -> Option<DatatypeRef> {
    match constant_path(doc.value_source.as_ref()) {
        Ok(value) => Some(DatatypeRef::new(doc.prefix.as_deref(), value)),
        Err(e) => {
            tracing::warn!(prefix = ?doc.prefix, error = %e, "Ignoring datatype");
            None
        }
    }
}

fn read_namespaces(map: Map<String, Value>) -> VocabularyList {
    let mut list = VocabularyList::new();
    for (prefix, value) in map {
        let vocab = match serde_json::from_value::<NamespaceDoc>(value) {
            Ok(NamespaceDoc::Iri(namespace)) => Vocabulary::new(prefix, namespace),
            Ok(NamespaceDoc::Described {
                namespace,
                location,
                loctype,
            }) => Vocabulary::new(prefix, namespace).with_location(
                location.unwrap_or_default(),
                loctype
                    .as_deref()
                    .map(LocationType::from_loc_type_str)
                    .unwrap_or_default(),
            ),
            Err(e) => {
                tracing::error!(prefix = %prefix, error = %e, "Skipping namespace");
                continue;
            }
        };
        list.add(vocab);
    }
    list
}

fn write_namespace(vocab: &Vocabulary) -> Value {
    if vocab.location.is_empty() && vocab.location_type == LocationType::None {
        return Value::String(vocab.namespace.clone());
    }
    serde_json::json!({
        "namespace": vocab.namespace,
        "location": vocab.location,
        "loctype": vocab.location_type.as_str(),
    })
}

fn cell_source_doc(cell: &CellSource) -> ValueSourceDoc {
    ValueSourceDoc {
        source: cell.node_type.as_source_str().to_string(),
        column_name: if cell.is_index() {
            None
        } else {
            cell.column.clone()
        },
        constant: None,
    }
}

fn expression_doc(expression: &Expression) -> Option<ExpressionDoc> {
    if expression.is_default() {
        return None;
    }
    Some(ExpressionDoc {
        language: Some(expression.language.clone()),
        code: expression.code.clone(),
    })
}

fn literal_type_doc(
    value_type: ValueType,
    datatype: Option<&DatatypeRef>,
    language: Option<&str>,
) -> ValueTypeDoc {
    ValueTypeDoc {
        kind: value_type.as_str().to_string(),
        datatype: datatype.map(|dt| DatatypeDoc {
            prefix: dt.prefix.clone(),
            value_source: Some(ValueSourceDoc::constant(dt.value.clone())),
        }),
        language: language.map(str::to_string),
    }
}

/// Write a node
///
/// Roots omit `valueType` when it is the default `iri`.
fn write_node(node: &Node, is_root: bool) -> NodeDoc {
    let value_type = node.value_type();
    let mut doc = NodeDoc {
        expression: expression_doc(node.expression()),
        ..Default::default()
    };

    match node {
        Node::ConstantResource(n) => {
            doc.prefix = n.prefix.clone();
            doc.value_source = Some(ValueSourceDoc::constant(n.constant.clone()));
        }
        Node::CellResource(n) => {
            doc.prefix = n.prefix.clone();
            doc.value_source = Some(cell_source_doc(&n.source));
        }
        Node::ConstantBlank(n) => {
            doc.value_source = Some(ValueSourceDoc::constant(n.constant.clone()));
        }
        Node::CellBlank(n) => {
            doc.value_source = Some(cell_source_doc(&n.source));
        }
        Node::ConstantLiteral(n) => {
            doc.value_source = Some(ValueSourceDoc::constant(n.constant.clone()));
            doc.value_type = Some(literal_type_doc(
                value_type,
                n.datatype.as_ref(),
                n.language.as_deref(),
            ));
        }
        Node::CellLiteral(n) => {
            doc.value_source = Some(cell_source_doc(&n.source));
            doc.value_type = Some(literal_type_doc(
                value_type,
                n.datatype.as_ref(),
                n.language.as_deref(),
            ));
        }
    }

    if doc.value_type.is_none() && !(is_root && value_type == ValueType::Iri) {
        doc.value_type = Some(ValueTypeDoc {
            kind: value_type.as_str().to_string(),
            ..Default::default()
        });
    }

    if let Some(mappings) = node.subject_mappings() {
        doc.type_mappings = mappings
            .types
            .iter()
            .map(|t| TypeDoc {
                prefix: t.prefix.clone(),
                value_source: Some(ValueSourceDoc::constant(t.path.clone())),
            })
            .collect();
        doc.property_mappings = mappings
            .properties
            .iter()
            .map(|p| PropertyDoc {
                prefix: p.prefix.clone(),
                value_source: Some(ValueSourceDoc::constant(p.path.clone())),
                object_mappings: p
                    .object
                    .as_deref()
                    .map(|object| vec![write_node(object, false)])
                    .unwrap_or_default(),
            })
            .collect();
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryTable;
    use crate::sink::GraphCollector;
    use serde_json::json;

    fn load(value: Value) -> RdfTransform {
        from_value(value, &TransformConfig::default()).unwrap()
    }

    #[test]
    fn test_read_minimal_document() {
        let transform = load(json!({
            "extension": "RDFTransform",
            "version": "2.3.6",
            "baseIRI": "http://ex.org/",
            "namespaces": {"foaf": "http://xmlns.com/foaf/0.1/"},
            "subjectMappings": [{
                "prefix": "",
                "valueSource": {"source": "column", "columnName": "name"},
                "typeMappings": [
                    {"prefix": "foaf", "valueSource": {"source": "constant", "constant": "Person"}}
                ],
                "propertyMappings": [{
                    "prefix": "foaf",
                    "valueSource": {"source": "constant", "constant": "name"},
                    "objectMappings": [{
                        "valueSource": {"source": "column", "columnName": "name"},
                        "valueType": {"type": "literal"}
                    }]
                }]
            }]
        }));

        assert_eq!(transform.base_iri().as_str(), "http://ex.org/");
        assert_eq!(transform.namespaces().len(), 1);
        assert_eq!(transform.roots().len(), 1);

        let root = &transform.roots()[0];
        assert!(matches!(root, Node::CellResource(_)));
        let mappings = root.subject_mappings().unwrap();
        assert_eq!(mappings.types, vec![RdfType::new(Some("foaf"), "Person")]);
        assert_eq!(mappings.properties.len(), 1);
        assert!(matches!(
            mappings.properties[0].object.as_deref(),
            Some(Node::CellLiteral(_))
        ));
    }

    #[test]
    fn test_defaults_when_header_missing() {
        let transform = load(json!({}));
        assert_eq!(transform.base_iri().as_str(), RDFT::DEFAULT_BASE_IRI);
        assert!(transform.namespaces().contains_prefix("rdf"));
        assert!(transform.roots().is_empty());
    }

    #[test]
    fn test_base_iri_parts_and_bad_base() {
        let transform = load(json!({
            "baseIRI": {"scheme": "https", "host": "ex.org", "port": 8080, "path": "/d/"}
        }));
        assert_eq!(transform.base_iri().as_str(), "https://ex.org:8080/d/");

        let transform = load(json!({"baseIRI": "not a base"}));
        assert_eq!(transform.base_iri().as_str(), RDFT::DEFAULT_BASE_IRI);
    }

    #[test]
    fn test_described_namespace() {
        let transform = load(json!({
            "namespaces": {
                "ex": {"namespace": "http://ex.org/", "location": "/tmp/ex.ttl", "loctype": "file"},
                "foaf": "http://xmlns.com/foaf/0.1/"
            }
        }));
        let ex = transform.namespaces().find_by_prefix("ex").unwrap();
        assert_eq!(ex.location_type, LocationType::File);
        assert_eq!(ex.location, "/tmp/ex.ttl");
        assert_eq!(transform.namespaces().prefixes().collect::<Vec<_>>(), vec!["ex", "foaf"]);
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let transform = load(json!({
            "baseIRI": "http://ex.org/",
            "subjectMappings": [
                {"valueSource": {"source": "cell"}},
                {"valueSource": {"source": "column"}},
                {"valueSource": {"source": "expression"}},
                {"valueSource": {"source": "constant", "constant": "x"}, "valueType": {"type": "literal"}},
                "not a node",
                {
                    "valueSource": {"source": "row_index"},
                    "typeMappings": [{"valueSource": {"source": "column", "columnName": "kind"}}],
                    "propertyMappings": [
                        {"prefix": "", "valueSource": {"source": "constant", "constant": "p"},
                         "objectMappings": [{"valueSource": {"source": "constant"}, "valueType": {"type": "literal"}}]},
                        {"prefix": "", "valueSource": {"source": "constant"}}
                    ]
                }
            ]
        }));

        assert_eq!(transform.roots().len(), 1);
        let root = &transform.roots()[0];
        assert!(root.is_index());
        let mappings = root.subject_mappings().unwrap();
        assert!(mappings.types.is_empty());
        assert_eq!(mappings.properties.len(), 1);
        assert!(mappings.properties[0].object.is_none());
    }

    #[test]
    fn test_embedded_expression_language() {
        let transform = load(json!({
            "subjectMappings": [{
                "valueSource": {"source": "column", "columnName": "id"},
                "expression": {"language": "grel", "code": "jython:return value"}
            }]
        }));
        let expression = transform.roots()[0].expression();
        assert_eq!(expression.language, "jython");
        assert_eq!(expression.code, "return value");
    }

    #[test]
    fn test_property_without_objects() {
        let transform = load(json!({
            "subjectMappings": [{
                "valueSource": {"source": "constant", "constant": "s"},
                "valueType": {"type": "value_bnode"},
                "propertyMappings": [
                    {"prefix": "foaf", "valueSource": {"source": "constant", "constant": "knows"}}
                ]
            }]
        }));
        let root = &transform.roots()[0];
        assert!(matches!(root, Node::ConstantBlank(_)));
        let properties = &root.subject_mappings().unwrap().properties;
        assert_eq!(properties.len(), 1);
        assert!(properties[0].object.is_none());
    }

    #[test]
    fn test_write_omits_defaults() {
        let transform = load(json!({
            "baseIRI": "http://ex.org/",
            "namespaces": {"foaf": "http://xmlns.com/foaf/0.1/"},
            "subjectMappings": [{
                "valueSource": {"source": "column", "columnName": "name"},
                "expression": {"language": "grel", "code": "value"}
            }]
        }));
        let value = to_value(&transform).unwrap();
        assert_eq!(value["extension"], "RDFTransform");
        assert_eq!(value["version"], "2.3.6");
        assert_eq!(value["baseIRI"], "http://ex.org/");
        assert_eq!(value["namespaces"]["foaf"], "http://xmlns.com/foaf/0.1/");

        let root = &value["subjectMappings"][0];
        assert!(root.get("expression").is_none());
        assert!(root.get("valueType").is_none());
        assert!(root.get("prefix").is_none());
        assert_eq!(root["valueSource"]["columnName"], "name");
    }

    #[test]
    fn test_round_trip() {
        let transform = load(json!({
            "baseIRI": "http://ex.org/",
            "namespaces": {
                "foaf": "http://xmlns.com/foaf/0.1/",
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "ex": {"namespace": "http://ex.org/ns#", "location": "http://ex.org/ns.ttl", "loctype": "URL"}
            },
            "subjectMappings": [
                {
                    "prefix": "",
                    "valueSource": {"source": "column", "columnName": "name"},
                    "expression": {"language": "grel", "code": "value.trim()"},
                    "typeMappings": [{"prefix": "foaf", "valueSource": {"source": "constant", "constant": "Person"}}],
                    "propertyMappings": [
                        {"prefix": "foaf", "valueSource": {"source": "constant", "constant": "age"},
                         "objectMappings": [
                             {"valueSource": {"source": "column", "columnName": "age"},
                              "valueType": {"type": "datatype_literal",
                                            "datatype": {"prefix": "xsd", "valueSource": {"source": "constant", "constant": "integer"}}}},
                             {"valueSource": {"source": "constant", "constant": "chat"},
                              "valueType": {"type": "language_literal", "language": "fr"}}
                         ]},
                        {"prefix": "foaf", "valueSource": {"source": "constant", "constant": "knows"},
                         "objectMappings": [
                             {"valueSource": {"source": "record_id"}, "valueType": {"type": "bnode"},
                              "propertyMappings": [{"prefix": "foaf", "valueSource": {"source": "constant", "constant": "nick"}}]}
                         ]}
                    ]
                },
                {"valueSource": {"source": "constant", "constant": "_:batch"}, "valueType": {"type": "value_bnode"}}
            ]
        }));

        let json = to_json(&transform).unwrap();
        let reloaded = from_json(&json, &TransformConfig::default()).unwrap();
        assert_eq!(reloaded, transform);
        assert_eq!(to_json(&reloaded).unwrap(), json);
    }

    #[test]
    fn test_round_trip_without_namespaces() {
        let root: Node = ConstantResourceNode::new("alice", Some("")).into();
        let root = root.with_property(Property::new(
            Some("foaf"),
            "knows",
            Some(ConstantResourceNode::new("bob", Some("")).into()),
        ));
        let transform = RdfTransform::new("http://ex.org/")
            .unwrap()
            .with_root(root)
            .unwrap();
        assert!(transform.namespaces().is_empty());

        let reloaded = from_json(&to_json(&transform).unwrap(), &TransformConfig::default()).unwrap();
        assert!(reloaded.namespaces().is_empty());
        assert_eq!(reloaded, transform);

        let table = MemoryTable::new(["x"]).with_row(vec![json!("x")]);
        let config = TransformConfig::default();
        let mut before = GraphCollector::new();
        let mut after = GraphCollector::new();
        transform.apply_row(&table, &mut before, &config, 0).unwrap();
        reloaded.apply_row(&table, &mut after, &config, 0).unwrap();
        assert_eq!(before.into_triples(), after.into_triples());
    }

    #[test]
    fn test_empty_namespaces_key_is_kept_empty() {
        let transform = load(json!({"baseIRI": "http://ex.org/", "namespaces": {}}));
        assert!(transform.namespaces().is_empty());
    }

    #[test]
    fn test_identity_in_other_language_is_written() {
        let root: Node = CellResourceNode::new(
            CellSource::column("id").with_expression(Expression::new("jython", "value")),
            Some(""),
        )
        .into();
        let transform = RdfTransform::new("http://ex.org/")
            .unwrap()
            .with_root(root)
            .unwrap();

        let value = to_value(&transform).unwrap();
        assert_eq!(value["subjectMappings"][0]["expression"]["language"], "jython");

        let reloaded = from_value(value, &TransformConfig::default()).unwrap();
        assert_eq!(reloaded.roots()[0].expression().language, "jython");
        assert_eq!(reloaded, transform);
    }

    #[test]
    fn test_not_json_is_an_error() {
        let err = from_json("{not json", &TransformConfig::default()).unwrap_err();
        assert!(matches!(err, TransformError::Json(_)));
    }
}
