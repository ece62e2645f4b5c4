//! Integration tests for the RDF transform interpreter.
//!
//! Test categories:
//! - Scenarios: small tables and transforms with exact expected triples
//! - Properties: cardinality, empty propagation, blank node identity
//! - Documents: JSON load/save round trips
//! - Visitors: preview bounds, export flushing, sink failures

use fluree_db_rdf_transform::mapping::{
    CellLiteralNode, CellResourceNode, CellSource, ConstantBlankNode, ConstantLiteralNode,
    ConstantResourceNode, DatatypeRef,
};
use fluree_db_rdf_transform::{
    visit_records, visit_rows, ExportVisitor, GraphCollector, MemoryTable, Node, PreviewVisitor,
    Property, RdfTerm, RdfTransform, RdfType, Record, TransformConfig, TransformError,
    TransformResult, Triple, TripleSink, Vocabulary, VocabularyList,
};
use serde_json::json;

const FOAF: &str = "http://xmlns.com/foaf/0.1/";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn foaf_only() -> VocabularyList {
    [Vocabulary::new("foaf", FOAF)].into_iter().collect()
}

fn transform_with(root: Node) -> RdfTransform {
    RdfTransform::new("http://ex.org/")
        .unwrap()
        .with_namespaces(foaf_only())
        .with_root(root)
        .unwrap()
}

fn apply_row(transform: &RdfTransform, table: &MemoryTable, row: usize) -> GraphCollector {
    let config = TransformConfig::default();
    let mut sink = GraphCollector::new();
    transform.apply_row(table, &mut sink, &config, row).unwrap();
    sink
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_foaf_knows_scenario() {
    init_tracing();
    let json = r#"{
        "extension": "RDFTransform",
        "version": "2.3.6",
        "baseIRI": "http://ex.org/",
        "namespaces": {"foaf": "http://xmlns.com/foaf/0.1/"},
        "subjectMappings": [{
            "prefix": "",
            "valueSource": {"source": "column", "columnName": "name"},
            "expression": {"language": "grel", "code": "value"},
            "propertyMappings": [{
                "prefix": "foaf",
                "valueSource": {"source": "constant", "constant": "knows"},
                "objectMappings": [{
                    "valueSource": {"source": "constant", "constant": "http://ex.org/bob"},
                    "valueType": {"type": "iri"}
                }]
            }]
        }]
    }"#;
    let transform = RdfTransform::from_json(json).unwrap();
    let table = MemoryTable::new(["name"]).with_row(vec![json!("Alice")]);

    let sink = apply_row(&transform, &table, 0);
    let triples = sink.into_triples();
    assert_eq!(
        triples,
        vec![Triple::new(
            RdfTerm::iri("http://ex.org/Alice"),
            "http://xmlns.com/foaf/0.1/knows",
            RdfTerm::iri("http://ex.org/bob"),
        )]
    );
}

#[test]
fn test_unresolvable_datatype_falls_back_to_plain_literal() {
    let subject: Node = ConstantResourceNode::new("answer", Some("")).into();
    let object = ConstantLiteralNode::new("42").with_datatype(DatatypeRef::new(Some("xsd"), "integer"));
    // no xsd binding in the namespace table
    let transform = transform_with(subject.with_property(Property::new(
        Some("foaf"),
        "age",
        Some(object.into()),
    )));
    let table = MemoryTable::new(["x"]).with_row(vec![json!("x")]);

    let triples = apply_row(&transform, &table, 0).into_triples();
    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0].o, RdfTerm::string("42"));
}

#[test]
fn test_datatype_and_language_literals() {
    let subject: Node = CellResourceNode::new(CellSource::column("name"), Some("")).into();
    let age = CellLiteralNode::new(CellSource::column("age"))
        .with_datatype(DatatypeRef::new(None, "xsd:integer"));
    let nick = CellLiteralNode::new(CellSource::column("nick")).with_language("en");
    let transform = transform_with(
        subject
            .with_property(Property::new(Some("foaf"), "age", Some(age.into())))
            .with_property(Property::new(Some("foaf"), "nick", Some(nick.into()))),
    );
    let table = MemoryTable::new(["name", "age", "nick"])
        .with_row(vec![json!("Alice"), json!(30), json!("Al")]);

    let triples = apply_row(&transform, &table, 0).into_triples();
    assert_eq!(
        triples[0].o,
        RdfTerm::typed("30", "http://www.w3.org/2001/XMLSchema#integer")
    );
    assert_eq!(triples[1].o, RdfTerm::lang_string("Al", "en"));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_record_fan_out_keeps_row_order() {
    let table = MemoryTable::new(["tags"])
        .with_row(vec![json!("skip")])
        .with_row(vec![json!("skip")])
        .with_row(vec![json!(["a"])])
        .with_row(vec![json!([])])
        .with_row(vec![json!(["b", "c"])])
        .with_records(vec![Record::new(0, 2), Record::new(2, 5)]);
    let root: Node = CellResourceNode::new(CellSource::column("tags"), Some("")).into();
    let transform = transform_with(root.with_type(RdfType::new(Some("foaf"), "Document")));

    let config = TransformConfig::default();
    let mut sink = GraphCollector::new();
    let subjects = transform
        .apply_record(&table, &mut sink, &config, Record::new(2, 5))
        .unwrap();

    assert_eq!(
        subjects,
        vec![
            RdfTerm::iri("http://ex.org/a"),
            RdfTerm::iri("http://ex.org/b"),
            RdfTerm::iri("http://ex.org/c"),
        ]
    );
    assert_eq!(sink.len(), 3);
}

#[test]
fn test_cross_product_cardinality() {
    let table = MemoryTable::new(["who", "likes"])
        .with_row(vec![json!(["ann", "ben"]), json!(["tea", "jam", "figs"])]);
    let root: Node = CellResourceNode::new(CellSource::column("who"), Some("")).into();
    let likes = CellLiteralNode::new(CellSource::column("likes"));
    let transform = transform_with(root.with_property(Property::new(
        Some("foaf"),
        "topic_interest",
        Some(likes.into()),
    )));

    let mut sink = apply_row(&transform, &table, 0);
    sink.dedupe();
    assert_eq!(sink.len(), 6);
}

#[test]
fn test_empty_subject_emits_nothing() {
    let table = MemoryTable::new(["name", "nick"]).with_row(vec![json!(null), json!("ghost")]);
    let root: Node = CellResourceNode::new(CellSource::column("name"), Some("")).into();
    let nick = CellLiteralNode::new(CellSource::column("nick"));
    let transform = transform_with(
        root.with_type(RdfType::new(Some("foaf"), "Person"))
            .with_property(Property::new(Some("foaf"), "nick", Some(nick.into()))),
    );

    let config = TransformConfig::default();
    let mut sink = GraphCollector::new();
    let subjects = transform.apply_row(&table, &mut sink, &config, 0).unwrap();
    assert!(subjects.is_empty());
    assert!(sink.is_empty());
}

#[test]
fn test_constant_blank_is_stable_across_rows() {
    let table = MemoryTable::new(["n"])
        .with_row(vec![json!("1")])
        .with_row(vec![json!("2")]);
    let root: Node = ConstantBlankNode::new("batch one").into();
    let transform = transform_with(root.with_type(RdfType::new(Some("foaf"), "Group")));

    let config = TransformConfig::default();
    let mut sink = GraphCollector::new();
    let first = transform.apply_row(&table, &mut sink, &config, 0).unwrap();
    let second = transform.apply_row(&table, &mut sink, &config, 1).unwrap();
    assert_eq!(first, second);
    assert!(first[0].is_blank_node());

    let other: Node = ConstantBlankNode::new("batch two").into();
    let other = transform_with(other);
    let third = other.apply_row(&table, &mut sink, &config, 0).unwrap();
    assert_ne!(first, third);
}

// =============================================================================
// Documents
// =============================================================================

#[test]
fn test_document_round_trip() {
    let json = json!({
        "extension": "RDFTransform",
        "version": "2.3.6",
        "baseIRI": {"scheme": "http", "host": "ex.org", "port": -1, "path": "/people/"},
        "namespaces": {
            "foaf": "http://xmlns.com/foaf/0.1/",
            "ex": {"namespace": "http://ex.org/ns#", "location": "http://ex.org/ns.ttl", "loctype": "URL"}
        },
        "subjectMappings": [{
            "prefix": "",
            "valueSource": {"source": "column", "columnName": "name"},
            "typeMappings": [{"prefix": "foaf", "valueSource": {"source": "constant", "constant": "Person"}}],
            "propertyMappings": [{
                "prefix": "foaf",
                "valueSource": {"source": "constant", "constant": "knows"},
                "objectMappings": [{
                    "valueSource": {"source": "row_index"},
                    "valueType": {"type": "bnode"}
                }]
            }]
        }]
    })
    .to_string();

    let transform = RdfTransform::from_json(&json).unwrap();
    assert_eq!(transform.base_iri().as_str(), "http://ex.org/people/");

    let saved = transform.to_json().unwrap();
    let saved_value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved_value["baseIRI"], "http://ex.org/people/");
    assert_eq!(saved_value["namespaces"]["ex"]["loctype"], "URL");
    assert_eq!(saved_value["namespaces"]["foaf"], FOAF);

    let reloaded = RdfTransform::from_json(&saved).unwrap();
    assert_eq!(reloaded, transform);
}

#[test]
fn test_malformed_document_is_an_error() {
    assert!(matches!(
        RdfTransform::from_json("[1, 2"),
        Err(TransformError::Json(_))
    ));
}

// =============================================================================
// Visitors
// =============================================================================

struct ClosedSink;

impl TripleSink for ClosedSink {
    fn on_prefix(&mut self, _: &str, _: &str) {}

    fn emit_triple(&mut self, _: Triple) -> TransformResult<()> {
        Err(TransformError::Sink("connection reset".into()))
    }
}

fn people_transform() -> RdfTransform {
    let root: Node = CellResourceNode::new(CellSource::column("name"), Some("")).into();
    transform_with(root.with_type(RdfType::new(Some("foaf"), "Person")))
}

fn people_table(rows: usize) -> MemoryTable {
    let mut table = MemoryTable::new(["name"]);
    for i in 0..rows {
        table.push_row(vec![json!(format!("person{}", i))]);
    }
    table
}

#[test]
fn test_sink_error_propagates_from_apply() {
    let transform = people_transform();
    let table = people_table(1);
    let config = TransformConfig::default();

    let err = transform
        .apply_row(&table, &mut ClosedSink, &config, 0)
        .unwrap_err();
    assert!(matches!(err, TransformError::Sink(_)));
}

#[test]
fn test_preview_stops_at_sample_limit() {
    let transform = people_transform();
    let table = people_table(50);
    let config = TransformConfig::default();

    let mut visitor = PreviewVisitor::new(&transform, &table, &config);
    visit_rows(&table, &mut visitor).unwrap();
    assert_eq!(visitor.count(), 20);
    assert_eq!(visitor.graph().len(), 20);
}

#[test]
fn test_preview_tolerates_expression_errors() {
    // the subject column is missing, so every evaluation fails
    let transform = people_transform();
    let table = MemoryTable::new(["other"]).with_row(vec![json!("x")]);
    let config = TransformConfig::default();

    let mut visitor = PreviewVisitor::new(&transform, &table, &config);
    visit_records(&table, &mut visitor).unwrap();
    assert_eq!(visitor.count(), 1);
    assert!(visitor.graph().is_empty());
}

#[test]
fn test_export_writes_everything() {
    let transform = people_transform();
    let table = people_table(50);
    let config = TransformConfig::default().with_export_limit(7);

    let mut visitor = ExportVisitor::new(&transform, &table, &config, GraphCollector::new());
    visit_rows(&table, &mut visitor).unwrap();
    assert_eq!(visitor.written(), 50);
    assert_eq!(visitor.sink().prefixes.len(), 2);
}

#[test]
fn test_export_aborts_on_sink_error() {
    let transform = people_transform();
    let table = people_table(3);
    let config = TransformConfig::default();

    let mut visitor = ExportVisitor::new(&transform, &table, &config, ClosedSink);
    let err = visit_rows(&table, &mut visitor).unwrap_err();
    assert!(matches!(err, TransformError::Sink(_)));
    assert_eq!(visitor.written(), 0);
}
