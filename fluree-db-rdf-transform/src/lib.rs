//! RDF transform interpreter for tabular data
//!
//! This crate turns the rows and records of a host table into RDF triples by
//! evaluating a mapping tree: root subject nodes that carry `rdf:type`
//! mappings and properties, whose objects are nodes again.
//!
//! # Key Features
//!
//! - **Transform documents**: Load and save the JSON transform document
//!   (base IRI, namespaces, subject mappings) with lenient reconstruction
//! - **Node model**: Six closed node variants producing IRIs, blank nodes
//!   and literals from constants, columns, or row/record indexes
//! - **Record fan-out**: A record-scoped subject gathers values across its
//!   rows while its objects are evaluated row by row
//! - **Term normalization**: Prefix expansion, base IRI resolution, datatype
//!   and language tag checks, all backed by `oxiri`
//! - **Visitors**: Bounded previews and buffered exports over any
//!   [`RowSource`]
//!
//! # Usage
//!
//! Load a transform with [`RdfTransform::from_json()`], then drive it with
//! [`visit_rows()`] or [`visit_records()`] using a [`PreviewVisitor`] or an
//! [`ExportVisitor`]. The host supplies cell values through
//! [`ExpressionEvaluator`]; [`MemoryTable`] is a small in-memory host.
//! Generated statements go to any [`TripleSink`].

pub mod config;
pub mod error;
pub mod host;
pub mod iri;
pub mod mapper;
pub mod mapping;
pub mod materialize;
pub mod namespace;
pub mod record;
pub mod sink;
pub mod transform;
pub mod visitor;
pub mod vocab;

pub use config::TransformConfig;
pub use error::{EvalError, TransformError, TransformResult};
pub use host::{ExpressionEvaluator, MemoryTable, RowSource};
pub use mapping::{Expression, Node, Property, RdfType};
pub use materialize::{BlankId, RdfTerm};
pub use namespace::{Vocabulary, VocabularyList};
pub use record::Record;
pub use sink::{GraphCollector, Triple, TripleSink};
pub use transform::RdfTransform;
pub use visitor::{
    visit_records, visit_rows, ExportVisitor, PreviewVisitor, RecordVisitor, RowVisitor,
};
pub use vocab::RDFT;
