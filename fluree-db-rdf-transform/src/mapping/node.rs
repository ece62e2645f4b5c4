//! Mapping tree nodes
//!
//! A [`Node`] is one of six closed variants. Resource variants (IRIs and
//! blank nodes) can act as subjects and own [`SubjectMappings`]; literal
//! variants can only appear as property objects.

use super::expression::Expression;
use super::literal::{CellLiteralNode, ConstantLiteralNode};
use super::resource::{CellBlankNode, CellResourceNode, ConstantBlankNode, ConstantResourceNode};
use super::subject::{Property, RdfType, SubjectMappings};
use crate::materialize::{value_strings, EvalContext, RdfTerm};
use crate::record::RecordModel;
use crate::vocab::RDFT;

/// Where a node's values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// The row index
    Row,
    /// The record index
    Record,
    /// A named column
    Column,
    /// A fixed value
    Constant,
    /// Reserved: a free-standing expression with no column
    Expression,
}

impl NodeType {
    /// Parse a `valueSource.source` value
    pub fn from_source_str(s: &str) -> Option<Self> {
        match s {
            RDFT::SOURCE_ROW_INDEX => Some(NodeType::Row),
            RDFT::SOURCE_RECORD_ID => Some(NodeType::Record),
            RDFT::SOURCE_COLUMN => Some(NodeType::Column),
            RDFT::SOURCE_CONSTANT => Some(NodeType::Constant),
            RDFT::SOURCE_EXPRESSION => Some(NodeType::Expression),
            _ => None,
        }
    }

    pub fn as_source_str(&self) -> &'static str {
        match self {
            NodeType::Row => RDFT::SOURCE_ROW_INDEX,
            NodeType::Record => RDFT::SOURCE_RECORD_ID,
            NodeType::Column => RDFT::SOURCE_COLUMN,
            NodeType::Constant => RDFT::SOURCE_CONSTANT,
            NodeType::Expression => RDFT::SOURCE_EXPRESSION,
        }
    }

    /// Check if this is a row or record index
    pub fn is_index(&self) -> bool {
        matches!(self, NodeType::Row | NodeType::Record)
    }
}

/// The kind of term a node produces (`valueType.type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    Iri,
    BNode,
    /// Blank node minted from a constant seed
    ValueBNode,
    Literal,
    DatatypeLiteral,
    LanguageLiteral,
}

impl ValueType {
    pub fn from_type_str(s: &str) -> Option<Self> {
        match s {
            RDFT::TYPE_IRI => Some(ValueType::Iri),
            RDFT::TYPE_BNODE => Some(ValueType::BNode),
            RDFT::TYPE_VALUE_BNODE => Some(ValueType::ValueBNode),
            RDFT::TYPE_LITERAL => Some(ValueType::Literal),
            RDFT::TYPE_DATATYPE_LITERAL => Some(ValueType::DatatypeLiteral),
            RDFT::TYPE_LANGUAGE_LITERAL => Some(ValueType::LanguageLiteral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Iri => RDFT::TYPE_IRI,
            ValueType::BNode => RDFT::TYPE_BNODE,
            ValueType::ValueBNode => RDFT::TYPE_VALUE_BNODE,
            ValueType::Literal => RDFT::TYPE_LITERAL,
            ValueType::DatatypeLiteral => RDFT::TYPE_DATATYPE_LITERAL,
            ValueType::LanguageLiteral => RDFT::TYPE_LANGUAGE_LITERAL,
        }
    }

    /// Check if this value type produces literals
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ValueType::Literal | ValueType::DatatypeLiteral | ValueType::LanguageLiteral
        )
    }
}

/// The cell a cell-backed node reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSource {
    pub node_type: NodeType,
    /// Column name; `None` for index nodes
    pub column: Option<String>,
    pub expression: Expression,
}

impl CellSource {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Column,
            column: Some(name.into()),
            expression: Expression::default(),
        }
    }

    pub fn row_index() -> Self {
        Self {
            node_type: NodeType::Row,
            column: None,
            expression: Expression::default(),
        }
    }

    pub fn record_index() -> Self {
        Self {
            node_type: NodeType::Record,
            column: None,
            expression: Expression::default(),
        }
    }

    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expression = expression;
        self
    }

    pub fn is_index(&self) -> bool {
        self.node_type.is_index()
    }

    /// Evaluate the expression for `row` and fan the result out
    ///
    /// Evaluation errors mean "no value" for this row.
    pub(crate) fn evaluate(&self, ctx: &EvalContext<'_>, row: usize) -> Vec<String> {
        if self.node_type == NodeType::Expression {
            tracing::debug!(row, "Expression-sourced nodes are not evaluated");
            return Vec::new();
        }
        let column = if self.is_index() {
            None
        } else {
            self.column.as_deref()
        };
        match ctx.evaluator().evaluate(&self.expression, column, row) {
            Ok(value) => value_strings(&value),
            Err(e) => {
                tracing::debug!(column = ?column, row, error = %e, "Cell expression failed");
                Vec::new()
            }
        }
    }
}

/// A node of the mapping tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    ConstantResource(ConstantResourceNode),
    ConstantBlank(ConstantBlankNode),
    CellResource(CellResourceNode),
    CellBlank(CellBlankNode),
    ConstantLiteral(ConstantLiteralNode),
    CellLiteral(CellLiteralNode),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::ConstantResource(_) | Node::ConstantBlank(_) | Node::ConstantLiteral(_) => {
                NodeType::Constant
            }
            Node::CellResource(n) => n.source.node_type,
            Node::CellBlank(n) => n.source.node_type,
            Node::CellLiteral(n) => n.source.node_type,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Node::ConstantResource(_) | Node::CellResource(_) => ValueType::Iri,
            Node::ConstantBlank(_) => ValueType::ValueBNode,
            Node::CellBlank(_) => ValueType::BNode,
            Node::ConstantLiteral(n) => n.value_type(),
            Node::CellLiteral(n) => n.value_type(),
        }
    }

    pub fn expression(&self) -> &Expression {
        match self {
            Node::ConstantResource(n) => &n.expression,
            Node::ConstantBlank(n) => &n.expression,
            Node::ConstantLiteral(n) => &n.expression,
            Node::CellResource(n) => &n.source.expression,
            Node::CellBlank(n) => &n.source.expression,
            Node::CellLiteral(n) => &n.source.expression,
        }
    }

    /// Check if this node reads the row or record index
    pub fn is_index(&self) -> bool {
        self.node_type().is_index()
    }

    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            Node::ConstantResource(_) | Node::ConstantBlank(_) | Node::ConstantLiteral(_)
        )
    }

    /// Check if this node can act as a subject
    pub fn is_resource(&self) -> bool {
        self.subject_mappings().is_some()
    }

    /// Types and properties; `None` for literal nodes
    pub fn subject_mappings(&self) -> Option<&SubjectMappings> {
        match self {
            Node::ConstantResource(n) => Some(&n.mappings),
            Node::ConstantBlank(n) => Some(&n.mappings),
            Node::CellResource(n) => Some(&n.mappings),
            Node::CellBlank(n) => Some(&n.mappings),
            Node::ConstantLiteral(_) | Node::CellLiteral(_) => None,
        }
    }

    pub fn subject_mappings_mut(&mut self) -> Option<&mut SubjectMappings> {
        match self {
            Node::ConstantResource(n) => Some(&mut n.mappings),
            Node::ConstantBlank(n) => Some(&mut n.mappings),
            Node::CellResource(n) => Some(&mut n.mappings),
            Node::CellBlank(n) => Some(&mut n.mappings),
            Node::ConstantLiteral(_) | Node::CellLiteral(_) => None,
        }
    }

    /// Append a type; ignored (with a warning) on literal nodes
    pub fn with_type(mut self, rdf_type: RdfType) -> Self {
        match self.subject_mappings_mut() {
            Some(mappings) => mappings.types.push(rdf_type),
            None => tracing::warn!(path = %rdf_type.path, "Literal nodes cannot carry types"),
        }
        self
    }

    /// Append a property; ignored (with a warning) on literal nodes
    pub fn with_property(mut self, property: Property) -> Self {
        match self.subject_mappings_mut() {
            Some(mappings) => mappings.properties.push(property),
            None => tracing::warn!(path = %property.path, "Literal nodes cannot carry properties"),
        }
        self
    }

    /// Terms for a single row
    ///
    /// Constant variants ignore the row; cell variants produce nothing
    /// without one.
    pub(crate) fn produce_row(&self, ctx: &EvalContext<'_>, row: Option<usize>) -> Vec<RdfTerm> {
        match self {
            Node::ConstantResource(n) => n.produce(ctx),
            Node::ConstantBlank(n) => n.produce(),
            Node::ConstantLiteral(n) => n.produce(ctx),
            Node::CellResource(n) => row.map(|r| n.produce_row(ctx, r)).unwrap_or_default(),
            Node::CellBlank(n) => row.map(|r| n.produce_row(ctx, r)).unwrap_or_default(),
            Node::CellLiteral(n) => row.map(|r| n.produce_row(ctx, r)).unwrap_or_default(),
        }
    }

    /// Terms for the cursor's current scope
    ///
    /// In record mode a column node visits every row of the record in order;
    /// an index node reads the record's first row only.
    pub(crate) fn produce(&self, ctx: &EvalContext<'_>, cursor: &mut RecordModel) -> Vec<RdfTerm> {
        if self.is_constant() || !cursor.is_record_mode() {
            return self.produce_row(ctx, cursor.row());
        }

        if self.is_index() {
            cursor.row_next();
            let terms = self.produce_row(ctx, cursor.row());
            cursor.row_reset();
            return terms;
        }

        let mut terms = Vec::new();
        while cursor.row_next() {
            terms.extend(self.produce_row(ctx, cursor.row()));
        }
        terms
    }
}

impl From<ConstantResourceNode> for Node {
    fn from(node: ConstantResourceNode) -> Self {
        Node::ConstantResource(node)
    }
}

impl From<ConstantBlankNode> for Node {
    fn from(node: ConstantBlankNode) -> Self {
        Node::ConstantBlank(node)
    }
}

impl From<CellResourceNode> for Node {
    fn from(node: CellResourceNode) -> Self {
        Node::CellResource(node)
    }
}

impl From<CellBlankNode> for Node {
    fn from(node: CellBlankNode) -> Self {
        Node::CellBlank(node)
    }
}

impl From<ConstantLiteralNode> for Node {
    fn from(node: ConstantLiteralNode) -> Self {
        Node::ConstantLiteral(node)
    }
}

impl From<CellLiteralNode> for Node {
    fn from(node: CellLiteralNode) -> Self {
        Node::CellLiteral(node)
    }
}
