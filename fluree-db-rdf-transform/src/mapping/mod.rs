//! Mapping tree
//!
//! The node model built by [`crate::mapper`] and evaluated by the visitors.
//! Subject nodes own their types and properties; each property owns the
//! node that produces its objects, so the tree nests arbitrarily deep.

mod emit;
mod expression;
mod literal;
mod node;
mod resource;
mod subject;

pub use expression::Expression;
pub use literal::{CellLiteralNode, ConstantLiteralNode, DatatypeRef};
pub use node::{CellSource, Node, NodeType, ValueType};
pub use resource::{
    BlankLabelRule, CellBlankNode, CellResourceNode, ConstantBlankNode, ConstantResourceNode,
};
pub use subject::{Property, RdfType, SubjectMappings};
