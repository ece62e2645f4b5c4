//! Types and properties of a subject node

use super::node::Node;
use crate::iri::strip_space;

/// An `rdf:type` assertion, resolved on every pass
///
/// `prefix`: `None` means `path` is a full IRI; `Some("")` resolves against
/// the base IRI; anything else goes through the namespace table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfType {
    pub prefix: Option<String>,
    pub path: String,
}

impl RdfType {
    pub fn new(prefix: Option<&str>, path: &str) -> Self {
        Self {
            prefix: prefix.map(strip_space),
            path: strip_space(path),
        }
    }
}

/// A predicate with the node that produces its objects
///
/// A `None` object is a property that was declared but never given a
/// usable object; it is kept for round-tripping and skipped on emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub prefix: Option<String>,
    pub path: String,
    pub object: Option<Box<Node>>,
}

impl Property {
    pub fn new(prefix: Option<&str>, path: &str, object: Option<Node>) -> Self {
        Self {
            prefix: prefix.map(strip_space),
            path: strip_space(path),
            object: object.map(Box::new),
        }
    }

    /// True when there is nothing to resolve the predicate from
    pub fn is_blank(&self) -> bool {
        self.prefix.is_none() && self.path.is_empty()
    }
}

/// Ordered types and properties of a subject-capable node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectMappings {
    pub types: Vec<RdfType>,
    pub properties: Vec<Property>,
}

impl SubjectMappings {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.properties.is_empty()
    }
}
