//! RDF terms produced by the node model
//!
//! A term can be:
//! - An IRI (always absolute, never prefixed)
//! - A blank node (labelled, or freshly minted with an unpredictable label)
//! - A literal (lexical value + optional datatype or language tag)

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::vocab::rdf;

/// Blank node identifier
///
/// The label does not include the `_:` marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a caller-supplied label
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Mint an anonymous blank node ID
    ///
    /// Labels are random, so two calls never share an identity.
    pub fn fresh() -> Self {
        Self::new(format!("b{}", Uuid::new_v4().simple()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Materialized RDF term
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdfTerm {
    /// An absolute IRI
    Iri(String),
    /// A blank node
    BlankNode(BlankId),
    /// A literal with optional datatype and language
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl RdfTerm {
    /// Create an IRI term
    pub fn iri(iri: impl Into<String>) -> Self {
        RdfTerm::Iri(iri.into())
    }

    /// Create a labelled blank node term
    pub fn blank_node(label: impl AsRef<str>) -> Self {
        RdfTerm::BlankNode(BlankId::new(label))
    }

    /// Create a plain literal
    pub fn string(value: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a typed literal
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Create a language-tagged string
    pub fn lang_string(value: impl Into<String>, lang: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            datatype: Some(rdf::LANG_STRING.to_string()),
            language: Some(lang.into()),
        }
    }

    /// Check if this is an IRI
    pub fn is_iri(&self) -> bool {
        matches!(self, RdfTerm::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfTerm::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfTerm::Literal { .. })
    }

    /// Get as IRI string if this is an IRI
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            RdfTerm::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get the blank node identifier if this is a blank node
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            RdfTerm::BlankNode(id) => Some(id),
            _ => None,
        }
    }
}

/// N-Triples-like rendering, for logs and test diagnostics
impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::Iri(iri) => write!(f, "<{}>", iri),
            RdfTerm::BlankNode(id) => write!(f, "{}", id),
            RdfTerm::Literal {
                value,
                datatype,
                language,
            } => {
                write!(f, "\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_term_constructors() {
        let iri = RdfTerm::iri("http://example.org");
        assert!(iri.is_iri());
        assert_eq!(iri.as_iri(), Some("http://example.org"));

        let blank = RdfTerm::blank_node("b0");
        assert!(blank.is_blank_node());
        assert_eq!(blank.as_blank().map(BlankId::as_str), Some("b0"));

        let lit = RdfTerm::string("hello");
        assert!(lit.is_literal());
        assert_eq!(lit.as_iri(), None);
    }

    #[test]
    fn test_fresh_blank_ids_differ() {
        let a = BlankId::fresh();
        let b = BlankId::fresh();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with('b'));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RdfTerm::iri("http://ex.org/a").to_string(),
            "<http://ex.org/a>"
        );
        assert_eq!(RdfTerm::blank_node("x_1").to_string(), "_:x_1");
        assert_eq!(RdfTerm::string("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(
            RdfTerm::typed("42", "http://www.w3.org/2001/XMLSchema#integer").to_string(),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        assert_eq!(RdfTerm::lang_string("chat", "fr").to_string(), "\"chat\"@fr");
    }
}
