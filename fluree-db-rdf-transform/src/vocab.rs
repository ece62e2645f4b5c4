//! Vocabulary constants and transform document keys
//!
//! IRIs for the few RDF/XSD terms the interpreter emits or recognizes, plus
//! the JSON keys and enumerated values of the transform document.
//!
//! # Usage
//!
//! ```
//! use fluree_db_rdf_transform::vocab::{xsd, RDFT};
//!
//! assert!(xsd::is_datatype_cirie("xsd:integer"));
//! assert_eq!(RDFT::SUBJECT_MAPPINGS, "subjectMappings");
//! ```

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// Conventional XSD prefix
    pub const PREFIX: &str = "xsd";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// Local names of the built-in XML Schema datatypes
    pub const DATATYPES: &[&str] = &[
        // primitive
        "duration",
        "dateTime",
        "time",
        "date",
        "gYearMonth",
        "gYear",
        "gMonthDay",
        "gDay",
        "gMonth",
        "boolean",
        "base64Binary",
        "hexBinary",
        "float",
        "double",
        "anyURI",
        "QName",
        "NOTATION",
        // string derived
        "string",
        "normalizedString",
        "token",
        "language",
        "Name",
        "NCName",
        "ID",
        "IDREF",
        "IDREFS",
        "ENTITY",
        "ENTITIES",
        "NMTOKEN",
        "NMTOKENS",
        // numeric derived
        "decimal",
        "integer",
        "nonPositiveInteger",
        "negativeInteger",
        "long",
        "int",
        "short",
        "byte",
        "nonNegativeInteger",
        "unsignedLong",
        "unsignedInt",
        "unsignedShort",
        "unsignedByte",
        "positiveInteger",
    ];

    /// True when `cirie` is an `xsd:`-prefixed built-in datatype
    pub fn is_datatype_cirie(cirie: &str) -> bool {
        cirie
            .strip_prefix("xsd:")
            .is_some_and(|local| DATATYPES.contains(&local))
    }
}

/// Transform document keys and enumerated values
pub struct RDFT;

impl RDFT {
    // ==========================================================================
    // Document header
    // ==========================================================================

    /// Extension name written into every document
    pub const EXTENSION_NAME: &'static str = "RDFTransform";

    /// Document format version
    pub const VERSION: &'static str = "2.3.6";

    /// Base IRI used when a document does not carry one
    pub const DEFAULT_BASE_IRI: &'static str = "http://localhost:3333/";

    pub const EXTENSION: &'static str = "extension";
    pub const VERSION_KEY: &'static str = "version";
    pub const BASE_IRI: &'static str = "baseIRI";
    pub const NAMESPACES: &'static str = "namespaces";
    pub const SUBJECT_MAPPINGS: &'static str = "subjectMappings";

    // ==========================================================================
    // Node mappings
    // ==========================================================================

    pub const TYPE_MAPPINGS: &'static str = "typeMappings";
    pub const PROPERTY_MAPPINGS: &'static str = "propertyMappings";
    pub const OBJECT_MAPPINGS: &'static str = "objectMappings";
    pub const VALUE_SOURCE: &'static str = "valueSource";
    pub const VALUE_TYPE: &'static str = "valueType";
    pub const COLUMN_NAME: &'static str = "columnName";
    pub const DATATYPE: &'static str = "datatype";

    // ==========================================================================
    // Value sources
    // ==========================================================================

    /// Row index source (no key)
    pub const SOURCE_ROW_INDEX: &'static str = "row_index";

    /// Record index source (no key)
    pub const SOURCE_RECORD_ID: &'static str = "record_id";

    /// Column source, keyed by `columnName`
    pub const SOURCE_COLUMN: &'static str = "column";

    /// Constant source, keyed by `constant`
    pub const SOURCE_CONSTANT: &'static str = "constant";

    /// Reserved expression source
    pub const SOURCE_EXPRESSION: &'static str = "expression";

    // ==========================================================================
    // Value types
    // ==========================================================================

    pub const TYPE_IRI: &'static str = "iri";
    pub const TYPE_BNODE: &'static str = "bnode";
    pub const TYPE_VALUE_BNODE: &'static str = "value_bnode";
    pub const TYPE_LITERAL: &'static str = "literal";
    pub const TYPE_DATATYPE_LITERAL: &'static str = "datatype_literal";
    pub const TYPE_LANGUAGE_LITERAL: &'static str = "language_literal";

    // ==========================================================================
    // Expressions
    // ==========================================================================

    /// Default expression language
    pub const GREL: &'static str = "grel";

    /// Identity expression: the raw cell value, unmodified
    pub const CODE_VALUE: &'static str = "value";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace() {
        assert!(rdf::TYPE.starts_with(rdf::NS));
        assert!(xsd::INTEGER.starts_with(xsd::NS));
        assert!(xsd::DATE_TIME.starts_with(xsd::NS));
    }

    #[test]
    fn test_datatype_cirie() {
        assert!(xsd::is_datatype_cirie("xsd:integer"));
        assert!(xsd::is_datatype_cirie("xsd:NMTOKENS"));
        assert!(!xsd::is_datatype_cirie("xsd:integers"));
        assert!(!xsd::is_datatype_cirie("integer"));
        assert!(!xsd::is_datatype_cirie("ex:integer"));
    }
}
