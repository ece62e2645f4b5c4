//! Literal node variants

use super::expression::Expression;
use super::node::{CellSource, ValueType};
use crate::iri::strip_space;
use crate::materialize::{EvalContext, RdfTerm};

/// A literal's declared datatype
///
/// `prefix: None` means `value` is a full IRI (or a CIRIE to expand).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatatypeRef {
    pub prefix: Option<String>,
    pub value: String,
}

impl DatatypeRef {
    pub fn new(prefix: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            prefix: prefix.map(strip_space),
            value: value.into(),
        }
    }
}

/// A fixed literal value
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantLiteralNode {
    pub constant: String,
    pub datatype: Option<DatatypeRef>,
    pub language: Option<String>,
    pub expression: Expression,
}

impl ConstantLiteralNode {
    pub fn new(constant: impl Into<String>) -> Self {
        Self {
            constant: constant.into(),
            datatype: None,
            language: None,
            expression: Expression::default(),
        }
    }

    pub fn with_datatype(mut self, datatype: DatatypeRef) -> Self {
        self.datatype = Some(datatype);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn value_type(&self) -> ValueType {
        literal_value_type(self.datatype.as_ref(), self.language.as_deref())
    }

    pub(crate) fn produce(&self, ctx: &EvalContext<'_>) -> Vec<RdfTerm> {
        ctx.normalize_literal(&self.constant, self.datatype.as_ref(), self.language.as_deref())
            .into_iter()
            .collect()
    }
}

/// Literals read from a column or index
#[derive(Debug, Clone, PartialEq)]
pub struct CellLiteralNode {
    pub source: CellSource,
    pub datatype: Option<DatatypeRef>,
    pub language: Option<String>,
}

impl CellLiteralNode {
    pub fn new(source: CellSource) -> Self {
        Self {
            source,
            datatype: None,
            language: None,
        }
    }

    pub fn with_datatype(mut self, datatype: DatatypeRef) -> Self {
        self.datatype = Some(datatype);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn value_type(&self) -> ValueType {
        literal_value_type(self.datatype.as_ref(), self.language.as_deref())
    }

    pub(crate) fn produce_row(&self, ctx: &EvalContext<'_>, row: usize) -> Vec<RdfTerm> {
        self.source
            .evaluate(ctx, row)
            .iter()
            .filter_map(|value| {
                ctx.normalize_literal(value, self.datatype.as_ref(), self.language.as_deref())
            })
            .collect()
    }
}

fn literal_value_type(datatype: Option<&DatatypeRef>, language: Option<&str>) -> ValueType {
    match (datatype, language) {
        (Some(_), _) => ValueType::DatatypeLiteral,
        (None, Some(_)) => ValueType::LanguageLiteral,
        (None, None) => ValueType::Literal,
    }
}
