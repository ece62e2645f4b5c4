//! Resource node variants: IRIs and blank nodes

use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

use super::expression::Expression;
use super::node::{CellSource, NodeType};
use super::subject::SubjectMappings;
use crate::config::{TransformConfig, DEFAULT_BLANK_NOT_FIRST, DEFAULT_BLANK_NOT_LAST};
use crate::error::{TransformError, TransformResult};
use crate::iri::{strip_space, to_iri_string};
use crate::materialize::{BlankId, EvalContext, RdfTerm};

const BLANK_MARKER: &str = "_:";

static DEFAULT_RULE: Lazy<Arc<BlankLabelRule>> = Lazy::new(|| {
    Arc::new(
        BlankLabelRule::new(DEFAULT_BLANK_NOT_FIRST, DEFAULT_BLANK_NOT_LAST)
            .expect("valid regex"),
    )
});

/// Characters a blank node label may not start or end with
///
/// Each side is a regex character class; runs of it are stripped.
#[derive(Debug, Clone)]
pub struct BlankLabelRule {
    not_first: String,
    not_last: String,
    leading: Regex,
    trailing: Regex,
}

impl BlankLabelRule {
    pub fn new(not_first: &str, not_last: &str) -> TransformResult<Self> {
        let compile = |property: &str, pattern: String| {
            Regex::new(&pattern).map_err(|e| TransformError::InvalidValue {
                property: property.to_string(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            leading: compile("blankNotFirst", format!("^(?:{})+", not_first))?,
            trailing: compile("blankNotLast", format!("(?:{})+$", not_last))?,
            not_first: not_first.to_string(),
            not_last: not_last.to_string(),
        })
    }

    /// The shared default rule (Turtle blank node label limits)
    pub fn shared() -> Arc<Self> {
        Arc::clone(&DEFAULT_RULE)
    }

    pub fn from_config(config: &TransformConfig) -> TransformResult<Arc<Self>> {
        if config.blank_not_first == DEFAULT_BLANK_NOT_FIRST
            && config.blank_not_last == DEFAULT_BLANK_NOT_LAST
        {
            return Ok(Self::shared());
        }
        Self::new(&config.blank_not_first, &config.blank_not_last).map(Arc::new)
    }

    /// Strip `_:` markers and disallowed edge characters until stable
    pub fn sanitize(&self, seed: &str) -> String {
        let mut label = strip_space(seed);
        loop {
            let before = label.clone();
            while let Some(rest) = label.strip_prefix(BLANK_MARKER) {
                label = rest.to_string();
            }
            label = self.leading.replace(&label, "").into_owned();
            label = self.trailing.replace(&label, "").into_owned();
            if label == before {
                return label;
            }
        }
    }
}

impl PartialEq for BlankLabelRule {
    fn eq(&self, other: &Self) -> bool {
        self.not_first == other.not_first && self.not_last == other.not_last
    }
}

/// A fixed IRI
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantResourceNode {
    /// Local part, or the full IRI when `prefix` is `None`
    pub constant: String,
    pub prefix: Option<String>,
    /// Stored and written back; constants are not evaluated
    pub expression: Expression,
    pub mappings: SubjectMappings,
}

impl ConstantResourceNode {
    pub fn new(constant: &str, prefix: Option<&str>) -> Self {
        Self {
            constant: strip_space(constant),
            prefix: prefix.map(strip_space),
            expression: Expression::default(),
            mappings: SubjectMappings::default(),
        }
    }

    pub(crate) fn produce(&self, ctx: &EvalContext<'_>) -> Vec<RdfTerm> {
        if self.constant.is_empty() {
            return Vec::new();
        }
        ctx.normalize_resource_value(self.prefix.as_deref(), &self.constant)
            .into_iter()
            .collect()
    }
}

/// A single blank node, shared by every row
///
/// The blank node is minted on first use and reused for the life of the
/// node; clones taken after that share it.
#[derive(Debug, Clone)]
pub struct ConstantBlankNode {
    /// Label seed, sanitized on first use
    pub constant: String,
    pub expression: Expression,
    pub mappings: SubjectMappings,
    rule: Arc<BlankLabelRule>,
    blank: OnceCell<BlankId>,
}

impl ConstantBlankNode {
    pub fn new(constant: impl Into<String>) -> Self {
        Self {
            constant: constant.into(),
            expression: Expression::default(),
            mappings: SubjectMappings::default(),
            rule: BlankLabelRule::shared(),
            blank: OnceCell::new(),
        }
    }

    pub fn with_rule(mut self, rule: Arc<BlankLabelRule>) -> Self {
        self.rule = rule;
        self.blank = OnceCell::new();
        self
    }

    pub fn rule(&self) -> &BlankLabelRule {
        &self.rule
    }

    /// The node's blank node identity
    pub fn blank_id(&self) -> &BlankId {
        self.blank.get_or_init(|| self.mint())
    }

    fn mint(&self) -> BlankId {
        if self.constant.trim().is_empty() {
            tracing::warn!("Blank node constant is empty, using an anonymous blank node");
            return BlankId::fresh();
        }
        let label = self.rule.sanitize(&self.constant);
        if label.is_empty() {
            tracing::warn!(
                constant = %self.constant,
                "Blank node constant sanitizes to nothing, using an anonymous blank node"
            );
            return BlankId::fresh();
        }
        BlankId::new(label)
    }

    pub(crate) fn produce(&self) -> Vec<RdfTerm> {
        vec![RdfTerm::BlankNode(self.blank_id().clone())]
    }
}

impl PartialEq for ConstantBlankNode {
    fn eq(&self, other: &Self) -> bool {
        self.constant == other.constant
            && self.expression == other.expression
            && self.mappings == other.mappings
            && self.rule == other.rule
    }
}

/// IRIs read from a column or index
#[derive(Debug, Clone, PartialEq)]
pub struct CellResourceNode {
    pub source: CellSource,
    pub prefix: Option<String>,
    pub mappings: SubjectMappings,
}

impl CellResourceNode {
    pub fn new(source: CellSource, prefix: Option<&str>) -> Self {
        Self {
            source,
            prefix: prefix.map(strip_space),
            mappings: SubjectMappings::default(),
        }
    }

    pub(crate) fn produce_row(&self, ctx: &EvalContext<'_>, row: usize) -> Vec<RdfTerm> {
        self.source
            .evaluate(ctx, row)
            .iter()
            .filter_map(|value| ctx.normalize_resource_value(self.prefix.as_deref(), value))
            .collect()
    }
}

/// Blank nodes keyed by column and row
///
/// Any non-empty value yields a blank node; the value itself only decides
/// whether one is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBlankNode {
    pub source: CellSource,
    pub mappings: SubjectMappings,
}

impl CellBlankNode {
    pub fn new(source: CellSource) -> Self {
        Self {
            source,
            mappings: SubjectMappings::default(),
        }
    }

    fn blank_for_row(&self, row: usize) -> BlankId {
        match (self.source.node_type, &self.source.column) {
            (NodeType::Row, _) => BlankId::new(format!("row_{}", row)),
            (NodeType::Record, _) => BlankId::new(format!("record_{}", row)),
            (_, Some(column)) => match to_iri_string(column) {
                Some(label) => BlankId::new(format!("{}_{}", label, row)),
                None => BlankId::fresh(),
            },
            (_, None) => BlankId::fresh(),
        }
    }

    pub(crate) fn produce_row(&self, ctx: &EvalContext<'_>, row: usize) -> Vec<RdfTerm> {
        self.source
            .evaluate(ctx, row)
            .iter()
            .filter(|value| !strip_space(value).is_empty())
            .map(|_| RdfTerm::BlankNode(self.blank_for_row(row)))
            .collect()
    }
}
