//! Term normalization
//!
//! Turns raw strings (constants, evaluated cells) into RDF terms. Failures
//! here are never fatal: an unusable value is logged and produces no term.

use once_cell::sync::Lazy;
use oxiri::Iri;
use regex::Regex;
use serde_json::Value;

use super::context::EvalContext;
use super::term::RdfTerm;
use crate::error::{TransformError, TransformResult};
use crate::iri::{expand_prefixed_iri, get_data_type, resolve_iri, split_embedded_prefix, strip_space};
use crate::mapping::DatatypeRef;
use crate::namespace::PrefixLookup;
use crate::vocab::xsd;

static LANGUAGE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").expect("valid regex"));

/// BCP 47 shape check (not a registry lookup)
pub fn is_valid_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG_RE.is_match(tag)
}

/// Fan an evaluation result out into its non-empty string values
///
/// Arrays are flattened in order; `null` and `""` contribute nothing.
pub fn value_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Number(n) => vec![n.to_string()],
        Value::Array(items) => items.iter().flat_map(value_strings).collect(),
        Value::Object(_) => vec![value.to_string()],
    }
}

impl EvalContext<'_> {
    /// Resolve `(prefix, raw)` into an absolute IRI
    ///
    /// `Ok(None)` when nothing is left after whitespace stripping.
    pub fn resolve_resource(
        &self,
        prefix: Option<&str>,
        raw: &str,
    ) -> TransformResult<Option<String>> {
        let local = strip_space(raw);
        if local.is_empty() {
            return Ok(None);
        }

        let (candidate, namespace) = match prefix {
            Some(prefix) => (format!("{}:{}", prefix, local), self.namespace(prefix)),
            None => (local.clone(), None),
        };

        let Some(resolved) = resolve_iri(Some(self.base_iri()), &candidate)? else {
            return Ok(None);
        };
        match namespace {
            Some(namespace) => {
                let iri = format!("{}{}", namespace, local);
                Iri::parse(iri.as_str()).map_err(|e| TransformError::iri(&iri, e))?;
                Ok(Some(iri))
            }
            None => Ok(Some(resolved)),
        }
    }

    /// Build an IRI term, logging and dropping malformed input
    pub fn normalize_resource(&self, prefix: Option<&str>, raw: &str) -> Option<RdfTerm> {
        match self.resolve_resource(prefix, raw) {
            Ok(iri) => iri.map(RdfTerm::iri),
            Err(e) => {
                tracing::error!(prefix = ?prefix, value = raw, error = %e, "Unusable resource IRI");
                None
            }
        }
    }

    /// Like [`normalize_resource`](Self::normalize_resource), but a value
    /// without a configured prefix may carry its own (`foaf:Person`)
    ///
    /// The embedded prefix is honored only when it is bound; otherwise the
    /// value is taken as a full IRI (`urn:isbn:...`).
    pub fn normalize_resource_value(&self, prefix: Option<&str>, raw: &str) -> Option<RdfTerm> {
        let stripped = strip_space(raw);
        if prefix.is_none() {
            if let Some((embedded, local)) = split_embedded_prefix(&stripped) {
                if self.namespaces().contains_prefix(embedded) {
                    return self.normalize_resource(Some(embedded), local);
                }
            }
        }
        self.normalize_resource(prefix, &stripped)
    }

    /// Resolve a literal's datatype to an absolute IRI
    ///
    /// A prefixed datatype needs a bound prefix. Unprefixed values may be
    /// CIRIEs, relative to the base, or one of the built-in `xsd:` names.
    pub fn resolve_datatype(&self, datatype: &DatatypeRef) -> Option<String> {
        let value = strip_space(&datatype.value);
        if value.is_empty() {
            return None;
        }
        match datatype.prefix.as_deref() {
            Some(prefix) => {
                let namespace = self.namespace(prefix)?;
                let iri = format!("{}{}", namespace, value);
                Iri::parse(iri.as_str()).ok()?;
                Some(iri)
            }
            None => {
                let expanded = expand_prefixed_iri(self, &value);
                let resolved = get_data_type(Some(self.base_iri()), None, &expanded)?;
                if xsd::is_datatype_cirie(&resolved) {
                    return Some(resolved.replacen("xsd:", xsd::NS, 1));
                }
                Some(resolved)
            }
        }
    }

    /// Build a literal term
    ///
    /// Preference is datatype, then language, then plain. An unusable
    /// datatype or language tag falls through to the next option.
    pub fn normalize_literal(
        &self,
        raw: &str,
        datatype: Option<&DatatypeRef>,
        language: Option<&str>,
    ) -> Option<RdfTerm> {
        if raw.is_empty() {
            return None;
        }

        if let Some(datatype) = datatype {
            match self.resolve_datatype(datatype) {
                Some(iri) => return Some(RdfTerm::typed(raw, iri)),
                None => tracing::debug!(
                    prefix = ?datatype.prefix,
                    datatype = %datatype.value,
                    "Unresolvable datatype, ignoring"
                ),
            }
        }

        if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
            if is_valid_language_tag(language) {
                return Some(RdfTerm::lang_string(raw, language));
            }
            tracing::debug!(language, "Invalid language tag, ignoring");
        }

        Some(RdfTerm::string(raw))
    }
}
