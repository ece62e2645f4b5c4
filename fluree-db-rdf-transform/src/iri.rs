//! IRI resolution and string utilities
//!
//! Everything here is pure: no namespace state beyond what the caller passes
//! in through [`PrefixLookup`]. Syntax checking is delegated to `oxiri`.

use once_cell::sync::Lazy;
use oxiri::{Iri, IriRef};
use regex::Regex;

use crate::error::{TransformError, TransformResult};
use crate::namespace::PrefixLookup;
use crate::vocab::xsd;

static BLANK_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{C}\p{Z}]+").expect("valid regex"));

/// Remove every whitespace, separator, control and format character
///
/// Non-breaking spaces and zero-width characters pasted from spreadsheets
/// are the usual culprits.
pub fn strip_space(raw: &str) -> String {
    BLANK_FORMAT_RE.replace_all(raw, "").into_owned()
}

/// Resolve a candidate string into an absolute IRI
///
/// Tries, in order:
/// 1. the candidate as an already-absolute IRI
/// 2. the candidate resolved against `base`
/// 3. `/` + candidate resolved against `base` (recovers a missing root slash)
///
/// Empty input is `Ok(None)`, as is a relative candidate with no base to
/// resolve it against. An error is returned only when an attempt failed with
/// a genuine syntax error and none succeeded.
pub fn resolve_iri(base: Option<&Iri<String>>, candidate: &str) -> TransformResult<Option<String>> {
    if candidate.is_empty() {
        return Ok(None);
    }

    let mut last_error: Option<String> = None;

    match IriRef::parse(candidate) {
        Ok(iri_ref) if iri_ref.scheme().is_some() => {
            return Ok(Some(iri_ref.as_str().to_string()));
        }
        Ok(_) => {}
        Err(e) => last_error = Some(e.to_string()),
    }

    if let Some(base) = base {
        match base.resolve(candidate) {
            Ok(resolved) => return Ok(Some(resolved.into_inner())),
            Err(e) => last_error = Some(e.to_string()),
        }

        if !candidate.starts_with('/') {
            match base.resolve(&format!("/{}", candidate)) {
                Ok(resolved) => return Ok(Some(resolved.into_inner())),
                Err(e) => last_error = Some(e.to_string()),
            }
        }
    }

    match last_error {
        Some(message) => {
            tracing::debug!(iri = candidate, %message, "IRI resolution failed");
            Err(TransformError::iri(candidate, message))
        }
        None => Ok(None),
    }
}

/// Expand a `prefix:localPart` CIRIE through the namespace table
///
/// Inputs that already carry an authority (`://`), have no `:`, or use an
/// unbound prefix are returned unchanged.
pub fn expand_prefixed_iri(namespaces: &dyn PrefixLookup, candidate: &str) -> String {
    if candidate.contains("://") {
        return candidate.to_string();
    }
    match candidate.split_once(':') {
        Some((prefix, local)) => match namespaces.namespace(prefix) {
            Some(namespace) => format!("{}{}", namespace, local),
            None => candidate.to_string(),
        },
        None => candidate.to_string(),
    }
}

/// Split a value of the form `scheme:rest` with no `//authority`
///
/// Such a value is most likely a CIRIE typed into a cell (`foaf:Person`), so
/// the scheme is handed back as a namespace prefix.
pub fn split_embedded_prefix(value: &str) -> Option<(&str, &str)> {
    let iri = Iri::parse(value).ok()?;
    if iri.authority().is_some() {
        return None;
    }
    let scheme_len = iri.scheme().len();
    Some((&value[..scheme_len], &value[scheme_len + 1..]))
}

/// Index just past the namespace part of a full IRI
///
/// Splits after the first `#`, else after the last `/`, else after the last `:`.
pub fn find_local_part_index(iri: &str) -> Option<usize> {
    iri.find('#')
        .or_else(|| iri.rfind('/'))
        .or_else(|| iri.rfind(':'))
        .map(|idx| idx + 1)
}

/// Position of the prefix colon when `iri` reads as a CIRIE
///
/// `Some(0)` denotes a base reference (`:local`). A candidate is accepted when
/// it parses with a scheme but no authority, or when it is a bare `prefix:`
/// without whitespace.
pub fn find_prefix_index(iri: &str) -> Option<usize> {
    let idx = iri.find(':')?;
    if idx == 0 {
        return Some(0);
    }
    if iri.len() > idx + 1 {
        let parsed = IriRef::parse(iri).ok()?;
        if parsed.scheme().is_some() && parsed.authority().is_none() {
            return Some(idx);
        }
        return None;
    }
    if !iri.chars().any(char::is_whitespace) {
        return Some(idx);
    }
    None
}

/// True when `iri` reads as a CIRIE or base reference
pub fn is_prefixed_iri(iri: &str) -> bool {
    find_prefix_index(iri).is_some()
}

/// Resolve a datatype declaration
///
/// Built-in `xsd:` datatypes are returned in CIRIE form; anything else is
/// resolved against the base. `None` when the datatype cannot be resolved.
pub fn get_data_type(base: Option<&Iri<String>>, prefix: Option<&str>, value: &str) -> Option<String> {
    let cirie = match prefix {
        Some(prefix) => format!("{}:{}", prefix, value),
        None => value.to_string(),
    };
    if xsd::is_datatype_cirie(&cirie) {
        return Some(cirie);
    }
    resolve_iri(base, &cirie).ok().flatten()
}

static IRI_UNSAFE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\p{C}\p{Z}<>"{}|\\^`]+"#).expect("valid regex"));
static UNDERSCORES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__+").expect("valid regex"));

/// Progressive replacement passes, applied until the string is a valid IRI
static IRI_REPAIR_PASSES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // characters outside the IRI character set
        r"[^-\p{N}\p{L}_.~:/?#\[\]@%!$&'()*+,;=]+",
        // leading ':/' or '/' runs
        r"^(:?/+)+",
        // sub-delimiters
        r"[!$&'()*+,;=]+",
        // general delimiters, except ':' and '/'
        r"[?#\[\]@]+",
        r"/+",
        r":+",
        r"[^-\p{N}\p{L}_.~]+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Prepare an arbitrary string for use as, or within, an IRI
///
/// Whitespace and characters never allowed in IRIs become `_`. If the result
/// still does not parse, delimiters are replaced progressively (sub-delims,
/// then `?#[]@`, then `/`, then `:`) until it does. Repeated underscores are
/// collapsed after every pass. `None` for empty input or when every pass
/// failed.
pub fn to_iri_string(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let replaced = IRI_UNSAFE_RE.replace_all(raw, "_");
    let mut converted = UNDERSCORES_RE.replace_all(&replaced, "_").into_owned();

    let mut passes = IRI_REPAIR_PASSES.iter();
    loop {
        if IriRef::parse(converted.as_str()).is_ok() {
            return Some(converted);
        }
        let pass = passes.next()?;
        let replaced = pass.replace_all(&converted, "_");
        converted = UNDERSCORES_RE.replace_all(&replaced, "_").into_owned();
    }
}
