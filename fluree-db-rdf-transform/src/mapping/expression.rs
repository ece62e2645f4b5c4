//! Cell expressions
//!
//! Expressions are opaque to the interpreter: they are handed to the host's
//! [`ExpressionEvaluator`](crate::host::ExpressionEvaluator) together with a
//! column and a row.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocab::RDFT;

static EMBEDDED_LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9]*):").expect("valid regex"));

/// An expression in some host expression language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    pub language: String,
    pub code: String,
}

impl Expression {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }

    /// Build from a stored `{language, code}` pair
    ///
    /// A code written as `lang:code` carries its own language, which wins
    /// over `language`.
    pub fn parse(language: Option<&str>, code: &str) -> Self {
        let code = code.trim();
        if let Some(caps) = EMBEDDED_LANGUAGE_RE.captures(code) {
            let lang = caps[1].to_ascii_lowercase();
            let rest = code[caps[0].len()..].trim_start();
            return Self::new(lang, rest);
        }
        Self::new(language.unwrap_or(RDFT::GREL), code)
    }

    /// True for the `value` sentinel: the raw cell value, unmodified
    pub fn is_identity(&self) -> bool {
        self.code == RDFT::CODE_VALUE
    }

    /// True for `grel:value`, the expression a document may leave out
    pub fn is_default(&self) -> bool {
        self.is_identity() && self.language == RDFT::GREL
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::new(RDFT::GREL, RDFT::CODE_VALUE)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.language, self.code)
    }
}
