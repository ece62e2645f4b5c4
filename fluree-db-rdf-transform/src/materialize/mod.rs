//! Term materialization
//!
//! - [`RdfTerm`] / [`BlankId`]: the terms the node model produces
//! - [`EvalContext`]: per-pass state (base IRI, namespaces, evaluator, sink)
//! - normalization: raw strings to IRIs and literals, see [`EvalContext::normalize_resource`]
//!   and [`EvalContext::normalize_literal`]

mod context;
mod normalize;
mod term;

pub use context::EvalContext;
pub use normalize::{is_valid_language_tag, value_strings};
pub use term::{BlankId, RdfTerm};
