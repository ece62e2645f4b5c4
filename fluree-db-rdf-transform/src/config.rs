//! Transform configuration

use serde::{Deserialize, Serialize};

/// Default characters a blank node label may not start with
pub const DEFAULT_BLANK_NOT_FIRST: &str = r"[-.\x{00B7}\x{0300}-\x{036F}\x{203F}\x{2040}]";

/// Default characters a blank node label may not end with
pub const DEFAULT_BLANK_NOT_LAST: &str = r"[.]";

/// Default number of buffered triples before an export flush
pub const DEFAULT_EXPORT_LIMIT: usize = 10_737_418;

/// Configuration for applying a transform
///
/// Passed explicitly to the evaluation context and the visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformConfig {
    /// Log verbosity for progress messages
    ///
    /// `0` keeps the visitors quiet; higher values add per-row/record
    /// `debug!` output.
    /// Default: 0
    pub verbosity: u8,

    /// Number of buffered triples that triggers a flush to the export sink
    ///
    /// The buffer is also flushed at the end of every row/record visit.
    /// Default: 10,737,418
    pub export_limit: usize,

    /// Maximum number of rows/records a preview visits
    ///
    /// `0` previews everything.
    /// Default: 20
    pub sample_limit: usize,

    /// Emit `debug!` traces from the node model
    /// Default: false
    pub debug: bool,

    /// Log the transform document whenever it is (re)loaded
    /// Default: false
    pub debug_json: bool,

    /// Character class a blank node label may not start with
    ///
    /// A regex character class; runs of it are stripped from the label.
    pub blank_not_first: String,

    /// Character class a blank node label may not end with
    pub blank_not_last: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            export_limit: DEFAULT_EXPORT_LIMIT,
            sample_limit: 20,
            debug: false,
            debug_json: false,
            blank_not_first: DEFAULT_BLANK_NOT_FIRST.to_string(),
            blank_not_last: DEFAULT_BLANK_NOT_LAST.to_string(),
        }
    }
}

impl TransformConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preview sample limit
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Set the export flush threshold
    pub fn with_export_limit(mut self, limit: usize) -> Self {
        self.export_limit = limit;
        self
    }

    /// Enable node model debug traces
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// True when per-row/record progress should be logged
    pub fn is_verbose(&self) -> bool {
        self.verbosity > 0 || self.debug
    }
}
