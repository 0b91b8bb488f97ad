//! Processor configuration.
//!
//! [`DecodeConfig`] is the serde-facing shape of the processor settings,
//! deserialized once at startup and validated by
//! [`CsvFieldsProcessor::new`](crate::processor::CsvFieldsProcessor::new).
//! Header specifications are explicit tagged variants, so exactly one
//! source of column names exists per decoded field and no runtime type
//! probing is needed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the column names for a decoded source field come from.
///
/// A `literal` line beats an external `file`, which beats the event's own
/// `source_file`; the variant picked in configuration is the one tier used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeaderSource {
    /// Header row supplied directly in configuration.
    Literal { line: String },

    /// Header row read from an external file.
    File {
        path: String,
        /// 1-based line number holding the header row (0 means line 1).
        #[serde(default)]
        offset: usize,
    },

    /// Header row read from the file the event itself was harvested from,
    /// via its `log.file.path` attribute.
    SourceFile {
        /// 1-based line number holding the header row (0 means line 1).
        #[serde(default)]
        offset: usize,
    },
}

impl HeaderSource {
    /// The 1-based line offset, with unset or zero normalized to the first
    /// line. Reading it never mutates the shared specification.
    pub fn offset(&self) -> usize {
        match self {
            HeaderSource::Literal { .. } => 1,
            HeaderSource::File { offset, .. } | HeaderSource::SourceFile { offset } => {
                (*offset).max(1)
            }
        }
    }
}

/// Policy for records whose value count differs from the header's column
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMismatch {
    /// Pair up to the shorter of the two and drop surplus values. Default.
    #[default]
    Truncate,
    /// Missing values become empty strings; surplus values are dropped.
    Pad,
    /// Fail the mapping.
    Error,
}

/// Processor configuration.
///
/// Deserializable from JSON; unset flags default to the most conservative
/// behavior except `fail_on_error`, which defaults to on so a failing
/// mapping rolls the whole event back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Source path -> destination path field mappings. Required, non-empty.
    pub fields: HashMap<String, String>,

    /// Skip mappings whose source field is absent from the event.
    #[serde(default)]
    pub ignore_missing: bool,

    /// Trim leading whitespace from each parsed field.
    #[serde(default)]
    pub trim_leading_space: bool,

    /// Permit writing over an already-populated destination.
    #[serde(default)]
    pub overwrite_keys: bool,

    /// Abort on the first failing mapping and restore the event.
    #[serde(default = "default_fail_on_error")]
    pub fail_on_error: bool,

    /// Field separator, a single ASCII character.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Optional header specification per source field.
    #[serde(default)]
    pub headers: HashMap<String, HeaderSource>,

    /// Policy when header and record column counts differ.
    #[serde(default)]
    pub column_mismatch: ColumnMismatch,
}

fn default_fail_on_error() -> bool {
    true
}

fn default_separator() -> String {
    ",".to_string()
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
            ignore_missing: false,
            trim_leading_space: false,
            overwrite_keys: false,
            fail_on_error: default_fail_on_error(),
            separator: default_separator(),
            headers: HashMap::new(),
            column_mismatch: ColumnMismatch::default(),
        }
    }
}

/// Example configuration for documentation and the CLI.
pub fn example_config() -> DecodeConfig {
    let mut fields = HashMap::new();
    fields.insert("message".to_string(), "decoded.csv".to_string());
    fields.insert("raw.metrics".to_string(), "decoded.metrics".to_string());

    let mut headers = HashMap::new();
    headers.insert(
        "message".to_string(),
        HeaderSource::Literal {
            line: "timestamp,host,status".to_string(),
        },
    );
    headers.insert(
        "raw.metrics".to_string(),
        HeaderSource::SourceFile { offset: 1 },
    );

    DecodeConfig {
        fields,
        ignore_missing: true,
        trim_leading_space: true,
        headers,
        ..DecodeConfig::default()
    }
}
