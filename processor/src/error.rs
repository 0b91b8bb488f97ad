//! Error types for the decsv processing pipeline.
//!
//! Two layers with different lifetimes:
//!
//! - [`ConfigError`] - construction-time validation failures. Fatal: the
//!   caller never obtains a usable processor.
//! - [`DecodeError`] - per-mapping decode failures. Recoverable at the
//!   orchestrator level; the fail-on-error policy decides whether one
//!   aborts the whole event or only its own mapping.
//!
//! [`ParseError`] and [`EventError`] are leaf errors from the record parser
//! and the event document; `From`/`#[source]` wiring lets `?` carry them
//! across layer boundaries.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while validating a [`DecodeConfig`](crate::config::DecodeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No field mappings configured.
    #[error("no fields to decode configured")]
    NoFields,

    /// Separator is not exactly one ASCII character.
    #[error("separator must be a single ASCII character, got '{0}'")]
    Separator(String),

    /// A header specification refers to a source field without a mapping.
    #[error("header configured for unknown source field '{0}'")]
    UnknownHeaderField(String),

    /// A literal header line is empty.
    #[error("empty literal header line for source field '{0}'")]
    EmptyHeaderLine(String),

    /// An external header file path is empty.
    #[error("empty header file path for source field '{0}'")]
    EmptyHeaderPath(String),
}

// =============================================================================
// Event Errors
// =============================================================================

/// Errors raised by [`Event`](crate::event::Event) operations.
#[derive(Debug, Error)]
pub enum EventError {
    /// A write ran into a path segment holding a non-object value.
    #[error("segment '{segment}' of path '{path}' holds a non-object value")]
    PathCollision { path: String, segment: String },

    /// The event document is not a JSON object.
    #[error("event is not a JSON object")]
    NotAnObject,
}

// =============================================================================
// Parse Errors
// =============================================================================

/// A CSV tokenizing failure, retaining the offending text for diagnostics.
#[derive(Debug, Error)]
#[error("{reason} (input: '{text}')")]
pub struct ParseError {
    /// The line that failed to tokenize.
    pub text: String,
    /// What went wrong.
    pub reason: String,
}

// =============================================================================
// Decode Errors
// =============================================================================

/// Errors raised while decoding a single field mapping.
///
/// Every variant names the field it applies to, so a failure surfaced by
/// [`CsvFieldsProcessor::run`](crate::processor::CsvFieldsProcessor::run)
/// identifies the offending mapping.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Source field absent and `ignore_missing` not set.
    #[error("could not fetch value for field {field}")]
    MissingField { field: String },

    /// Source field present but not a string.
    #[error("field {field} is not of string type")]
    TypeMismatch { field: String },

    /// Destination already populated and overwriting not permitted.
    #[error("target field {field} already has a value. Set the overwrite_keys flag or drop/rename the field first")]
    DestinationConflict { field: String },

    /// The CSV line could not be tokenized.
    #[error("error decoding CSV from field {field}: {source}")]
    Parse {
        field: String,
        #[source]
        source: ParseError,
    },

    /// Offset-based header resolution on an event without a source file path.
    #[error("header resolution for field {field} only works with file-sourced events, could not fetch value for field log.file.path")]
    MissingSourceFile { field: String },

    /// Header file could not be opened or read.
    #[error("could not read header file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Header file has fewer lines than the configured offset.
    #[error("header offset {offset} is past the end of '{path}'")]
    OffsetOutOfRange { path: String, offset: usize },

    /// Header and record column counts differ under the `error` policy.
    #[error("column count mismatch for field {field}: header has {expected} columns, record has {got}")]
    ColumnMismatch {
        field: String,
        expected: usize,
        got: usize,
    },

    /// Writing the decode result to the destination failed.
    #[error("failed setting field {field}: {source}")]
    Write {
        field: String,
        #[source]
        source: EventError,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for field decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_field() {
        let err = DecodeError::MissingField {
            field: "message".into(),
        };
        assert!(err.to_string().contains("message"));

        let err = DecodeError::DestinationConflict {
            field: "csv".into(),
        };
        assert!(err.to_string().contains("overwrite_keys"));
    }

    #[test]
    fn test_parse_error_keeps_offending_text() {
        let err = DecodeError::Parse {
            field: "message".into(),
            source: ParseError {
                text: "a,b,\u{fffd}".into(),
                reason: "invalid utf-8".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("message"));
        assert!(msg.contains("a,b"));
    }

    #[test]
    fn test_offset_error_carries_actual_condition() {
        let err = DecodeError::OffsetOutOfRange {
            path: "/var/log/data.csv".into(),
            offset: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("/var/log/data.csv"));
    }
}
