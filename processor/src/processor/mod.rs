//! Field decode orchestration.
//!
//! [`CsvFieldsProcessor`] iterates the configured source -> destination
//! mappings for one event, driving the record parser, the header resolver
//! and the record transformation for each, and enforces the overwrite and
//! rollback policies.
//!
//! # Example
//!
//! ```
//! use decsv::{CsvFieldsProcessor, DecodeConfig, Event};
//! use serde_json::json;
//!
//! let config: DecodeConfig = serde_json::from_str(
//!     r#"{ "fields": { "message": "decoded" } }"#,
//! ).unwrap();
//! let processor = CsvFieldsProcessor::new(config).unwrap();
//!
//! let mut event = Event::from_value(json!({"message": "a,b,c"})).unwrap();
//! processor.run(&mut event).unwrap();
//!
//! assert_eq!(event.get("decoded"), Some(&json!(["a", "b", "c"])));
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::config::{DecodeConfig, HeaderSource};
use crate::error::{ConfigError, ConfigResult, DecodeError, DecodeResult};
use crate::event::Event;
use crate::header;
use crate::parser::{self, ParseOptions};
use crate::transform;

/// Applies configured CSV field decodes to events.
///
/// Construction validates the configuration once; the processor is
/// immutable afterwards, so one instance can serve many concurrent event
/// decodes without synchronization.
#[derive(Debug, Clone)]
pub struct CsvFieldsProcessor {
    config: DecodeConfig,
    separator: u8,
}

impl CsvFieldsProcessor {
    /// Validate `config` and build a processor.
    ///
    /// Fails when no field mappings are configured, when the separator is
    /// not a single ASCII character, or when a header specification is
    /// unusable (unknown source field, empty literal line, empty file
    /// path). A construction failure means the caller never gets a usable
    /// instance.
    pub fn new(config: DecodeConfig) -> ConfigResult<Self> {
        if config.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }

        let separator = separator_byte(&config.separator)?;

        for (field, spec) in &config.headers {
            if !config.fields.contains_key(field) {
                return Err(ConfigError::UnknownHeaderField(field.clone()));
            }
            match spec {
                HeaderSource::Literal { line } if line.is_empty() => {
                    return Err(ConfigError::EmptyHeaderLine(field.clone()));
                }
                HeaderSource::File { path, .. } if path.is_empty() => {
                    return Err(ConfigError::EmptyHeaderPath(field.clone()));
                }
                _ => {}
            }
        }

        Ok(Self { separator, config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            separator: self.separator,
            trim_leading_space: self.config.trim_leading_space,
        }
    }

    /// Apply every configured field decode to `event`.
    ///
    /// With `fail_on_error` set, the event is snapshot before the first
    /// mapping; the first failure restores the snapshot and aborts, so the
    /// caller always sees either a fully transformed event or its
    /// untouched original alongside the error. With it unset, failures are
    /// logged, the remaining mappings still run, and the first error comes
    /// back as a non-fatal diagnostic while the event keeps every
    /// successful mutation.
    ///
    /// Mapping iteration order is unspecified. Mappings writing to
    /// overlapping destination paths have implementation-defined outcomes
    /// and should not be relied upon.
    pub fn run(&self, event: &mut Event) -> DecodeResult<()> {
        let mut snapshot = self.config.fail_on_error.then(|| event.clone());

        let mut first_error: Option<DecodeError> = None;
        for (source, destination) in &self.config.fields {
            match self.decode_field(source, destination, event) {
                Ok(()) => {}
                Err(err) => {
                    if let Some(saved) = snapshot.take() {
                        *event = saved;
                        return Err(err);
                    }
                    warn!(field = %source, error = %err, "field decode failed, continuing");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Decode one source -> destination mapping in place.
    fn decode_field(&self, source: &str, destination: &str, event: &mut Event) -> DecodeResult<()> {
        let data = match event.get(source) {
            Some(value) => value,
            None if self.config.ignore_missing => {
                debug!(field = %source, "source field missing, skipping");
                return Ok(());
            }
            None => {
                return Err(DecodeError::MissingField {
                    field: source.to_string(),
                })
            }
        };

        let text = data
            .as_str()
            .ok_or_else(|| DecodeError::TypeMismatch {
                field: source.to_string(),
            })?
            .to_string();

        if source != destination
            && !self.config.overwrite_keys
            && event.get(destination).is_some()
        {
            return Err(DecodeError::DestinationConflict {
                field: destination.to_string(),
            });
        }

        let record = parser::parse_line(&text, self.parse_options()).map_err(|e| {
            DecodeError::Parse {
                field: source.to_string(),
                source: e,
            }
        })?;

        let decoded = match self.config.headers.get(source) {
            None => transform::combine(source, None, record, self.config.column_mismatch)?,
            Some(spec) => {
                let header_line = header::resolve(source, spec, event)?;

                // a data line identical to its own header row is the
                // header itself, tailed from line one; skip, don't ingest
                if text == header_line {
                    debug!(field = %source, "source value matches header line, skipping");
                    return Ok(());
                }

                let columns =
                    parser::parse_line(&header_line, self.parse_options()).map_err(|e| {
                        DecodeError::Parse {
                            field: source.to_string(),
                            source: e,
                        }
                    })?;
                transform::combine(source, Some(&columns), record, self.config.column_mismatch)?
            }
        };

        event
            .put(destination, decoded)
            .map_err(|e| DecodeError::Write {
                field: destination.to_string(),
                source: e,
            })?;

        Ok(())
    }
}

impl fmt::Display for CsvFieldsProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.config) {
            Ok(json) => write!(f, "decode_csv_fields={json}"),
            Err(_) => write!(f, "decode_csv_fields=<unprintable config>"),
        }
    }
}

fn separator_byte(separator: &str) -> ConfigResult<u8> {
    let mut chars = separator.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(ConfigError::Separator(separator.to_string())),
    }
}
