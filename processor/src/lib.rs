//! # decsv - CSV field decoding for structured events
//!
//! decsv enriches events flowing through a log processing pipeline: for
//! each configured field mapping it parses a raw CSV-encoded string out of
//! the source field and writes a structured result to the destination
//! field, either fully transforming the event or rolling it back to its
//! original state on the first failure.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Event    │────▶│   Parser    │────▶│   Header    │────▶│  Transform  │
//! │ (dot paths) │     │ (csv crate) │     │  Resolver   │     │ (combine)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!        ▲                                                           │
//!        └────────────────── orchestrator write / rollback ──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use decsv::{CsvFieldsProcessor, DecodeConfig, Event};
//! use serde_json::json;
//!
//! let config: DecodeConfig = serde_json::from_str(r#"{
//!     "fields": { "message": "decoded" },
//!     "headers": { "message": { "type": "literal", "line": "x,y,z" } }
//! }"#).unwrap();
//!
//! let processor = CsvFieldsProcessor::new(config).unwrap();
//! let mut event = Event::from_value(json!({"message": "1,2,3"})).unwrap();
//! processor.run(&mut event).unwrap();
//!
//! assert_eq!(event.get("decoded"), Some(&json!({"x": "1", "y": "2", "z": "3"})));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`event`] - Path-addressed event document
//! - [`config`] - Processor configuration and header specifications
//! - [`parser`] - Single-record CSV tokenizing
//! - [`header`] - Header-line resolution
//! - [`transform`] - Record-to-object transformation
//! - [`processor`] - Field decode orchestration

// Core modules
pub mod config;
pub mod error;
pub mod event;

// Decoding stages
pub mod header;
pub mod parser;
pub mod transform;

// Orchestration
pub mod processor;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, ConfigResult, DecodeError, DecodeResult, EventError, ParseError};

// =============================================================================
// Re-exports - Event
// =============================================================================

pub use event::{Event, SOURCE_FILE_PATH};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{example_config, ColumnMismatch, DecodeConfig, HeaderSource};

// =============================================================================
// Re-exports - Decoding stages
// =============================================================================

pub use parser::{parse_line, ParseOptions};
pub use transform::combine;

// =============================================================================
// Re-exports - Processor
// =============================================================================

pub use processor::CsvFieldsProcessor;
