//! Header-line resolution.
//!
//! Produces the literal header line for one decoded source field. Three
//! tiers, fixed priority: a literal line from configuration, then an
//! external header file, then the file the event itself was harvested
//! from. The resolved line is returned untokenized; the caller re-parses
//! it with the same dialect options as the data line, so header and data
//! tokenization always agree.

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::config::HeaderSource;
use crate::error::DecodeError;
use crate::event::Event;

/// Resolve the header line for `field` according to `spec`.
///
/// Only the `source_file` tier consults the event: it requires the
/// conventional `log.file.path` attribute and fails with
/// [`DecodeError::MissingSourceFile`] on events that were not read from a
/// file.
pub fn resolve(field: &str, spec: &HeaderSource, event: &Event) -> Result<String, DecodeError> {
    match spec {
        HeaderSource::Literal { line } => Ok(line.clone()),
        HeaderSource::File { path, .. } => read_line_at(path, spec.offset()),
        HeaderSource::SourceFile { .. } => {
            let path = event
                .source_file_path()
                .ok_or_else(|| DecodeError::MissingSourceFile {
                    field: field.to_string(),
                })?;
            read_line_at(path, spec.offset())
        }
    }
}

/// Read the 1-based line `offset` of the file at `path`.
///
/// The file is opened, scanned from the start and closed on every call;
/// nothing is cached between decodes.
fn read_line_at(path: &str, offset: usize) -> Result<String, DecodeError> {
    let file = File::open(path).map_err(|e| DecodeError::FileOpen {
        path: path.to_string(),
        source: e,
    })?;

    let mut remaining = offset;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| DecodeError::FileOpen {
            path: path.to_string(),
            source: e,
        })?;
        remaining -= 1;
        if remaining == 0 {
            return Ok(line);
        }
    }

    Err(DecodeError::OffsetOutOfRange {
        path: path.to_string(),
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn header_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn file_event(path: &str) -> Event {
        Event::from_value(json!({ "log": { "file": { "path": path } } })).unwrap()
    }

    #[test]
    fn test_literal_wins_without_any_file() {
        let spec = HeaderSource::Literal {
            line: "x,y,z".into(),
        };
        // no source file attribute, no file on disk: the literal tier
        // must not look for either
        let line = resolve("message", &spec, &Event::new()).unwrap();
        assert_eq!(line, "x,y,z");
    }

    #[test]
    fn test_external_file_first_line_by_default() {
        let file = header_file("id,name\n7,bob\n");
        let spec = HeaderSource::File {
            path: file.path().to_string_lossy().into_owned(),
            offset: 0,
        };

        let line = resolve("message", &spec, &Event::new()).unwrap();
        assert_eq!(line, "id,name");
    }

    #[test]
    fn test_external_file_offset_line() {
        let file = header_file("# comment\nid,name\n7,bob\n");
        let spec = HeaderSource::File {
            path: file.path().to_string_lossy().into_owned(),
            offset: 2,
        };

        let line = resolve("message", &spec, &Event::new()).unwrap();
        assert_eq!(line, "id,name");
    }

    #[test]
    fn test_offset_past_end_of_file() {
        let file = header_file("only,line\n");
        let spec = HeaderSource::File {
            path: file.path().to_string_lossy().into_owned(),
            offset: 2,
        };

        let err = resolve("message", &spec, &Event::new()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OffsetOutOfRange { offset: 2, .. }
        ));
    }

    #[test]
    fn test_source_file_tier_uses_event_path() {
        let file = header_file("ts,level,msg\n");
        let event = file_event(&file.path().to_string_lossy());
        let spec = HeaderSource::SourceFile { offset: 0 };

        let line = resolve("message", &spec, &event).unwrap();
        assert_eq!(line, "ts,level,msg");
    }

    #[test]
    fn test_source_file_tier_requires_file_backed_event() {
        let spec = HeaderSource::SourceFile { offset: 1 };
        let err = resolve("message", &spec, &Event::new()).unwrap_err();

        assert!(matches!(err, DecodeError::MissingSourceFile { field } if field == "message"));
    }

    #[test]
    fn test_unopenable_path() {
        let spec = HeaderSource::File {
            path: "/nonexistent/header.csv".into(),
            offset: 1,
        };
        let err = resolve("message", &spec, &Event::new()).unwrap_err();

        assert!(matches!(err, DecodeError::FileOpen { .. }));
    }
}
