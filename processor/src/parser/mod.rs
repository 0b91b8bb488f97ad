//! Single-record CSV tokenizing.
//!
//! Thin wrapper around the `csv` crate, configured for one record per
//! field value. Header lines and data lines go through the same entry
//! point so both are tokenized with identical dialect options.

use crate::error::ParseError;

/// Dialect options shared by data lines and header lines.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Trim leading whitespace from each field.
    pub trim_leading_space: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            trim_leading_space: false,
        }
    }
}

/// Tokenize a single CSV line into its ordered field values.
///
/// Only the first record is taken: multi-line input yields the first
/// line's fields and trailing lines are ignored. Quoting is lenient, so
/// stray or unterminated quotes come through as literal text instead of
/// aborting the parse. Empty input is a [`ParseError`].
pub fn parse_line(line: &str, options: ParseOptions) -> Result<Vec<String>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.separator)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    let got = reader.read_record(&mut record).map_err(|e| ParseError {
        text: line.to_string(),
        reason: e.to_string(),
    })?;
    if !got {
        return Err(ParseError {
            text: line.to_string(),
            reason: "empty input".to_string(),
        });
    }

    let fields = record
        .iter()
        .map(|field| {
            if options.trim_leading_space {
                field.trim_start().to_string()
            } else {
                field.to_string()
            }
        })
        .collect();

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(separator: u8) -> ParseOptions {
        ParseOptions {
            separator,
            trim_leading_space: false,
        }
    }

    #[test]
    fn test_simple_line() {
        let fields = parse_line("a,b,c", opts(b',')).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_custom_separators() {
        assert_eq!(
            parse_line("1;2;3", opts(b';')).unwrap(),
            vec!["1", "2", "3"]
        );
        assert_eq!(
            parse_line("x\ty\tz", opts(b'\t')).unwrap(),
            vec!["x", "y", "z"]
        );
        assert_eq!(
            parse_line("p|q", opts(b'|')).unwrap(),
            vec!["p", "q"]
        );
    }

    #[test]
    fn test_quoted_field_keeps_separator() {
        let fields = parse_line(r#""Smith, John",42"#, opts(b',')).unwrap();
        assert_eq!(fields, vec!["Smith, John", "42"]);
    }

    #[test]
    fn test_rfc4180_doubled_quotes() {
        let fields = parse_line(r#""say ""hi""",x"#, opts(b',')).unwrap();
        assert_eq!(fields, vec![r#"say "hi""#, "x"]);
    }

    #[test]
    fn test_lenient_stray_quote() {
        // a quote in the middle of an unquoted field is literal text
        let fields = parse_line(r#"a"b,c"#, opts(b',')).unwrap();
        assert_eq!(fields, vec![r#"a"b"#, "c"]);
    }

    #[test]
    fn test_lenient_unterminated_quote() {
        let fields = parse_line(r#""unterminated,x"#, opts(b',')).unwrap();
        assert_eq!(fields, vec!["unterminated,x"]);
    }

    #[test]
    fn test_multiline_takes_first_record() {
        let fields = parse_line("a,b\nc,d\ne,f", opts(b',')).unwrap();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input_is_error() {
        let err = parse_line("", opts(b',')).unwrap_err();
        assert!(err.reason.contains("empty"));
        assert_eq!(err.text, "");
    }

    #[test]
    fn test_trim_leading_space_only() {
        let options = ParseOptions {
            separator: b',',
            trim_leading_space: true,
        };
        let fields = parse_line("a, b ,  c", options).unwrap();
        // leading space goes, trailing space stays
        assert_eq!(fields, vec!["a", "b ", "c"]);
    }

    #[test]
    fn test_no_trim_by_default() {
        let fields = parse_line("a, b , c", opts(b',')).unwrap();
        assert_eq!(fields, vec!["a", " b ", " c"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        let fields = parse_line("a,,c,", opts(b',')).unwrap();
        assert_eq!(fields, vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_round_trip_without_special_characters() {
        for (line, separator) in [("a,b,c", b','), ("1;2;3", b';'), ("x|y", b'|')] {
            let fields = parse_line(line, opts(separator)).unwrap();
            assert_eq!(fields.join(&(separator as char).to_string()), line);
        }
    }

    #[test]
    fn test_unicode_values() {
        let fields = parse_line("naïve,über,こんにちは", opts(b',')).unwrap();
        assert_eq!(fields, vec!["naïve", "über", "こんにちは"]);
    }
}
