//! Record-to-object transformation.
//!
//! Pairs resolved column names with parsed values to build the decode
//! result written to the destination field. Without a header the record
//! stays an ordered sequence; with one it becomes an object whose keys
//! keep column order.

use serde_json::{Map, Value};

use crate::config::ColumnMismatch;
use crate::error::DecodeError;

/// Combine an optional header with parsed values into the decode result.
///
/// `policy` decides what happens when the column and value counts differ;
/// the default pairs up to the shorter of the two.
pub fn combine(
    field: &str,
    columns: Option<&[String]>,
    values: Vec<String>,
    policy: ColumnMismatch,
) -> Result<Value, DecodeError> {
    let Some(columns) = columns else {
        return Ok(Value::Array(
            values.into_iter().map(Value::String).collect(),
        ));
    };

    if policy == ColumnMismatch::Error && columns.len() != values.len() {
        return Err(DecodeError::ColumnMismatch {
            field: field.to_string(),
            expected: columns.len(),
            got: values.len(),
        });
    }

    let mut object = Map::with_capacity(columns.len());
    let mut values = values.into_iter();
    for column in columns {
        let value = match values.next() {
            Some(value) => value,
            None if policy == ColumnMismatch::Pad => String::new(),
            None => break,
        };
        object.insert(column.clone(), Value::String(value));
    }

    Ok(Value::Object(object))
}
