//! Path-addressed event document.
//!
//! An [`Event`] is the structured document enriched by the processor: a
//! JSON object with dot-path read/write access (`"log.file.path"` walks
//! nested objects) and a deep-copy [`Clone`] used for rollback snapshots.
//!
//! The pipeline owns events before and after a decode; this crate only
//! reads and mutates them in place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EventError;

/// Conventional attribute carrying the originating file path of a
/// file-sourced event. Consumed only by offset-based header resolution.
pub const SOURCE_FILE_PATH: &str = "log.file.path";

/// A structured event with dot-path addressed fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Event {
    fields: Value,
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Event::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl Event {
    /// Create an empty event.
    pub fn new() -> Self {
        Self {
            fields: Value::Object(Map::new()),
        }
    }

    /// Wrap an existing JSON document. Fails if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        if value.is_object() {
            Ok(Self { fields: value })
        } else {
            Err(EventError::NotAnObject)
        }
    }

    /// Borrow the underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.fields
    }

    /// Unwrap into the underlying JSON document.
    pub fn into_value(self) -> Value {
        self.fields
    }

    /// Read the value at a dot-path.
    ///
    /// A literal key takes precedence over nested traversal at every level,
    /// so both `{"log.file.path": ...}` and `{"log": {"file": {"path": ...}}}`
    /// are addressable as `"log.file.path"`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        fn lookup<'a>(obj: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
            if let Some(value) = obj.get(path) {
                return Some(value);
            }
            let (head, rest) = path.split_once('.')?;
            lookup(obj.get(head)?.as_object()?, rest)
        }
        lookup(self.fields.as_object()?, path)
    }

    /// Write `value` at a dot-path, creating intermediate objects as needed.
    ///
    /// Returns the previous value at the path, if any. A literal key match
    /// at the top level is overwritten in place; otherwise the path is
    /// traversed segment by segment. Fails with
    /// [`EventError::PathCollision`] when a segment already holds a
    /// non-object value.
    pub fn put(&mut self, path: &str, value: Value) -> Result<Option<Value>, EventError> {
        let root = match self.fields.as_object_mut() {
            Some(obj) => obj,
            None => return Err(EventError::NotAnObject),
        };

        if root.contains_key(path) {
            return Ok(root.insert(path.to_string(), value));
        }

        let segments: Vec<&str> = path.split('.').collect();
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return Err(EventError::NotAnObject),
        };

        let mut current = root;
        for segment in parents {
            let child = current
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = match child.as_object_mut() {
                Some(obj) => obj,
                None => {
                    return Err(EventError::PathCollision {
                        path: path.to_string(),
                        segment: (*segment).to_string(),
                    })
                }
            };
        }

        Ok(current.insert((*last).to_string(), value))
    }

    /// The originating file path for file-sourced events.
    pub fn source_file_path(&self) -> Option<&str> {
        self.get(SOURCE_FILE_PATH).and_then(Value::as_str)
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested_path() {
        let event = Event::from_value(json!({
            "log": { "file": { "path": "/var/log/data.csv" } }
        }))
        .unwrap();

        assert_eq!(
            event.get("log.file.path"),
            Some(&json!("/var/log/data.csv"))
        );
        assert_eq!(event.source_file_path(), Some("/var/log/data.csv"));
        assert!(event.get("log.file.missing").is_none());
    }

    #[test]
    fn test_get_prefers_literal_key() {
        let event = Event::from_value(json!({
            "log.file.path": "/flat.csv",
            "log": { "file": { "path": "/nested.csv" } }
        }))
        .unwrap();

        assert_eq!(event.source_file_path(), Some("/flat.csv"));
    }

    #[test]
    fn test_put_creates_intermediate_objects() {
        let mut event = Event::new();
        let previous = event.put("decoded.csv", json!(["a", "b"])).unwrap();

        assert!(previous.is_none());
        assert_eq!(event.get("decoded.csv"), Some(&json!(["a", "b"])));
        assert!(event.get("decoded").unwrap().is_object());
    }

    #[test]
    fn test_put_returns_previous_value() {
        let mut event = Event::from_value(json!({"message": "old"})).unwrap();
        let previous = event.put("message", json!("new")).unwrap();

        assert_eq!(previous, Some(json!("old")));
        assert_eq!(event.get("message"), Some(&json!("new")));
    }

    #[test]
    fn test_put_rejects_path_through_scalar() {
        let mut event = Event::from_value(json!({"message": "text"})).unwrap();
        let err = event.put("message.decoded", json!("x")).unwrap_err();

        assert!(matches!(err, EventError::PathCollision { .. }));
        // the event is untouched on failure
        assert_eq!(event.get("message"), Some(&json!("text")));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(Event::from_value(json!("scalar")).is_err());
        assert!(Event::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut event = Event::from_value(json!({"a": {"b": "1"}})).unwrap();
        let snapshot = event.clone();

        event.put("a.b", json!("2")).unwrap();
        event.put("c", json!("3")).unwrap();

        assert_eq!(snapshot.get("a.b"), Some(&json!("1")));
        assert!(snapshot.get("c").is_none());
    }

    #[test]
    fn test_serde_transparent_roundtrip() {
        let event = Event::from_value(json!({"message": "1,2,3"})).unwrap();
        let text = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&text).unwrap();

        assert_eq!(back, event);
        assert_eq!(text, r#"{"message":"1,2,3"}"#);
    }
}
