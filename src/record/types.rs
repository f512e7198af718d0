// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Structured record types produced by the decoding engine.

use std::collections::hash_map;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{PbsError, PbsResult};

/// Which scheduler object class a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Server,
    Queue,
    Node,
    Job,
}

/// How the assembler lays out decoded attributes.
///
/// Replaces the original interface's process-wide data-structure flag with
/// an explicit parameter threaded through assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Full decode: comma-split lists, resource-qualified maps, nested
    /// `status`/`Variable_List` sub-records. The default.
    #[default]
    Structured,
    /// Legacy layout: one key per attribute (`name.resource` when a
    /// qualifier is present), value stored verbatim as a single-element
    /// list with no further splitting.
    Flat,
}

/// A decoded attribute value.
///
/// A scalar is always stored as a single-element `List`, so callers read
/// values through [`Record::first`] without ever branching on storage
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Ordered value list (the default case).
    List(Vec<String>),
    /// Resource-qualified map, e.g. `Resource_List` -> `{nodes: [..], walltime: [..]}`.
    Map(HashMap<String, Vec<String>>),
    /// Nested sub-record (`status`, `Variable_List`, and the derived
    /// `event` record).
    Record(Record),
}

impl Value {
    /// First element when the value is list-shaped, `None` otherwise.
    pub fn first(&self) -> Option<&str> {
        match self {
            Value::List(items) => items.first().map(String::as_str),
            _ => None,
        }
    }

    /// The value list, when list-shaped.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The qualifier map, when map-shaped.
    pub fn as_map(&self) -> Option<&HashMap<String, Vec<String>>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The nested record, when record-shaped.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// One decoded scheduler object: an identifying name plus a map from
/// attribute key to [`Value`].
///
/// Records are immutable once assembly completes; every facade call builds
/// a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    name: String,
    kind: RecordKind,
    #[serde(skip)]
    mode: DecodeMode,
    attrs: HashMap<String, Value>,
}

impl Record {
    pub(crate) fn new(kind: RecordKind, name: impl Into<String>) -> Self {
        Self::with_mode(kind, name, DecodeMode::Structured)
    }

    pub(crate) fn with_mode(
        kind: RecordKind,
        name: impl Into<String>,
        mode: DecodeMode,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            mode,
            attrs: HashMap::new(),
        }
    }

    /// The object's identifying name (node name, queue name, job id, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object class this record was assembled as.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The layout this record was assembled with.
    pub fn decode_mode(&self) -> DecodeMode {
        self.mode
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// First value for `key`, independent of whether the attribute was
    /// stored as a bare scalar or a list.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::first)
    }

    /// Like [`Record::first`] but required: absent keys are an error.
    pub fn require(&self, key: &str) -> PbsResult<&str> {
        self.first(key)
            .ok_or_else(|| PbsError::MissingAttribute(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    // Mutation is restricted to the decoding engine.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.attrs.insert(key.into(), value);
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.attrs.get_mut(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessor_invariance() {
        let mut record = Record::new(RecordKind::Node, "node1");
        record.insert("np", Value::List(vec!["2".to_string()]));
        record.insert(
            "state",
            Value::List(vec!["free".to_string(), "busy".to_string()]),
        );

        // Single-element and multi-element lists read identically.
        assert_eq!(record.first("np"), Some("2"));
        assert_eq!(record.first("state"), Some("free"));
        assert_eq!(record.first("absent"), None);
    }

    #[test]
    fn test_require_missing_attribute() {
        let record = Record::new(RecordKind::Job, "12.master");
        let err = record.require("job_state").unwrap_err();
        assert!(matches!(err, PbsError::MissingAttribute(key) if key == "job_state"));
    }

    #[test]
    fn test_record_serializes_to_json() {
        let mut record = Record::new(RecordKind::Queue, "batch");
        record.insert("enabled", Value::List(vec!["True".to_string()]));

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"name\":\"batch\""));
        assert!(json.contains("\"kind\":\"queue\""));
        assert!(json.contains("\"enabled\":[\"True\"]"));
    }

    #[test]
    fn test_value_accessors() {
        let list = Value::List(vec!["a".to_string()]);
        assert_eq!(list.first(), Some("a"));
        assert!(list.as_map().is_none());

        let mut map = HashMap::new();
        map.insert("nodes".to_string(), vec!["2:ppn=4".to_string()]);
        let map = Value::Map(map);
        assert!(map.first().is_none());
        assert_eq!(map.as_map().unwrap()["nodes"], vec!["2:ppn=4"]);
    }
}
