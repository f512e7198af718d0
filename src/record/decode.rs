// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Per-attribute decoder: picks the sub-grammar for one raw attribute and
//! merges the result into the record under assembly.

use std::collections::HashMap;

use super::parse::split_outside_parens;
use super::types::{DecodeMode, Record, Value};
use crate::transport::RawAttribute;

/// Attribute names whose values are themselves `key=value,...` lists and
/// decode into nested sub-records.
const NESTED_ATTRS: [&str; 2] = ["status", "Variable_List"];

/// Decode one raw attribute and merge it into `record`.
///
/// This is deliberately a merge, not a pure function: `status` and
/// `Variable_List` sub-tokens accumulate into nested records, and
/// resource-qualified attributes accumulate into one map per attribute
/// name, across repeated invocations for the same record. A value that
/// matches no recognized sub-grammar falls through to a plain scalar
/// list; malformed scheduler output is never rejected here.
pub(crate) fn decode_into(record: &mut Record, attr: &RawAttribute, mode: DecodeMode) {
    if mode == DecodeMode::Flat {
        // Legacy layout: one verbatim string per `name.resource` key.
        let key = match &attr.resource {
            Some(resource) => format!("{}.{}", attr.name, resource),
            None => attr.name.clone(),
        };
        record.insert(key, Value::List(vec![attr.value.clone()]));
        return;
    }

    let mut values = split_outside_parens(&attr.value, ',');
    if values.len() == 1 {
        // Keep the raw value verbatim: a lone token may still contain an
        // unmatched paren the splitter mangled.
        values = vec![attr.value.clone()];
    }

    if NESTED_ATTRS.contains(&attr.name.as_str()) {
        for token in &values {
            decode_nested_token(record, &attr.name, token);
        }
    } else if let Some(resource) = &attr.resource {
        match record.get_mut(&attr.name) {
            Some(Value::Map(map)) => {
                map.insert(resource.clone(), values);
            }
            _ => {
                let mut map = HashMap::new();
                map.insert(resource.clone(), values);
                record.insert(attr.name.clone(), Value::Map(map));
            }
        }
    } else {
        record.insert(attr.name.clone(), Value::List(values));
    }
}

/// Decode one comma-separated sub-token of a `status`/`Variable_List`
/// value.
///
/// `message=EVENT:...` payloads and bare `EVENT:...` continuations build
/// the reserved `event` sub-record; `message=<text>` lands under the
/// reserved `error` key; everything else accumulates under a sub-record
/// keyed by the owning attribute name.
fn decode_nested_token(record: &mut Record, attr_name: &str, token: &str) {
    let kind = record.kind();
    let sub = split_outside_parens(token, '=');
    let Some(sub_key) = sub.first() else {
        return;
    };

    if sub_key == "message" {
        let sub_value = sub.get(1).map(String::as_str).unwrap_or("");
        if sub_value.starts_with("EVENT:") {
            // A new `message=EVENT:` payload starts the event record over.
            let mut event = Record::new(kind, "");
            merge_event_segments(&mut event, token);
            record.insert("event", Value::Record(event));
        } else {
            record.insert("error", Value::List(sub[1..].to_vec()));
        }
    } else if sub_key.starts_with("EVENT:") {
        // Continuation without the `message=` prefix: accumulate.
        match record.get_mut("event") {
            Some(Value::Record(event)) => merge_event_segments(event, token),
            _ => {
                let mut event = Record::new(kind, "");
                merge_event_segments(&mut event, token);
                record.insert("event", Value::Record(event));
            }
        }
    } else {
        let key = sub_key.clone();
        let sub_values = sub[1..].to_vec();
        match record.get_mut(attr_name) {
            Some(Value::Record(nested)) => nested.insert(key, Value::List(sub_values)),
            _ => {
                let mut nested = Record::new(kind, "");
                nested.insert(key, Value::List(sub_values));
                record.insert(attr_name.to_string(), Value::Record(nested));
            }
        }
    }
}

/// Merge the `key=value` segments of a `[message=]EVENT:key=value[:...]`
/// token into the event record. The leading `message=EVENT`/`EVENT`
/// segment is skipped.
fn merge_event_segments(event: &mut Record, token: &str) {
    let mut segments = token.split(':');
    segments.next();
    for segment in segments {
        let mut parts = segment.split('=');
        let key = parts.next().unwrap_or_default().to_string();
        let values: Vec<String> = parts.map(str::to_string).collect();
        event.insert(key, Value::List(values));
    }
}
