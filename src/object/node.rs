// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::ops::Deref;

use crate::error::PbsResult;
use crate::record::parse::{expand_range, is_bare_range};
use crate::record::{DecodeMode, Record};

/// Typed view over a node status record.
#[derive(Debug, Clone)]
pub struct Node {
    record: Record,
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Self { record }
    }
}

impl Deref for Node {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

impl Node {
    /// True iff `state` is `"free"`.
    pub fn is_free(&self) -> PbsResult<bool> {
        Ok(self.record.require("state")? == "free")
    }

    /// Whether any job occupies this node.
    pub fn has_job(&self) -> bool {
        self.record.contains_key("jobs")
    }

    /// The jobs currently running on this node, from the `jobs` attribute.
    ///
    /// Entries carry an optional compacted slot-range prefix and a job id
    /// with server suffix, e.g. `4,5,8-9/446.master`; assembly-time
    /// comma-splitting leaves bare range tokens that are rejoined right to
    /// left before the prefix/id split. With `unique` unset, returns one
    /// `slot/jobid` pair per expanded slot; with `unique` set, returns each
    /// job id once (first occurrence order). Flat-mode records hold the
    /// value as one verbatim string and go through a legacy token scan that
    /// yields bare job sequence numbers.
    pub fn jobs(&self, unique: bool) -> PbsResult<Vec<String>> {
        let Some(items) = self.record.get("jobs").and_then(|v| v.as_list()) else {
            return Ok(Vec::new());
        };

        if self.record.decode_mode() == DecodeMode::Flat {
            let raw = items.first().map(String::as_str).unwrap_or("");
            let tokens = scan_job_tokens(raw);
            if !unique {
                return Ok(tokens);
            }
            let mut seen = Vec::new();
            for token in tokens {
                if !seen.contains(&token) {
                    seen.push(token);
                }
            }
            return Ok(seen);
        }

        // Rejoin bare range continuations right to left: ["1", "3", "7-9/id"]
        // came from "1,3,7-9/id".
        let mut entries: Vec<String> = Vec::new();
        for item in items.iter().rev() {
            if is_bare_range(item) {
                match entries.last_mut() {
                    Some(last) => *last = format!("{item},{last}"),
                    None => entries.push(item.clone()),
                }
            } else {
                entries.push(item.clone());
            }
        }

        let mut result = Vec::new();
        for entry in entries.iter().rev() {
            let (prefix, job_id) = split_slot_prefix(entry);
            if unique {
                if !result.iter().any(|seen| seen == job_id) {
                    result.push(job_id.to_string());
                }
            } else if let Some(prefix) = prefix {
                for slot in expand_range(prefix)? {
                    result.push(format!("{slot}/{job_id}"));
                }
            } else {
                // No slot prefix; emit the job id as-is.
                result.push(job_id.to_string());
            }
        }
        Ok(result)
    }
}

/// Split `4,5,8-9/446.master` into its slot-range prefix and job id. The
/// prefix must consist of digits, commas and dashes and end in a digit;
/// anything else means the whole entry is the job id.
fn split_slot_prefix(entry: &str) -> (Option<&str>, &str) {
    if let Some((prefix, rest)) = entry.split_once('/') {
        let valid = prefix.ends_with(|c: char| c.is_ascii_digit())
            && prefix
                .bytes()
                .all(|b| b.is_ascii_digit() || b == b',' || b == b'-');
        if valid && !rest.is_empty() {
            return (Some(prefix), rest);
        }
    }
    (None, entry)
}

/// Legacy scan for job sequence numbers in an unsplit `jobs` string.
///
/// Matches the original interface's pattern: one character that is neither
/// a space nor a slash, a digit run, and one trailing character that is
/// neither a slash nor a dot (the digit run gives up its last digit when
/// no other trailing character fits).
fn scan_job_tokens(raw: &str) -> Vec<String> {
    let bytes = raw.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii() && bytes[i] != b' ' && bytes[i] != b'/' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > i + 1 {
                if j < bytes.len()
                    && bytes[j].is_ascii()
                    && bytes[j] != b'/'
                    && bytes[j] != b'.'
                {
                    tokens.push(raw[i..=j].to_string());
                    i = j + 1;
                    continue;
                }
                if j - i > 2 {
                    tokens.push(raw[i..j].to_string());
                    i = j;
                    continue;
                }
            }
        }
        i += 1;
    }
    tokens
}
