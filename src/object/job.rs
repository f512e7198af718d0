// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::ops::Deref;

use crate::error::PbsResult;
use crate::record::parse::{expand_range, is_bare_range};
use crate::record::Record;

/// Typed view over a job status record.
#[derive(Debug, Clone)]
pub struct Job {
    record: Record,
}

impl From<Record> for Job {
    fn from(record: Record) -> Self {
        Self { record }
    }
}

impl Deref for Job {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

impl Job {
    /// True iff `job_state` is `"Q"`.
    ///
    /// Historical quirk preserved from the original interface: despite the
    /// name this tests for the *queued* state. Existing consumers depend
    /// on the behavior; new code should call [`Job::is_queued`].
    pub fn is_running(&self) -> PbsResult<bool> {
        Ok(self.record.require("job_state")? == "Q")
    }

    /// True iff the job is waiting in a queue (`job_state` is `"Q"`).
    pub fn is_queued(&self) -> PbsResult<bool> {
        self.is_running()
    }

    /// The node/slot pairs this job occupies, from `exec_host`.
    ///
    /// `exec_host` looks like `gb-r10n14/5+gb-r10n14/4+...`; slot parts may
    /// be range-compacted (`node1/4,5,8-9`), in which case assembly-time
    /// comma-splitting leaves bare range tokens that are rejoined to the
    /// preceding host before expansion. With `unique` set, returns each
    /// host name once (first occurrence order) instead of host/slot pairs.
    pub fn nodes(&self, unique: bool) -> PbsResult<Vec<String>> {
        let Some(items) = self.record.get("exec_host").and_then(|v| v.as_list()) else {
            return Ok(Vec::new());
        };

        // Rejoin bare range continuations left to right, then break the
        // remaining entries on '+'.
        let mut entries: Vec<String> = Vec::new();
        for item in items {
            if is_bare_range(item) {
                match entries.last_mut() {
                    Some(last) => {
                        last.push(',');
                        last.push_str(item);
                    }
                    None => entries.push(item.clone()),
                }
            } else {
                entries.extend(item.split('+').map(str::to_string));
            }
        }

        let mut result = Vec::new();
        for entry in &entries {
            match entry.split_once('/') {
                Some((host, slots)) if !unique => {
                    for slot in expand_range(slots)? {
                        result.push(format!("{host}/{slot}"));
                    }
                }
                Some((host, _)) => {
                    if !result.iter().any(|seen| seen == host) {
                        result.push(host.to_string());
                    }
                }
                // No slot part; emit the host as-is.
                None if unique => {
                    if !result.iter().any(|seen| seen == entry) {
                        result.push(entry.clone());
                    }
                }
                None => result.push(entry.clone()),
            }
        }
        Ok(result)
    }
}
