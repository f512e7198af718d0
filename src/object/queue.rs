// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::ops::Deref;

use crate::error::PbsResult;
use crate::record::Record;

/// Typed view over a queue status record.
#[derive(Debug, Clone)]
pub struct Queue {
    record: Record,
}

impl From<Record> for Queue {
    fn from(record: Record) -> Self {
        Self { record }
    }
}

impl Deref for Queue {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

impl Queue {
    /// True iff the queue accepts new jobs (`enabled` is `"True"`).
    pub fn is_enabled(&self) -> PbsResult<bool> {
        Ok(self.record.require("enabled")? == "True")
    }

    /// True iff this is an execution queue rather than a routing queue.
    pub fn is_execution(&self) -> PbsResult<bool> {
        Ok(self.record.require("queue_type")? == "Execution")
    }
}
