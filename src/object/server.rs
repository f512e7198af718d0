// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::ops::Deref;

use crate::record::Record;

/// Typed view over the server status record.
#[derive(Debug, Clone)]
pub struct Server {
    record: Record,
}

impl From<Record> for Server {
    fn from(record: Record) -> Self {
        Self { record }
    }
}

impl Deref for Server {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

impl Server {
    /// The daemon's `pbs_version`, when reported.
    pub fn version(&self) -> Option<&str> {
        self.record.first("pbs_version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordKind, Value};

    #[test]
    fn test_version() {
        let mut record = Record::new(RecordKind::Server, "master");
        record.insert("pbs_version", Value::List(vec!["6.1.3".to_string()]));
        let server = Server::from(record);
        assert_eq!(server.version(), Some("6.1.3"));
        assert_eq!(server.name(), "master");
    }

    #[test]
    fn test_version_absent() {
        let server = Server::from(Record::new(RecordKind::Server, "master"));
        assert_eq!(server.version(), None);
    }
}
