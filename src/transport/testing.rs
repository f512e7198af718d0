// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! In-memory transport serving canned status records.
//!
//! Public (not test-gated) so downstream consumers can test their own
//! monitoring logic without a live scheduler daemon.

use super::{AttrFilter, Connection, RawRecord, Transport};
use crate::error::{PbsError, PbsResult};

/// A transport that answers every fetch from fixed record sets.
///
/// Name lookups, the `:property` node selector, and attribute filters are
/// honored so facade behavior matches a real daemon's narrowing.
#[derive(Debug, Clone, Default)]
pub struct StaticTransport {
    pub server: Vec<RawRecord>,
    pub queues: Vec<RawRecord>,
    pub nodes: Vec<RawRecord>,
    pub jobs: Vec<RawRecord>,
    /// When set, `connect` fails with this reason.
    pub refuse_connections: Option<String>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for StaticTransport {
    fn connect(&self, server: &str) -> PbsResult<Box<dyn Connection + '_>> {
        if let Some(reason) = &self.refuse_connections {
            return Err(PbsError::Connection {
                server: server.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(Box::new(StaticConnection { transport: self }))
    }
}

struct StaticConnection<'a> {
    transport: &'a StaticTransport,
}

impl Connection for StaticConnection<'_> {
    fn server_status(&mut self, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>> {
        Ok(select(&self.transport.server, "", filter))
    }

    fn queue_status(&mut self, name: &str, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>> {
        Ok(select(&self.transport.queues, name, filter))
    }

    fn node_status(&mut self, selector: &str, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>> {
        if let Some(property) = selector.strip_prefix(':') {
            let selected = self
                .transport
                .nodes
                .iter()
                .filter(|record| has_property(record, property))
                .map(|record| narrow(record, filter))
                .collect();
            return Ok(selected);
        }
        Ok(select(&self.transport.nodes, selector, filter))
    }

    fn job_status(&mut self, id: &str, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>> {
        Ok(select(&self.transport.jobs, id, filter))
    }
}

/// All records when `name` is empty, otherwise the records matching it.
fn select(records: &[RawRecord], name: &str, filter: &AttrFilter) -> Vec<RawRecord> {
    records
        .iter()
        .filter(|record| name.is_empty() || record.name == name)
        .map(|record| narrow(record, filter))
        .collect()
}

fn narrow(record: &RawRecord, filter: &AttrFilter) -> RawRecord {
    RawRecord {
        name: record.name.clone(),
        attributes: record
            .attributes
            .iter()
            .filter(|attr| filter.admits(&attr.name))
            .cloned()
            .collect(),
    }
}

/// Torque lists node properties as a comma-separated `properties` value.
fn has_property(record: &RawRecord, property: &str) -> bool {
    record
        .attributes
        .iter()
        .filter(|attr| attr.name == "properties")
        .any(|attr| attr.value.split(',').any(|p| p.trim() == property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RawAttribute;

    fn transport() -> StaticTransport {
        StaticTransport {
            nodes: vec![
                RawRecord {
                    name: "node1".to_string(),
                    attributes: vec![
                        RawAttribute::new("state", "free"),
                        RawAttribute::new("np", "8"),
                        RawAttribute::new("properties", "infiniband,gpu"),
                    ],
                },
                RawRecord {
                    name: "node2".to_string(),
                    attributes: vec![
                        RawAttribute::new("state", "busy"),
                        RawAttribute::new("properties", "infiniband"),
                    ],
                },
            ],
            ..StaticTransport::default()
        }
    }

    #[test]
    fn test_name_lookup_and_fetch_all() {
        let transport = transport();
        let mut conn = transport.connect("master").unwrap();

        let all = conn.node_status("", &AttrFilter::All).unwrap();
        assert_eq!(all.len(), 2);

        let one = conn.node_status("node2", &AttrFilter::All).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "node2");
    }

    #[test]
    fn test_property_selector() {
        let transport = transport();
        let mut conn = transport.connect("master").unwrap();

        let gpu = conn.node_status(":gpu", &AttrFilter::All).unwrap();
        assert_eq!(gpu.len(), 1);
        assert_eq!(gpu[0].name, "node1");
    }

    #[test]
    fn test_attribute_narrowing() {
        let transport = transport();
        let mut conn = transport.connect("master").unwrap();

        let records = conn
            .node_status("node1", &AttrFilter::names(["state"]))
            .unwrap();
        assert_eq!(records[0].attributes.len(), 1);
        assert_eq!(records[0].attributes[0].name, "state");
    }

    #[test]
    fn test_refused_connection() {
        let transport = StaticTransport {
            refuse_connections: Some("daemon down".to_string()),
            ..StaticTransport::default()
        };
        let err = transport.connect("master").unwrap_err();
        assert!(matches!(err, PbsError::Connection { server, .. } if server == "master"));
    }
}
