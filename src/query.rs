// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! The query facade: public entry points for server, queue, node and job
//! status.

use std::collections::HashMap;

use log::debug;

use crate::config::default_server;
use crate::error::{PbsError, PbsResult};
use crate::object::{Job, Node, Queue, Server};
use crate::record::{assemble, DecodeMode, Record, RecordKind};
use crate::transport::{AttrFilter, RawRecord, Transport};

/// Result of a single-object lookup.
///
/// The original interface returned the *whole* assembled mapping when the
/// requested name was absent, and consumers grew to depend on it. The two
/// shapes are kept but made explicit so they cannot be confused.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The requested object.
    Found(T),
    /// The name was absent; everything the fetch did return.
    FallbackAll(HashMap<String, T>),
}

impl<T> Lookup<T> {
    /// The object, when the lookup hit.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::FallbackAll(_) => None,
        }
    }

    /// The fallback mapping, when the lookup missed.
    pub fn fallback(self) -> Option<HashMap<String, T>> {
        match self {
            Lookup::Found(_) => None,
            Lookup::FallbackAll(map) => Some(map),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Status query client for one scheduler server.
///
/// Every call opens its own transport connection, fetches, disconnects and
/// assembles a fresh snapshot; nothing is cached except the job-server id
/// learned at construction time (used to normalize bare job ids).
#[derive(Debug)]
pub struct PbsQuery<T: Transport> {
    transport: T,
    server: String,
    job_server_id: String,
    mode: DecodeMode,
}

impl<T: Transport> PbsQuery<T> {
    /// Connect to the default server (see
    /// [`crate::config::default_server`]).
    pub fn new(transport: T) -> PbsResult<Self> {
        let server = default_server();
        Self::with_server(transport, server)
    }

    /// Connect to a named server.
    ///
    /// Performs one server-status fetch up front: job ids are
    /// `sequence.server_id` where the server id is the server object's own
    /// name, which is not necessarily the host connected to.
    pub fn with_server(transport: T, server: impl Into<String>) -> PbsResult<Self> {
        let server = server.into();
        let raw = {
            let mut conn = transport.connect(&server)?;
            conn.server_status(&AttrFilter::All)?
        };
        let job_server_id = raw
            .first()
            .map(|record| record.name.clone())
            .ok_or_else(|| PbsError::Connection {
                server: server.clone(),
                reason: "server returned no status record".to_string(),
            })?;
        debug!("connected to {server}, job server id {job_server_id}");

        Ok(Self {
            transport,
            server,
            job_server_id,
            mode: DecodeMode::default(),
        })
    }

    /// The server this client queries.
    pub fn server_name(&self) -> &str {
        &self.server
    }

    /// The suffix appended to bare numeric job ids.
    pub fn job_server_id(&self) -> &str {
        &self.job_server_id
    }

    pub fn decode_mode(&self) -> DecodeMode {
        self.mode
    }

    /// Select the record layout for subsequent queries. [`DecodeMode::Flat`]
    /// reproduces the legacy flat layout for consumers not yet migrated.
    pub fn set_decode_mode(&mut self, mode: DecodeMode) {
        self.mode = mode;
    }

    /// Status of the server object, keyed by server name.
    pub fn server_info(&self, filter: &AttrFilter) -> PbsResult<HashMap<String, Server>> {
        debug!("fetching server status from {}", self.server);
        let raw = {
            let mut conn = self.transport.connect(&self.server)?;
            conn.server_status(filter)?
        };
        Ok(self.build(raw, RecordKind::Server))
    }

    /// All queues, keyed by queue name.
    pub fn queues(&self, filter: &AttrFilter) -> PbsResult<HashMap<String, Queue>> {
        self.stat_queues("", filter)
    }

    /// One queue by name; soft-miss semantics (see [`Lookup`]).
    pub fn queue(&self, name: &str, filter: &AttrFilter) -> PbsResult<Lookup<Queue>> {
        Ok(lookup(self.stat_queues(name, filter)?, name))
    }

    /// All nodes, keyed by node name.
    pub fn nodes(&self, filter: &AttrFilter) -> PbsResult<HashMap<String, Node>> {
        self.stat_nodes("", filter)
    }

    /// One node by name; soft-miss semantics (see [`Lookup`]).
    pub fn node(&self, name: &str, filter: &AttrFilter) -> PbsResult<Lookup<Node>> {
        Ok(lookup(self.stat_nodes(name, filter)?, name))
    }

    /// All nodes carrying `property`, keyed by node name.
    pub fn nodes_with_property(
        &self,
        property: &str,
        filter: &AttrFilter,
    ) -> PbsResult<HashMap<String, Node>> {
        self.stat_nodes(&format!(":{property}"), filter)
    }

    /// All jobs, keyed by full job id.
    pub fn jobs(&self, filter: &AttrFilter) -> PbsResult<HashMap<String, Job>> {
        self.stat_jobs("", filter)
    }

    /// One job by id; soft-miss semantics (see [`Lookup`]).
    ///
    /// A bare sequence number (`"1234567"`) is normalized to the full form
    /// by appending the job server id learned at construction.
    pub fn job(&self, id: &str, filter: &AttrFilter) -> PbsResult<Lookup<Job>> {
        let id = if id.contains('.') {
            id.to_string()
        } else {
            format!("{id}.{}", self.job_server_id)
        };
        Ok(lookup(self.stat_jobs(&id, filter)?, &id))
    }

    fn stat_queues(&self, name: &str, filter: &AttrFilter) -> PbsResult<HashMap<String, Queue>> {
        debug!("fetching queue status {:?} from {}", name, self.server);
        let raw = {
            let mut conn = self.transport.connect(&self.server)?;
            conn.queue_status(name, filter)?
        };
        Ok(self.build(raw, RecordKind::Queue))
    }

    fn stat_nodes(&self, selector: &str, filter: &AttrFilter) -> PbsResult<HashMap<String, Node>> {
        debug!("fetching node status {:?} from {}", selector, self.server);
        let raw = {
            let mut conn = self.transport.connect(&self.server)?;
            conn.node_status(selector, filter)?
        };
        Ok(self.build(raw, RecordKind::Node))
    }

    fn stat_jobs(&self, id: &str, filter: &AttrFilter) -> PbsResult<HashMap<String, Job>> {
        debug!("fetching job status {:?} from {}", id, self.server);
        let raw = {
            let mut conn = self.transport.connect(&self.server)?;
            conn.job_status(id, filter)?
        };
        Ok(self.build(raw, RecordKind::Job))
    }

    fn build<V: From<Record>>(
        &self,
        raw: Vec<RawRecord>,
        kind: RecordKind,
    ) -> HashMap<String, V> {
        assemble(raw, kind, self.mode)
            .into_iter()
            .map(|(name, record)| (name, V::from(record)))
            .collect()
    }
}

fn lookup<V>(mut map: HashMap<String, V>, name: &str) -> Lookup<V> {
    match map.remove(name) {
        Some(value) => Lookup::Found(value),
        None => Lookup::FallbackAll(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StaticTransport;
    use crate::transport::RawAttribute;

    fn transport() -> StaticTransport {
        StaticTransport {
            server: vec![RawRecord {
                name: "master".to_string(),
                attributes: vec![RawAttribute::new("pbs_version", "6.1.3")],
            }],
            queues: vec![RawRecord {
                name: "batch".to_string(),
                attributes: vec![
                    RawAttribute::new("enabled", "True"),
                    RawAttribute::new("queue_type", "Execution"),
                ],
            }],
            jobs: vec![RawRecord {
                name: "419.master".to_string(),
                attributes: vec![RawAttribute::new("job_state", "Q")],
            }],
            ..StaticTransport::default()
        }
    }

    fn client() -> PbsQuery<StaticTransport> {
        PbsQuery::with_server(transport(), "master").unwrap()
    }

    #[test]
    fn test_learns_job_server_id() {
        let query = client();
        assert_eq!(query.job_server_id(), "master");
        assert_eq!(query.server_name(), "master");
    }

    #[test]
    fn test_job_id_normalization() {
        let query = client();
        let job = query.job("419", &AttrFilter::All).unwrap();
        assert!(job.is_found());

        // Already-qualified ids pass through untouched.
        let job = query.job("419.master", &AttrFilter::All).unwrap().found().unwrap();
        assert_eq!(job.name(), "419.master");
    }

    #[test]
    fn test_queue_soft_miss_returns_fallback() {
        let query = client();
        let miss = query.queue("nonexistent", &AttrFilter::All).unwrap();
        assert!(!miss.is_found());
        // The canned transport returns nothing for an unknown name, so the
        // fallback mapping is empty rather than an error.
        assert!(miss.fallback().unwrap().is_empty());
    }

    #[test]
    fn test_connection_error_surfaces() {
        let transport = StaticTransport {
            refuse_connections: Some("daemon down".to_string()),
            ..StaticTransport::default()
        };
        let err = PbsQuery::with_server(transport, "master").unwrap_err();
        assert!(matches!(err, PbsError::Connection { .. }));
    }

    #[test]
    fn test_empty_server_status_is_connection_error() {
        let err = PbsQuery::with_server(StaticTransport::new(), "master").unwrap_err();
        assert!(matches!(err, PbsError::Connection { .. }));
    }

    #[test]
    fn test_decode_mode_threads_through() {
        let mut query = client();
        query.set_decode_mode(DecodeMode::Flat);
        let queues = query.queues(&AttrFilter::All).unwrap();
        assert_eq!(queues["batch"].decode_mode(), DecodeMode::Flat);
    }
}
