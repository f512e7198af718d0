// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! The scheduler transport seam.
//!
//! Connection handling and the native RPC calls live behind the
//! [`Transport`] and [`Connection`] traits so the decoding engine and the
//! query facade can be exercised against canned data (see
//! [`testing::StaticTransport`]) as well as a real daemon binding.

pub mod testing;

use crate::error::PbsResult;

/// One raw attribute as the scheduler serializes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Attribute name, e.g. `state` or `Resource_List`.
    pub name: String,
    /// Resource qualifier for resource-indexed attributes, e.g. the
    /// `nodes` in `Resource_List.nodes`.
    pub resource: Option<String>,
    /// Scheduler-native serialized value.
    pub value: String,
}

impl RawAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource: None,
            value: value.into(),
        }
    }

    pub fn with_resource(
        name: impl Into<String>,
        resource: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource: Some(resource.into()),
            value: value.into(),
        }
    }
}

/// One raw status record: an identifying name plus its attributes, in the
/// order the scheduler reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub attributes: Vec<RawAttribute>,
}

/// Which attributes a status fetch should request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttrFilter {
    /// Fetch every attribute the scheduler reports.
    #[default]
    All,
    /// Request only the named attributes.
    Names(Vec<String>),
}

impl AttrFilter {
    /// Build a name filter. Qualified names like `Resource_List.nodes`
    /// are trimmed to the attribute part, matching what the native
    /// attribute-list builder accepts.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrFilter::Names(
            names
                .into_iter()
                .map(|name| {
                    let name = name.into();
                    match name.split_once('.') {
                        Some((attr, _)) => attr.to_string(),
                        None => name,
                    }
                })
                .collect(),
        )
    }

    /// Whether an attribute named `name` passes the filter.
    pub fn admits(&self, name: &str) -> bool {
        match self {
            AttrFilter::All => true,
            AttrFilter::Names(names) => names.iter().any(|n| n == name),
        }
    }
}

/// Factory for scheduler connections.
///
/// Every facade call opens its own connection and drops it when the fetch
/// completes; connections are never pooled or shared between callers.
pub trait Transport {
    /// Connect to the scheduler daemon on `server`. Fails with
    /// [`crate::PbsError::Connection`] when the daemon is unreachable.
    fn connect(&self, server: &str) -> PbsResult<Box<dyn Connection + '_>>;
}

/// One live scheduler connection. Dropping it disconnects.
///
/// Each fetch either returns the full raw record sequence for the selected
/// objects or fails; timeout and retry policy belong to the implementor,
/// not to the callers.
pub trait Connection {
    /// Status of the server object itself.
    fn server_status(&mut self, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>>;

    /// Status of one queue, or of all queues when `name` is empty.
    fn queue_status(&mut self, name: &str, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>>;

    /// Status of nodes matching `selector`: a node name, `:property` for
    /// all nodes carrying a property, or empty for all nodes.
    fn node_status(&mut self, selector: &str, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>>;

    /// Status of one job, or of all jobs when `id` is empty.
    fn job_status(&mut self, id: &str, filter: &AttrFilter) -> PbsResult<Vec<RawRecord>>;
}

impl std::fmt::Debug for dyn Connection + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Connection")
    }
}
