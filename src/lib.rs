// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Client-side status query library for PBS/Torque batch schedulers.
//!
//! [`PbsQuery`] drives a [`transport::Transport`] implementation to fetch
//! raw attribute lists for the four scheduler object classes (server,
//! queue, node, job), decodes the scheduler's irregular wire format into
//! structured [`record::Record`]s, and wraps them in typed views with
//! derived queries. Consumers are monitoring tools, dashboards and scripts
//! that need live cluster state without speaking the native RPC protocol.
//!
//! ```
//! use pbsquery::transport::testing::StaticTransport;
//! use pbsquery::transport::{RawAttribute, RawRecord};
//! use pbsquery::{AttrFilter, PbsQuery};
//!
//! // A canned transport stands in for the native daemon binding here;
//! // production code injects a real one.
//! let transport = StaticTransport {
//!     server: vec![RawRecord {
//!         name: "master".to_string(),
//!         attributes: vec![RawAttribute::new("pbs_version", "6.1.3")],
//!     }],
//!     nodes: vec![RawRecord {
//!         name: "node24".to_string(),
//!         attributes: vec![
//!             RawAttribute::new("state", "free"),
//!             RawAttribute::new("np", "24"),
//!         ],
//!     }],
//!     ..StaticTransport::default()
//! };
//!
//! let query = PbsQuery::with_server(transport, "master")?;
//! for (name, node) in query.nodes(&AttrFilter::names(["state", "np"]))? {
//!     if node.is_free()? {
//!         println!("{name}: {:?} cores free", node.first("np"));
//!     }
//! }
//! # Ok::<(), pbsquery::PbsError>(())
//! ```

pub mod config;
pub mod error;
pub mod object;
pub mod query;
pub mod record;
pub mod transport;

pub use error::{PbsError, PbsResult};
pub use object::{Job, Node, Queue, Server};
pub use query::{Lookup, PbsQuery};
pub use record::{DecodeMode, Record, RecordKind, Value};
pub use transport::AttrFilter;
