// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Typed views over structured records.
//!
//! Each view wraps a [`crate::record::Record`] of the matching kind and
//! adds the derived queries monitoring tools ask for ("is this node
//! free", "which slots does this job hold"). Views deref to the record,
//! so generic attribute access stays available.

pub mod job;
pub mod node;
pub mod queue;
pub mod server;

pub use job::Job;
pub use node::Node;
pub use queue::Queue;
pub use server::Server;
