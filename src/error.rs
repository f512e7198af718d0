// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Error types for the query library.

use thiserror::Error;

/// Result type for all query operations.
pub type PbsResult<T> = std::result::Result<T, PbsError>;

/// Errors surfaced by the query library.
///
/// Parsing itself is deliberately lenient: attribute values that match no
/// recognized sub-grammar decode as plain scalar lists instead of failing,
/// because the scheduler's attribute grammar varies across versions. The
/// variants here cover the cases that *are* hard failures.
#[derive(Debug, Clone, Error)]
pub enum PbsError {
    /// Could not establish a connection to the scheduler daemon.
    #[error("could not connect to {server}: {reason}")]
    Connection { server: String, reason: String },

    /// A transport fetch failed after the connection was established.
    #[error("transport error: {0}")]
    Transport(String),

    /// A compact range token (e.g. `7-9`) did not parse as an integer or
    /// integer pair.
    #[error("malformed range token: {0:?}")]
    MalformedRange(String),

    /// A typed view accessor needed an attribute the record does not carry.
    #[error("missing attribute: {0}")]
    MissingAttribute(String),
}
