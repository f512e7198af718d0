// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! The attribute-list decoding engine.
//!
//! The scheduler serializes object status as flat lists of named string
//! attributes whose values mix several mini-grammars: comma-separated
//! lists, parenthesized sub-records that must not be split, nested
//! `key=value` structures, and compact numeric ranges. This module turns
//! those into navigable [`Record`]s.

pub mod assemble;
mod decode;
pub mod parse;
pub mod types;

pub use assemble::assemble;
pub use parse::{expand_range, is_bare_range, split_outside_parens};
pub use types::{DecodeMode, Record, RecordKind, Value};
