// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Record assembly: raw status records in, structured records out.

use std::collections::HashMap;

use log::trace;

use super::decode::decode_into;
use super::types::{DecodeMode, Record, RecordKind};
use crate::transport::RawRecord;

/// Build one structured [`Record`] per raw status record, keyed by the
/// object's identifying name.
///
/// The raw buffer is consumed: dropping it when assembly completes is the
/// release signal to the transport, which handed over ownership and cannot
/// reuse it. Enumeration order of the result is unspecified; lookup is by
/// exact name.
pub fn assemble(
    raw_records: Vec<RawRecord>,
    kind: RecordKind,
    mode: DecodeMode,
) -> HashMap<String, Record> {
    let mut records = HashMap::with_capacity(raw_records.len());

    for raw in &raw_records {
        let mut record = Record::with_mode(kind, raw.name.clone(), mode);
        for attr in &raw.attributes {
            decode_into(&mut record, attr, mode);
        }
        trace!(
            "assembled {:?} record {} with {} attribute(s)",
            kind,
            raw.name,
            record.len()
        );
        records.insert(raw.name.clone(), record);
    }

    drop(raw_records);
    records
}
