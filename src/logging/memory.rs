// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory slog drain.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use slog::{Drain, KV, Never, OwnedKVList, Record};

/// A record captured by [`MemoryDrain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// slog level the record was written at
    pub level: slog::Level,
    /// Rendered message
    pub message: String,
    /// Key/value pairs of the record and its logger, rendered as strings
    pub fields: Vec<(String, String)>,
}

impl CapturedRecord {
    /// Value of the first field named `key`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct FieldCollector<'a>(&'a mut Vec<(String, String)>);

impl slog::Serializer for FieldCollector<'_> {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments<'_>) -> slog::Result {
        self.0.push((key.to_string(), val.to_string()));
        Ok(())
    }
}

/// Drain keeping every record in memory.
///
/// Clones share the same buffer, so one clone can be handed to a logger and
/// another kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryDrain {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl MemoryDrain {
    /// Create an empty drain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured records, oldest first.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all captured records.
    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Drain for MemoryDrain {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<(), Never> {
        let mut fields = Vec::new();
        record.kv().serialize(record, &mut FieldCollector(&mut fields)).ok();
        values.serialize(record, &mut FieldCollector(&mut fields)).ok();

        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedRecord {
                level: record.level(),
                message: record.msg().to_string(),
                fields,
            });
        Ok(())
    }
}
