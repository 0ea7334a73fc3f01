// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common test utilities for severity-bridge integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use severity_bridge::{BackendLevel, Hierarchy, LogManager, MemoryDrain};
use slog::o;
use tempfile::NamedTempFile;

/// Manager with one repository writing to a fresh in-memory drain.
pub fn manager_with_repository(
    repository: &str,
    root_level: BackendLevel,
) -> (Arc<LogManager>, Arc<Hierarchy>, MemoryDrain) {
    let drain = MemoryDrain::new();
    let manager = Arc::new(LogManager::new());
    let hierarchy = manager
        .add_repository(
            repository,
            Hierarchy::new(slog::Logger::root(drain.clone(), o!()), root_level),
        )
        .expect("fresh manager accepts the repository");
    (manager, hierarchy, drain)
}

/// Root logger writing to a fresh in-memory drain.
pub fn memory_root() -> (slog::Logger, MemoryDrain) {
    let drain = MemoryDrain::new();
    (slog::Logger::root(drain.clone(), o!()), drain)
}

/// Write `content` to a temporary file with the given suffix.
pub fn config_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temporary file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

/// Error with a single cause, for checking rendered error chains.
#[derive(Debug)]
pub struct WrappedError {
    pub message: &'static str,
    pub cause: std::io::Error,
}

impl std::fmt::Display for WrappedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for WrappedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
