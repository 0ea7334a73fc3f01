// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output side of the backend and the `log` facade bridge.
//!
//! - [`structured`] builds the slog root logger of each repository.
//! - [`memory`] provides an in-memory drain for inspection.
//! - [`facade`] routes the `log` crate macros through adapters.
//! - [`config`] describes repositories in configuration files.

pub mod config;
pub mod facade;
pub mod memory;
pub mod structured;


use std::sync::Arc;
use log::{LevelFilter, SetLoggerError};

use crate::backend::LoggerRepository;
use crate::provider::AdapterProvider;
use facade::FacadeBridge;

/// Install a [`FacadeBridge`] over `provider` as the global `log` logger.
///
/// Only the first installation in a process succeeds; later calls return the
/// error reported by `log`.
pub fn init<R: LoggerRepository + 'static>(
    provider: Arc<AdapterProvider<R>>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(FacadeBridge::new(provider)))?;
    log::set_max_level(level);
    log::info!(target: "severity_bridge", "Logging initialized at level: {}", level);
    Ok(())
}
