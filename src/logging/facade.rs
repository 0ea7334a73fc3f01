// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `log` facade bridge.
//!
//! Routes `log::info!` and friends through the adapters of an
//! [`AdapterProvider`]. The record target is used as the logger name with
//! `::` turned into `.`, so module paths such as `my_app::db` land on logger
//! `my_app.db` and inherit the level configured for `my_app`.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use log::{Log, Metadata, Record};

use crate::backend::LoggerRepository;
use crate::core::{EventId, Logger, Severity};
use crate::provider::AdapterProvider;

/// Logger name used for a `log` record target.
pub fn logger_name(target: &str) -> String {
    target.replace("::", ".")
}

fn render_args(args: &&fmt::Arguments<'_>, _error: Option<&(dyn StdError + 'static)>) -> String {
    args.to_string()
}

/// [`log::Log`] implementation backed by an [`AdapterProvider`].
#[derive(Debug)]
pub struct FacadeBridge<R: LoggerRepository> {
    provider: Arc<AdapterProvider<R>>,
}

impl<R: LoggerRepository> FacadeBridge<R> {
    /// Create a bridge over `provider`.
    pub fn new(provider: Arc<AdapterProvider<R>>) -> Self {
        Self { provider }
    }

    /// The provider records are routed through.
    pub fn provider(&self) -> &Arc<AdapterProvider<R>> {
        &self.provider
    }
}

impl<R: LoggerRepository + 'static> Log for FacadeBridge<R> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.provider
            .create_logger(&logger_name(metadata.target()))
            .map(|adapter| adapter.is_enabled(Severity::from(metadata.level())))
            .unwrap_or(false)
    }

    fn log(&self, record: &Record<'_>) {
        let Ok(adapter) = self.provider.create_logger(&logger_name(record.target())) else {
            return;
        };

        adapter
            .log(
                Severity::from(record.level()),
                EventId::default(),
                record.args(),
                None,
                Some(render_args),
            )
            .ok();
    }

    fn flush(&self) {}
}
