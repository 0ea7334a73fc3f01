// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Severity-translating adapter.
//!
//! [`LevelTranslatingAdapter`] implements the generic [`Logger`] contract on
//! top of one backend logger handle. Six caller severities collapse onto the
//! five backend levels:
//!
//! | Severity    | Backend check      | Backend call |
//! |-------------|--------------------|--------------|
//! | Critical    | `is_fatal_enabled` | `fatal`      |
//! | Error       | `is_error_enabled` | `error`      |
//! | Warning     | `is_warn_enabled`  | `warn`       |
//! | Information | `is_info_enabled`  | `info`       |
//! | Debug       | `is_debug_enabled` | `debug`      |
//! | Trace       | `is_debug_enabled` | `debug`      |


use std::error::Error as StdError;

use crate::backend::{BackendError, BackendLogger, HierarchyLogger, LogManager, LoggerRepository};
use crate::core::{ErrorRef, EventId, LogError, Logger, ScopeGuard, Severity};

/// Adapter from the generic [`Logger`] contract to a backend logger handle.
#[derive(Debug, Clone)]
pub struct LevelTranslatingAdapter<H = HierarchyLogger> {
    handle: H,
}

impl LevelTranslatingAdapter<HierarchyLogger> {
    /// Resolve `name` in `repository` of the process-wide [`LogManager`].
    pub fn new(repository: &str, name: &str) -> Result<Self, BackendError> {
        Self::resolve(&LogManager::global(), repository, name)
    }
}

impl<H: BackendLogger> LevelTranslatingAdapter<H> {
    /// Resolve `name` in `repository` through an explicit resolver.
    ///
    /// Resolution errors are returned as the backend reported them.
    pub fn resolve<R>(resolver: &R, repository: &str, name: &str) -> Result<Self, BackendError>
    where
        R: LoggerRepository<Handle = H>,
    {
        let handle = resolver.get_logger(repository, name)?;
        Ok(Self { handle })
    }

    /// Wrap an already resolved handle.
    pub fn from_handle(handle: H) -> Self {
        Self { handle }
    }

    /// The backend handle this adapter writes to.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Enablement check for a raw severity value.
    ///
    /// Values outside the six known severities are rejected before the
    /// backend is consulted.
    pub fn is_enabled_raw(&self, level: i32) -> Result<bool, LogError> {
        let severity = Severity::try_from(level)?;
        Ok(self.is_enabled(severity))
    }

    fn dispatch(&self, severity: Severity, message: &str, error: Option<ErrorRef<'_>>) {
        match severity {
            Severity::Critical => self.handle.fatal(message, error),
            Severity::Debug | Severity::Trace => self.handle.debug(message, error),
            Severity::Error => self.handle.error(message, error),
            Severity::Information => self.handle.info(message, error),
            Severity::Warning => self.handle.warn(message, error),
        }
    }
}

impl<H: BackendLogger> Logger for LevelTranslatingAdapter<H> {
    fn name(&self) -> &str {
        self.handle.name()
    }

    fn begin_scope<S>(&self, _state: S) -> ScopeGuard {
        ScopeGuard::noop()
    }

    fn is_enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Critical => self.handle.is_fatal_enabled(),
            Severity::Debug | Severity::Trace => self.handle.is_debug_enabled(),
            Severity::Error => self.handle.is_error_enabled(),
            Severity::Information => self.handle.is_info_enabled(),
            Severity::Warning => self.handle.is_warn_enabled(),
        }
    }

    fn log<S, F>(
        &self,
        severity: Severity,
        _event_id: EventId,
        state: S,
        error: Option<ErrorRef<'_>>,
        formatter: Option<F>,
    ) -> Result<(), LogError>
    where
        F: FnOnce(&S, Option<&(dyn StdError + 'static)>) -> String,
    {
        if !self.is_enabled(severity) {
            return Ok(());
        }

        let formatter = formatter.ok_or(LogError::MissingArgument("formatter"))?;
        let message = formatter(&state, error);

        // A record with neither text nor an error carries nothing.
        if message.is_empty() && error.is_none() {
            return Ok(());
        }

        self.dispatch(severity, &message, error);
        Ok(())
    }
}
