// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core primitives – severities, event ids and the generic logging contract.
//!
//! Application code is written against [`Logger`] and [`Severity`] only.
//! Nothing in this module knows which backend eventually receives a record;
//! that translation lives in [`crate::adapter`].


use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Borrowed error object attached to a log call.
pub type ErrorRef<'a> = &'a (dyn StdError + 'static);

/// Formatter type used when a call deliberately carries no formatter.
pub type NoFormatter<S> = fn(&S, Option<&(dyn StdError + 'static)>) -> String;

/// Errors surfaced by the logging contract.
///
/// These are programming errors reported to the immediate caller; nothing
/// in the adapter recovers from them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// A raw severity value outside the recognised set.
    #[error("severity value {value} is out of range")]
    SeverityOutOfRange {
        /// The offending raw value
        value: i64,
    },

    /// A required argument was not supplied.
    #[error("argument '{0}' must not be absent")]
    MissingArgument(&'static str),

    /// A severity name that could not be parsed.
    #[error("unknown severity '{0}'")]
    UnknownSeverity(String),
}

/// Abstract log severity used by callers.
///
/// The set is closed and ordered from least to most severe. Raw numeric
/// values `0..=5` convert into it in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Very detailed diagnostic output
    Trace,
    /// Diagnostic output useful while developing
    Debug,
    /// General flow of the application
    Information,
    /// Abnormal or unexpected events that do not stop execution
    Warning,
    /// Failures of the current operation
    Error,
    /// Failures that require immediate attention
    Critical,
}

impl Severity {
    /// Every severity, least severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Information,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Raw numeric value of this severity.
    pub const fn as_i32(self) -> i32 {
        match self {
            Severity::Trace => 0,
            Severity::Debug => 1,
            Severity::Information => 2,
            Severity::Warning => 3,
            Severity::Error => 4,
            Severity::Critical => 5,
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = LogError;

    fn try_from(value: i64) -> Result<Self, LogError> {
        match value {
            0 => Ok(Severity::Trace),
            1 => Ok(Severity::Debug),
            2 => Ok(Severity::Information),
            3 => Ok(Severity::Warning),
            4 => Ok(Severity::Error),
            5 => Ok(Severity::Critical),
            _ => Err(LogError::SeverityOutOfRange { value }),
        }
    }
}

impl TryFrom<i32> for Severity {
    type Error = LogError;

    fn try_from(value: i32) -> Result<Self, LogError> {
        Severity::try_from(i64::from(value))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Trace => write!(f, "Trace"),
            Severity::Debug => write!(f, "Debug"),
            Severity::Information => write!(f, "Information"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "information" | "info" => Ok(Severity::Information),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" | "fatal" => Ok(Severity::Critical),
            _ => Err(LogError::UnknownSeverity(s.to_string())),
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Information,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

/// Identifier of a logging event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    /// Numeric identifier
    pub id: i32,
    /// Optional human readable name
    pub name: Option<String>,
}

impl EventId {
    /// Create an event id without a name.
    pub fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    /// Create an event id with a name.
    pub fn named(id: i32, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
        }
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Guard returned by [`Logger::begin_scope`].
///
/// Scopes carry no contextual data here; closing or dropping the guard has
/// no effect on later output.
#[must_use = "a scope guard ends its scope when dropped"]
#[derive(Debug, Default)]
pub struct ScopeGuard {
    _private: (),
}

impl ScopeGuard {
    /// Create a scope guard that does nothing on release.
    pub fn noop() -> Self {
        Self::default()
    }

    /// Explicitly end the scope.
    pub fn close(self) {}
}

/// Render the state through its `Display` implementation, ignoring the error.
///
/// Handy as the formatter argument of [`Logger::log`] when the state already
/// is the message.
pub fn format_state<S: fmt::Display>(state: &S, _error: Option<&(dyn StdError + 'static)>) -> String {
    state.to_string()
}

/// Generic, severity-leveled logging contract.
///
/// Callers depend on this trait only. The formatter is invoked lazily, so a
/// call at a disabled severity never pays for building its message.
pub trait Logger: Send + Sync {
    /// Name of the logical component this logger writes for.
    fn name(&self) -> &str;

    /// Begin a logical operation scope.
    fn begin_scope<S>(&self, state: S) -> ScopeGuard;

    /// Whether records at `severity` would be written.
    fn is_enabled(&self, severity: Severity) -> bool;

    /// Write a record.
    ///
    /// `formatter` renders `state` (and optionally `error`) into the message
    /// text. It is only consulted once the severity is known to be enabled.
    fn log<S, F>(
        &self,
        severity: Severity,
        event_id: EventId,
        state: S,
        error: Option<ErrorRef<'_>>,
        formatter: Option<F>,
    ) -> Result<(), LogError>
    where
        F: FnOnce(&S, Option<&(dyn StdError + 'static)>) -> String;

    /// Write a record whose state is the message itself.
    fn log_message<M: fmt::Display>(
        &self,
        severity: Severity,
        error: Option<ErrorRef<'_>>,
        message: M,
    ) -> Result<(), LogError> {
        self.log(severity, EventId::default(), message, error, Some(format_state::<M>))
    }
}
