// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hierarchical logging backend.
//!
//! The adapter only ever talks to a backend through two traits:
//!
//! - [`LoggerRepository`] resolves a logger handle from a repository name and
//!   a logical logger name.
//! - [`BackendLogger`] is that handle: five enablement queries and five emit
//!   methods, one pair per backend level.
//!
//! The bundled implementation is built on `slog`. A [`LogManager`] holds named
//! [`Hierarchy`] repositories; each hierarchy resolves dotted logger names to
//! [`HierarchyLogger`] handles whose effective level is inherited from the
//! closest configured ancestor.

pub mod error;
mod hierarchy;
mod manager;


pub use error::BackendError;
pub use hierarchy::{Hierarchy, HierarchyLogger, ROOT_LOGGER_NAME, canonical_name};
pub use manager::{DEFAULT_REPOSITORY, LogManager};

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::core::ErrorRef;

/// Levels understood by the backend, least severe first.
///
/// `Off` is a threshold only; nothing is ever written at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendLevel {
    /// Debug output
    Debug,
    /// Informational output
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
    /// Fatal errors
    Fatal,
    /// Disables every level
    Off,
}

impl BackendLevel {
    /// The slog level records at this level are written with.
    pub fn slog_level(self) -> Option<slog::Level> {
        match self {
            BackendLevel::Debug => Some(slog::Level::Debug),
            BackendLevel::Info => Some(slog::Level::Info),
            BackendLevel::Warn => Some(slog::Level::Warning),
            BackendLevel::Error => Some(slog::Level::Error),
            BackendLevel::Fatal => Some(slog::Level::Critical),
            BackendLevel::Off => None,
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => BackendLevel::Debug,
            1 => BackendLevel::Info,
            2 => BackendLevel::Warn,
            3 => BackendLevel::Error,
            4 => BackendLevel::Fatal,
            _ => BackendLevel::Off,
        }
    }
}

impl fmt::Display for BackendLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendLevel::Debug => write!(f, "DEBUG"),
            BackendLevel::Info => write!(f, "INFO"),
            BackendLevel::Warn => write!(f, "WARN"),
            BackendLevel::Error => write!(f, "ERROR"),
            BackendLevel::Fatal => write!(f, "FATAL"),
            BackendLevel::Off => write!(f, "OFF"),
        }
    }
}

impl FromStr for BackendLevel {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(BackendLevel::Debug),
            "info" => Ok(BackendLevel::Info),
            "warn" | "warning" => Ok(BackendLevel::Warn),
            "error" => Ok(BackendLevel::Error),
            "fatal" | "critical" => Ok(BackendLevel::Fatal),
            "off" => Ok(BackendLevel::Off),
            _ => Err(BackendError::InvalidLevel(s.to_string())),
        }
    }
}

/// A named logger handle owned by the backend.
///
/// Handles must be safe to query and invoke from many threads at once.
pub trait BackendLogger: Send + Sync {
    /// Resolved name of this logger.
    fn name(&self) -> &str;

    /// Whether debug records are written.
    fn is_debug_enabled(&self) -> bool;
    /// Whether info records are written.
    fn is_info_enabled(&self) -> bool;
    /// Whether warn records are written.
    fn is_warn_enabled(&self) -> bool;
    /// Whether error records are written.
    fn is_error_enabled(&self) -> bool;
    /// Whether fatal records are written.
    fn is_fatal_enabled(&self) -> bool;

    /// Write a debug record.
    fn debug(&self, message: &str, error: Option<ErrorRef<'_>>);
    /// Write an info record.
    fn info(&self, message: &str, error: Option<ErrorRef<'_>>);
    /// Write a warn record.
    fn warn(&self, message: &str, error: Option<ErrorRef<'_>>);
    /// Write an error record.
    fn error(&self, message: &str, error: Option<ErrorRef<'_>>);
    /// Write a fatal record.
    fn fatal(&self, message: &str, error: Option<ErrorRef<'_>>);
}

/// Resolves backend logger handles by repository and logger name.
pub trait LoggerRepository: Send + Sync {
    /// Handle type produced by this repository.
    type Handle: BackendLogger;

    /// Resolve the logger `name` inside `repository`.
    fn get_logger(&self, repository: &str, name: &str) -> Result<Self::Handle, BackendError>;
}
