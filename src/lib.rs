// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Severity Bridge - a generic logging contract on top of a hierarchical, level-based backend
//!
//! Applications log against the [`Logger`] trait with six severities
//! (`Trace` through `Critical`). A [`LevelTranslatingAdapter`] maps each of
//! them onto the five levels of a named backend logger and forwards only
//! the records the backend has enabled.
//!
//! # Severity mapping
//!
//! | severity      | backend level |
//! |---------------|---------------|
//! | `Trace`       | `DEBUG`       |
//! | `Debug`       | `DEBUG`       |
//! | `Information` | `INFO`        |
//! | `Warning`     | `WARN`        |
//! | `Error`       | `ERROR`       |
//! | `Critical`    | `FATAL`       |
//!
//! # Backend
//!
//! The bundled backend is a [`LogManager`] holding named repositories. Each
//! repository is a [`Hierarchy`] of dotted logger names whose levels are
//! inherited from the closest configured ancestor, writing through `slog`.
//! Any other backend can be plugged in by implementing [`BackendLogger`] and
//! [`LoggerRepository`].
//!
//! # Configuration
//!
//! Repositories are described in configuration files (JSON, TOML, YAML) and
//! environment variables and loaded with the [`BridgeLoader`]:
//!
//! ```rust,no_run
//! use severity_bridge::{BridgeLoader, Logger, Severity};
//!
//! let bridge = BridgeLoader::new()
//!     .with_config_file("bridge.toml")
//!     .with_env_vars()
//!     .build()
//!     .unwrap();
//!
//! let logger = bridge.adapter("default", "orders.checkout").unwrap();
//! if logger.is_enabled(Severity::Information) {
//!     logger
//!         .log_message(Severity::Information, None, "checkout started")
//!         .unwrap();
//! }
//! ```

// Module declarations
pub mod adapter;
pub mod backend;
pub mod config;
pub mod core;
pub mod loader;
pub mod logging;
pub mod provider;

// Re-export key types at the crate root for convenience
pub use adapter::LevelTranslatingAdapter;
pub use backend::{
    BackendError, BackendLevel, BackendLogger, Hierarchy, HierarchyLogger,
    LogManager, LoggerRepository, DEFAULT_REPOSITORY
};
pub use config::{Config, ConfigError, ConfigProvider, ConfigProviderExt};
pub use core::{EventId, LogError, Logger, ScopeGuard, Severity, format_state};
pub use loader::{Bridge, BridgeLoader, LoaderError};
pub use logging::facade::FacadeBridge;
pub use logging::memory::MemoryDrain;
pub use provider::AdapterProvider;
