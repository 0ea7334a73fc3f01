// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the backend module.

use thiserror::Error;

/// Errors raised by the hierarchical backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No repository is registered under the requested name.
    #[error("logger repository '{0}' does not exist")]
    RepositoryNotFound(String),

    /// A repository with this name is already registered.
    #[error("logger repository '{0}' already exists")]
    RepositoryExists(String),

    /// A level name that the backend does not know.
    #[error("invalid backend level '{0}'")]
    InvalidLevel(String),
}
