// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of named logger repositories.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use once_cell::sync::Lazy;

use super::{BackendError, Hierarchy, HierarchyLogger, LoggerRepository};

/// Name of the repository registered when nothing else is configured.
pub const DEFAULT_REPOSITORY: &str = "default";

static GLOBAL: Lazy<Arc<LogManager>> = Lazy::new(|| Arc::new(LogManager::new()));

/// Named collection of [`Hierarchy`] repositories.
#[derive(Debug, Default)]
pub struct LogManager {
    repositories: RwLock<HashMap<String, Arc<Hierarchy>>>,
}

impl LogManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide manager.
    ///
    /// It starts out empty; repositories are registered by the loader or by
    /// calling [`LogManager::add_repository`].
    pub fn global() -> Arc<LogManager> {
        Arc::clone(&GLOBAL)
    }

    /// Register `hierarchy` under `name`.
    pub fn add_repository(&self, name: &str, hierarchy: Hierarchy) -> Result<Arc<Hierarchy>, BackendError> {
        let mut repositories = self.repositories.write().unwrap_or_else(PoisonError::into_inner);
        if repositories.contains_key(name) {
            return Err(BackendError::RepositoryExists(name.to_string()));
        }

        let hierarchy = Arc::new(hierarchy);
        repositories.insert(name.to_string(), Arc::clone(&hierarchy));
        Ok(hierarchy)
    }

    /// Register several hierarchies at once.
    ///
    /// Nothing is registered when any name is already taken or repeated.
    pub fn add_repositories(&self, hierarchies: Vec<(String, Hierarchy)>) -> Result<(), BackendError> {
        let mut repositories = self.repositories.write().unwrap_or_else(PoisonError::into_inner);
        let mut seen = HashSet::new();
        for (name, _) in &hierarchies {
            if repositories.contains_key(name) || !seen.insert(name.as_str()) {
                return Err(BackendError::RepositoryExists(name.clone()));
            }
        }

        for (name, hierarchy) in hierarchies {
            repositories.insert(name, Arc::new(hierarchy));
        }
        Ok(())
    }

    /// Look up the repository registered under `name`.
    pub fn repository(&self, name: &str) -> Result<Arc<Hierarchy>, BackendError> {
        self.repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::RepositoryNotFound(name.to_string()))
    }

    /// Whether a repository is registered under `name`.
    pub fn has_repository(&self, name: &str) -> bool {
        self.repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all registered repositories, sorted.
    pub fn repository_names(&self) -> Vec<String> {
        let repositories = self.repositories.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = repositories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl LoggerRepository for LogManager {
    type Handle = HierarchyLogger;

    fn get_logger(&self, repository: &str, name: &str) -> Result<HierarchyLogger, BackendError> {
        Ok(self.repository(repository)?.logger(name))
    }
}

impl<R: LoggerRepository> LoggerRepository for Arc<R> {
    type Handle = R::Handle;

    fn get_logger(&self, repository: &str, name: &str) -> Result<Self::Handle, BackendError> {
        (**self).get_logger(repository, name)
    }
}
