// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-name adapter cache bound to one repository.


use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::adapter::LevelTranslatingAdapter;
use crate::backend::{BackendError, LoggerRepository};

/// Hands out one shared adapter per logger name.
///
/// Adapters are created on first request and reused afterwards. Dropping the
/// provider, or calling [`AdapterProvider::clear`], releases the cache; adapters
/// still held by callers keep working.
pub struct AdapterProvider<R: LoggerRepository> {
    resolver: R,
    repository: String,
    adapters: RwLock<HashMap<String, Arc<LevelTranslatingAdapter<R::Handle>>>>,
}

impl<R: LoggerRepository> fmt::Debug for AdapterProvider<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterProvider")
            .field("repository", &self.repository)
            .field("cached", &self.len())
            .finish()
    }
}

impl<R: LoggerRepository> AdapterProvider<R> {
    /// Create a provider resolving loggers in `repository` through `resolver`.
    pub fn new(resolver: R, repository: &str) -> Self {
        Self {
            resolver,
            repository: repository.to_string(),
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Repository this provider resolves loggers in.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Adapter for `name`, created on first use.
    pub fn create_logger(&self, name: &str) -> Result<Arc<LevelTranslatingAdapter<R::Handle>>, BackendError> {
        if let Some(adapter) = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(adapter));
        }

        let mut adapters = self.adapters.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(adapter) = adapters.get(name) {
            return Ok(Arc::clone(adapter));
        }

        let adapter = Arc::new(LevelTranslatingAdapter::resolve(&self.resolver, &self.repository, name)?);
        adapters.insert(name.to_string(), Arc::clone(&adapter));
        Ok(adapter)
    }

    /// Number of cached adapters.
    pub fn len(&self) -> usize {
        self.adapters.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no adapter has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every cached adapter.
    pub fn clear(&self) {
        self.adapters.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
