// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layered configuration.
//!
//! A [`Config`] is built from an ordered list of [`ConfigProvider`]s; later
//! providers override earlier ones. The loader stacks them like this:
//!
//! 1. `FileConfigProvider` – `bridge.{toml,json,yaml}`
//! 2. `EnvConfigProvider`  – `SEVERITY_BRIDGE_REPOSITORIES_DEFAULT_LEVEL=warn`
//! 3. *your* provider implementing [`ConfigProvider`]
//!
//! | key | type | default | description |
//! |-----|------|---------|-------------|
//! | `repositories`                     | *map*    | `default` repository | Logger repositories by name |
//! | `repositories.<name>.format`       | `string` | `terminal` | `terminal`, `json` or `discard` |
//! | `repositories.<name>.level`        | `string` | `debug`    | Root level of the repository |
//! | `repositories.<name>.loggers`      | *map*    | –          | Levels per dotted logger name |
//! | `repositories.<name>.static_fields`| *map*    | –          | Fields attached to every record |

mod env;
pub mod error;
mod file;


pub use env::EnvConfigProvider;
pub use error::ConfigError;
pub use file::{FileConfigProvider, FileFormat};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

/// Core configuration provider trait that all configuration sources must implement.
/// This trait is object-safe since it doesn't contain generic methods.
pub trait ConfigProvider: Debug + Send + Sync {
    /// Check if the configuration provider has a value for the given key.
    fn has(&self, key: &str) -> bool;

    /// Get the name of the configuration provider for debugging purposes.
    fn provider_name(&self) -> &str;

    /// Get a raw configuration value by key.
    /// Returns a JSON Value that can be later deserialized into specific types.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError>;

    /// Flat dotted keys known to this provider.
    /// Providers storing nested documents may return nothing here.
    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Extension trait for ConfigProvider that provides methods for typed access.
/// This trait is not object-safe because it has generic methods.
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a configuration value by key and deserialize it to the specified type.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get_raw(key)? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                ConfigError::ParseError(format!("failed to deserialize '{key}': {e}"))
            }),
            None => Ok(None),
        }
    }
}

// Implement ConfigProviderExt for any type that implements ConfigProvider
impl<T: ConfigProvider> ConfigProviderExt for T {}

/// Builder for the configuration system.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration provider.
    pub fn with_provider<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Add every provider of an existing configuration, keeping their order.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.providers.extend(config.providers.iter().cloned());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        Config {
            providers: self.providers,
        }
    }
}

/// Main configuration struct that holds all providers and handles retrieving values.
#[derive(Debug, Clone)]
pub struct Config {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Get a raw configuration value.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        // Iterate through providers in reverse order to respect priority
        // Later providers (higher index) should override earlier ones
        for provider in self.providers.iter().rev() {
            if provider.has(key) {
                return provider.get_raw(key);
            }
        }
        Ok(None)
    }

    /// Get a configuration value by key.
    /// The last provider holding the key wins.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get_raw(key)? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                ConfigError::ParseError(format!("failed to deserialize '{key}': {e}"))
            }),
            None => Ok(None),
        }
    }

    /// Get a configuration value by key with a default fallback value.
    pub fn get_or_default<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, ConfigError> {
        match self.get(key)? {
            Some(value) => Ok(value),
            None => Ok(default),
        }
    }

    /// Names directly below `section` across all providers, sorted and deduplicated.
    ///
    /// Nested objects contribute their keys; flat providers contribute the
    /// segment following `section.` in each of their keys.
    pub fn section_names(&self, section: &str) -> Result<Vec<String>, ConfigError> {
        let mut names = BTreeSet::new();
        let prefix = format!("{section}.");

        for provider in &self.providers {
            if let Some(Value::Object(map)) = provider.get_raw(section)? {
                names.extend(map.keys().cloned());
            }
            for key in provider.keys() {
                if let Some(rest) = key.strip_prefix(&prefix) {
                    if let Some(name) = rest.split('.').next().filter(|n| !n.is_empty()) {
                        names.insert(name.to_string());
                    }
                }
            }
        }

        Ok(names.into_iter().collect())
    }

    /// Flat keys starting with `prefix`, across all providers, sorted and deduplicated.
    pub fn flat_keys(&self, prefix: &str) -> Vec<String> {
        let keys: BTreeSet<String> = self
            .providers
            .iter()
            .flat_map(|provider| provider.keys())
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.into_iter().collect()
    }

    /// Number of providers in this configuration.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}
