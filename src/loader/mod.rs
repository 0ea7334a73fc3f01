// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level entry-point.
//!
//! The [`BridgeLoader`] consumes configuration, builds one [`Hierarchy`] per
//! configured repository, registers them with a [`LogManager`] and returns a
//! [`Bridge`] handing out adapters and providers.
//!
//! [`Hierarchy`]: crate::backend::Hierarchy


use std::sync::Arc;
use log::LevelFilter;
use thiserror::Error;

use crate::adapter::LevelTranslatingAdapter;
use crate::backend::{BackendError, DEFAULT_REPOSITORY, LogManager};
use crate::config::{Config, ConfigError, EnvConfigProvider, FileConfigProvider};
use crate::logging::config::RepositoryConfig;
use crate::provider::AdapterProvider;

/// Configuration section holding the repositories.
const REPOSITORIES_SECTION: &str = "repositories";

/// Errors that can occur while loading the bridge.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Backend error
    #[error("backend error: {0}")]
    BackendError(#[from] BackendError),

    /// The global `log` logger was already installed
    #[error("failed to install log facade: {0}")]
    FacadeError(#[from] log::SetLoggerError),
}

/// Builder for loading repositories from configuration.
#[derive(Debug, Default)]
pub struct BridgeLoader {
    config: Option<Config>,
    config_file_path: Option<String>,
    use_env_vars: bool,
    env_prefix: Option<String>,
    manager: Option<Arc<LogManager>>,
    root_logger: Option<slog::Logger>,
}

impl BridgeLoader {
    /// Create a new loader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a base configuration; file and environment providers layer on top.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a configuration file to load.
    pub fn with_config_file(mut self, file_path: &str) -> Self {
        self.config_file_path = Some(file_path.to_string());
        self
    }

    /// Enable environment variable configuration.
    pub fn with_env_vars(mut self) -> Self {
        self.use_env_vars = true;
        self
    }

    /// Set a custom prefix for environment variables (default is "SEVERITY_BRIDGE_").
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.use_env_vars = true;
        self
    }

    /// Register repositories with `manager` instead of the process-wide one.
    pub fn with_manager(mut self, manager: Arc<LogManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Write every repository to `root` instead of its configured format.
    pub fn with_root_logger(mut self, root: slog::Logger) -> Self {
        self.root_logger = Some(root);
        self
    }

    /// Load the configuration and register every repository.
    pub fn build(self) -> Result<Bridge, LoaderError> {
        let mut builder = Config::builder();
        if let Some(config) = &self.config {
            builder = builder.with_config(config);
        }
        if let Some(path) = &self.config_file_path {
            builder = builder.with_provider(FileConfigProvider::new(path)?);
        }
        if self.use_env_vars {
            let provider = match &self.env_prefix {
                Some(prefix) => EnvConfigProvider::new(prefix),
                None => EnvConfigProvider::default(),
            };
            log::debug!("Reading environment overrides with prefix {}", provider.prefix());
            builder = builder.with_provider(provider);
        }
        let config = builder.build();

        let mut repositories = config.section_names(REPOSITORIES_SECTION)?;
        if repositories.is_empty() {
            repositories.push(DEFAULT_REPOSITORY.to_string());
        }

        let mut hierarchies = Vec::with_capacity(repositories.len());
        let mut summaries = Vec::with_capacity(repositories.len());
        for name in &repositories {
            let repository = load_repository(&config, name)?;
            let hierarchy = match &self.root_logger {
                Some(root) => repository.build_hierarchy_with(root.clone())?,
                None => repository.build_hierarchy()?,
            };
            hierarchies.push((name.clone(), hierarchy));
            summaries.push((name, repository.format, repository.level));
        }

        let manager = self.manager.unwrap_or_else(LogManager::global);
        manager.add_repositories(hierarchies)?;
        for (name, format, level) in summaries {
            log::info!(
                "Registered logger repository '{}' ({}, root level {})",
                name,
                format,
                level
            );
        }

        Ok(Bridge {
            manager,
            config,
            repositories,
        })
    }
}

/// Resolve the configuration of repository `name`, applying flat overrides.
pub fn load_repository(config: &Config, name: &str) -> Result<RepositoryConfig, ConfigError> {
    let section = format!("{REPOSITORIES_SECTION}.{name}");
    let mut repository: RepositoryConfig = config.get(&section)?.unwrap_or_default();

    if let Some(level) = config.get::<String>(&format!("{section}.level"))? {
        repository.level = level;
    }
    if let Some(format) = config.get::<String>(&format!("{section}.format"))? {
        repository.format = format;
    }

    let loggers_prefix = format!("{section}.loggers.");
    for key in config.flat_keys(&loggers_prefix) {
        if let Some(level) = config.get::<String>(&key)? {
            repository
                .loggers
                .insert(key[loggers_prefix.len()..].to_string(), level);
        }
    }

    Ok(repository)
}

/// Loaded repositories and the manager they are registered with.
#[derive(Debug)]
pub struct Bridge {
    manager: Arc<LogManager>,
    config: Config,
    repositories: Vec<String>,
}

impl Bridge {
    /// Create a loader.
    pub fn loader() -> BridgeLoader {
        BridgeLoader::new()
    }

    /// Manager holding the loaded repositories.
    pub fn manager(&self) -> &Arc<LogManager> {
        &self.manager
    }

    /// Configuration the bridge was loaded from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Names of the loaded repositories, sorted.
    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    /// Adapter for logger `name` in `repository`.
    pub fn adapter(&self, repository: &str, name: &str) -> Result<LevelTranslatingAdapter, BackendError> {
        LevelTranslatingAdapter::resolve(&self.manager, repository, name)
    }

    /// Adapter provider bound to `repository`.
    pub fn provider(&self, repository: &str) -> Result<Arc<AdapterProvider<Arc<LogManager>>>, LoaderError> {
        if !self.manager.has_repository(repository) {
            return Err(BackendError::RepositoryNotFound(repository.to_string()).into());
        }
        Ok(Arc::new(AdapterProvider::new(Arc::clone(&self.manager), repository)))
    }

    /// Route the `log` crate macros through `repository`.
    pub fn install_facade(
        &self,
        repository: &str,
        level: LevelFilter,
    ) -> Result<Arc<AdapterProvider<Arc<LogManager>>>, LoaderError> {
        let provider = self.provider(repository)?;
        crate::logging::init(Arc::clone(&provider), level)?;
        Ok(provider)
    }
}
