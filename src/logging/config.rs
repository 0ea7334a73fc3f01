// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for logger repositories.

use crate::backend::{BackendLevel, Hierarchy};
use crate::config::ConfigError;
use crate::logging::structured::{LogFormat, OutputConfig, create_logger, with_static_fields};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Configuration of one logger repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Log format (terminal, json or discard)
    #[serde(default = "default_format")]
    pub format: String,

    /// Root level
    #[serde(default = "default_level")]
    pub level: String,

    /// Levels of individual loggers, keyed by dotted logger name
    #[serde(default)]
    pub loggers: BTreeMap<String, String>,

    /// Static fields to include in all logs
    #[serde(default)]
    pub static_fields: BTreeMap<String, String>,
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_level() -> String {
    "debug".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            level: default_level(),
            loggers: BTreeMap::new(),
            static_fields: BTreeMap::new(),
        }
    }
}

fn parse_level(level: &str) -> Result<BackendLevel, ConfigError> {
    BackendLevel::from_str(level).map_err(|e| ConfigError::ParseError(e.to_string()))
}

impl RepositoryConfig {
    /// Convert to the output configuration of the root logger
    pub fn to_output_config(&self) -> Result<OutputConfig, ConfigError> {
        let format = match self.format.to_lowercase().as_str() {
            "terminal" => LogFormat::Terminal,
            "json" => LogFormat::Json,
            "discard" => LogFormat::Discard,
            other => {
                return Err(ConfigError::ParseError(format!("unknown log format '{other}'")));
            }
        };

        Ok(OutputConfig {
            format,
            static_fields: self
                .static_fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    /// Root level as a backend level
    pub fn root_level(&self) -> Result<BackendLevel, ConfigError> {
        parse_level(&self.level)
    }

    /// Build a hierarchy writing to a freshly created root logger
    pub fn build_hierarchy(&self) -> Result<Hierarchy, ConfigError> {
        let output = self.to_output_config()?;
        let root = create_logger(&OutputConfig {
            format: output.format,
            static_fields: Vec::new(),
        });
        self.build_hierarchy_with(root)
    }

    /// Build a hierarchy writing to `root`, ignoring the configured format
    pub fn build_hierarchy_with(&self, root: slog::Logger) -> Result<Hierarchy, ConfigError> {
        let output = self.to_output_config()?;
        let root = with_static_fields(root, &output.static_fields);
        let hierarchy = Hierarchy::new(root, self.root_level()?);
        for (name, level) in &self.loggers {
            hierarchy.set_level(name, parse_level(level)?);
        }
        Ok(hierarchy)
    }
}
