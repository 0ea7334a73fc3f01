// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File-based configuration provider implementation.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigError;
use super::ConfigProvider;

/// Supported file formats for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON format (.json)
    Json,
    /// TOML format (.toml)
    Toml,
    /// YAML format (.yaml, .yml)
    Yaml,
}

impl FileFormat {
    /// Detect the file format from the file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| {
            let ext_str = ext.to_string_lossy().to_lowercase();
            match ext_str.as_str() {
                "json" => Some(FileFormat::Json),
                "toml" => Some(FileFormat::Toml),
                "yaml" | "yml" => Some(FileFormat::Yaml),
                _ => None,
            }
        })
    }

    /// Parse `content` into a JSON object.
    pub fn parse(self, content: &str) -> Result<Map<String, Value>, ConfigError> {
        let value = match self {
            FileFormat::Json => serde_json::from_str::<Value>(content)
                .map_err(|e| ConfigError::provider_error("file", format!("invalid JSON: {e}")))?,
            FileFormat::Toml => {
                let toml_value: toml::Value = toml::from_str(content).map_err(|e| {
                    ConfigError::provider_error("file", format!("invalid TOML: {e}"))
                })?;
                serde_json::to_value(toml_value).map_err(|e| {
                    ConfigError::provider_error("file", format!("failed to convert TOML: {e}"))
                })?
            }
            FileFormat::Yaml => {
                let yaml_value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
                    ConfigError::provider_error("file", format!("invalid YAML: {e}"))
                })?;
                serde_json::to_value(yaml_value).map_err(|e| {
                    ConfigError::provider_error("file", format!("failed to convert YAML: {e}"))
                })?
            }
        };

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ConfigError::provider_error(
                "file",
                "root configuration must be an object",
            )),
        }
    }
}

/// File-based configuration provider.
#[derive(Debug)]
pub struct FileConfigProvider {
    path: PathBuf,
    format: FileFormat,
    data: Map<String, Value>,
}

impl FileConfigProvider {
    /// Create a new file-based configuration provider.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let path_buf = PathBuf::from(path);
        let format = FileFormat::from_extension(&path_buf)
            .ok_or_else(|| ConfigError::provider_error("file", "unsupported file format"))?;

        let content = fs::read_to_string(&path_buf).map_err(|e| {
            ConfigError::provider_error("file", format!("failed to read file: {e}"))
        })?;
        let data = format.parse(&content)?;

        Ok(Self {
            path: path_buf,
            format,
            data,
        })
    }

    /// Path the configuration was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format the configuration was parsed as.
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Get a nested value from the configuration by a dot-separated key path.
    fn get_nested_value(&self, key_path: &str) -> Option<&Value> {
        let mut parts = key_path.split('.');
        let mut current = self.data.get(parts.next()?)?;

        for part in parts {
            current = current.get(part)?;
        }

        Some(current)
    }
}

impl ConfigProvider for FileConfigProvider {
    fn has(&self, key: &str) -> bool {
        self.get_nested_value(key).is_some()
    }

    fn provider_name(&self) -> &str {
        "file"
    }

    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.get_nested_value(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigProviderExt;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(FileFormat::from_extension(Path::new("a.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension(Path::new("a.TOML")), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension(Path::new("a.yml")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_extension(Path::new("a.yaml")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_extension(Path::new("a.ini")), None);
        assert_eq!(FileFormat::from_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_json_file() {
        let file = write_config(
            ".json",
            r#"{"repositories": {"default": {"level": "info", "loggers": {"app.db": "error"}}}}"#,
        );
        let provider = FileConfigProvider::new(file.path().to_str().unwrap()).unwrap();

        assert_eq!(provider.format(), FileFormat::Json);
        assert_eq!(provider.path(), file.path());
        assert!(provider.has("repositories.default.level"));
        assert!(!provider.has("repositories.audit"));

        let level: String = provider.get("repositories.default.level").unwrap().unwrap();
        assert_eq!(level, "info");
    }

    #[test]
    fn test_toml_file() {
        let file = write_config(
            ".toml",
            "[repositories.audit]\nformat = \"json\"\nlevel = \"warn\"\n",
        );
        let provider = FileConfigProvider::new(file.path().to_str().unwrap()).unwrap();

        let format: String = provider.get("repositories.audit.format").unwrap().unwrap();
        assert_eq!(format, "json");
    }

    #[test]
    fn test_yaml_file() {
        let file = write_config(
            ".yaml",
            "repositories:\n  default:\n    level: error\n    static_fields:\n      service: orders\n",
        );
        let provider = FileConfigProvider::new(file.path().to_str().unwrap()).unwrap();

        let service: String = provider
            .get("repositories.default.static_fields.service")
            .unwrap()
            .unwrap();
        assert_eq!(service, "orders");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".ini", "level=info");
        let err = FileConfigProvider::new(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("unsupported file format"));
    }

    #[test]
    fn test_missing_file() {
        let err = FileConfigProvider::new("/definitely/not/here/bridge.json").unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }

    #[test]
    fn test_invalid_content_and_non_object_root() {
        let file = write_config(".json", "{broken");
        let err = FileConfigProvider::new(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));

        let err = FileFormat::Yaml.parse("- just\n- a list\n").unwrap_err();
        assert!(err.to_string().contains("root configuration must be an object"));
    }
}
