//! Configuration management for panadata.
//!
//! A config file (TOML, YAML, or JSON) describes where raw files live and
//! where interim tables go. Every field is optional; unset fields keep the
//! `Settings` defaults.

mod loader;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use loader::{find_config, load_settings_with_options, LoadOptions};
pub use settings::{
    Settings, DEFAULT_CATEGORIES, DEFAULT_CSV_SEPARATOR, DEFAULT_INTERIM_DIR, DEFAULT_RAW_DIR,
};

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Raw input directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_dir: Option<String>,
    /// Interim output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interim_dir: Option<String>,
    /// Categories to process, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Separator between `column: value` pairs of a CSV row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_separator: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a specific file path.
    /// The format is chosen by extension; anything unrecognized is read as JSON.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_err("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_err("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_err("JSON", e.to_string()))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory of the config file, used to resolve relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are joined onto `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref raw_dir) = self.raw_dir {
            settings.raw_dir = self.resolve_path(raw_dir, base_dir);
        }
        if let Some(ref interim_dir) = self.interim_dir {
            settings.interim_dir = self.resolve_path(interim_dir, base_dir);
        }
        if let Some(ref categories) = self.categories {
            let categories: Vec<String> = categories
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            if categories.is_empty() {
                tracing::warn!("Config lists no categories, keeping defaults");
            } else {
                settings.categories = categories;
            }
        }
        if let Some(ref separator) = self.csv_separator {
            settings.csv_separator = separator.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_relative_dirs_resolve_against_base() {
        let config = Config {
            raw_dir: Some("data/raw".to_string()),
            interim_dir: Some("/srv/interim".to_string()),
            ..Config::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/project"));

        assert_eq!(settings.raw_dir, PathBuf::from("/project/data/raw"));
        assert_eq!(settings.interim_dir, PathBuf::from("/srv/interim"));
    }

    #[test]
    fn apply_no_fields_leaves_defaults() {
        let mut settings = Settings::default();
        Config::default().apply_to_settings(&mut settings, Path::new("/project"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn apply_blank_categories_keeps_defaults() {
        let config = Config {
            categories: Some(vec!["  ".to_string()]),
            ..Config::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("."));
        assert_eq!(settings.categories, Settings::default().categories);
    }

    #[test]
    fn load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panadata.toml");
        std::fs::write(
            &path,
            "raw_dir = \"fuentes\"\ncategories = [\"gov\"]\ncsv_separator = \"; \"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.raw_dir.as_deref(), Some("fuentes"));
        assert_eq!(config.categories, Some(vec!["gov".to_string()]));
        assert_eq!(config.csv_separator.as_deref(), Some("; "));
        assert_eq!(config.base_dir(), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn load_yaml_and_json_configs() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("panadata.yaml");
        std::fs::write(&yaml, "interim_dir: salida\n").unwrap();
        let config = Config::load_from_path(&yaml).unwrap();
        assert_eq!(config.interim_dir.as_deref(), Some("salida"));

        let json = dir.path().join("panadata.json");
        std::fs::write(&json, r#"{"categories": ["docs", "corp"]}"#).unwrap();
        let config = Config::load_from_path(&json).unwrap();
        assert_eq!(
            config.categories,
            Some(vec!["docs".to_string(), "corp".to_string()])
        );
    }

    #[test]
    fn load_invalid_config_reports_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panadata.toml");
        std::fs::write(&path, "raw_dir = [").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "TOML", .. }));
    }

    #[test]
    fn load_missing_config_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/panadata.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
