//! Configuration loading and merging logic.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError, Settings};

/// Environment variable overriding the raw directory.
const RAW_DIR_ENV: &str = "PANADATA_RAW_DIR";

/// Environment variable overriding the interim directory.
const INTERIM_DIR_ENV: &str = "PANADATA_INTERIM_DIR";

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
}

/// Look for a config file in a directory.
/// Checks panadata.{ext} for every supported format.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let extensions = ["toml", "yaml", "yml", "json"];

    extensions
        .iter()
        .map(|ext| dir.join(format!("panadata.{}", ext)))
        .find(|path| path.is_file())
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Load the config file, if any.
///
/// An explicit path must load; a discovered file that fails to parse is
/// reported and ignored.
fn load_file_config(options: &LoadOptions) -> Result<Config, ConfigError> {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return Config::load_from_path(config_path);
    }

    // Priority 2: panadata.* in the working directory
    if let Some(config_path) = find_config(&current_dir()) {
        tracing::debug!("Found config: {}", config_path.display());
        return Ok(Config::load_from_path(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file: {}", e);
            Config::default()
        }));
    }

    Ok(Config::default())
}

/// Apply environment overrides, which take precedence over config files.
fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw_dir) = lookup(RAW_DIR_ENV).filter(|s| !s.is_empty()) {
        tracing::debug!("Using {} from environment: {}", RAW_DIR_ENV, raw_dir);
        settings.raw_dir = PathBuf::from(raw_dir);
    }
    if let Some(interim_dir) = lookup(INTERIM_DIR_ENV).filter(|s| !s.is_empty()) {
        tracing::debug!("Using {} from environment: {}", INTERIM_DIR_ENV, interim_dir);
        settings.interim_dir = PathBuf::from(interim_dir);
    }
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub fn load_settings_with_options(options: LoadOptions) -> Result<(Settings, Config), ConfigError> {
    let config = load_file_config(&options)?;

    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let base_dir = if options.use_cwd {
        current_dir()
    } else {
        config.base_dir().unwrap_or_else(current_dir)
    };

    config.apply_to_settings(&mut settings, &base_dir);
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_config_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("panadata.json"), "{}").unwrap();
        std::fs::write(dir.path().join("panadata.toml"), "").unwrap();

        assert_eq!(
            find_config(dir.path()),
            Some(dir.path().join("panadata.toml"))
        );
    }

    #[test]
    fn find_config_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_config(dir.path()), None);
    }

    #[test]
    fn explicit_config_resolves_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "raw_dir = \"fuentes\"\n").unwrap();

        let (settings, config) = load_settings_with_options(LoadOptions {
            config_path: Some(path.clone()),
            use_cwd: false,
        })
        .unwrap();

        assert_eq!(config.source_path, Some(path));
        assert_eq!(settings.raw_dir, dir.path().join("fuentes"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let result = load_settings_with_options(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/panadata.toml")),
            use_cwd: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |key| match key {
            RAW_DIR_ENV => Some("/mnt/raw".to_string()),
            INTERIM_DIR_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(settings.raw_dir, PathBuf::from("/mnt/raw"));
        // Empty values are ignored
        assert_eq!(settings.interim_dir, Settings::default().interim_dir);
    }
}
