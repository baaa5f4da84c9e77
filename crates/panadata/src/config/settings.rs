//! Application settings.

use std::fs;
use std::path::{Path, PathBuf};

/// Default raw input directory.
pub const DEFAULT_RAW_DIR: &str = "raw";

/// Default interim output directory.
pub const DEFAULT_INTERIM_DIR: &str = "interim";

/// Default source categories, each a subdirectory of the raw directory.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["gov", "docs", "corp"];

/// Default separator between `column: value` pairs of a CSV row.
pub const DEFAULT_CSV_SEPARATOR: &str = " | ";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding one subdirectory per category of raw files.
    pub raw_dir: PathBuf,
    /// Directory receiving one subdirectory per category of interim tables.
    pub interim_dir: PathBuf,
    /// Categories processed by a full pipeline run, in order.
    pub categories: Vec<String>,
    /// Separator between `column: value` pairs of a CSV row.
    pub csv_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            interim_dir: PathBuf::from(DEFAULT_INTERIM_DIR),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            csv_separator: DEFAULT_CSV_SEPARATOR.to_string(),
        }
    }
}

impl Settings {
    /// Create settings rooted at a base directory (`<base>/raw`, `<base>/interim`).
    pub fn with_base_dir(base: &Path) -> Self {
        Self {
            raw_dir: base.join(DEFAULT_RAW_DIR),
            interim_dir: base.join(DEFAULT_INTERIM_DIR),
            ..Default::default()
        }
    }

    /// Raw input directory for a category.
    pub fn raw_category_dir(&self, category: &str) -> PathBuf {
        self.raw_dir.join(category)
    }

    /// Interim output directory for a category.
    pub fn interim_category_dir(&self, category: &str) -> PathBuf {
        self.interim_dir.join(category)
    }

    /// Ensure the interim directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.interim_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create interim directory '{}': {}",
                    self.interim_dir.display(),
                    e
                ),
            )
        })
    }
}
