//! Extraction commands.

use std::path::Path;

use panadata::config::Settings;
use panadata_extract::{directory_name, PipelineRunner};

use crate::cli::icons::{error, warn};

/// Run the pipeline over every configured category.
pub fn cmd_process(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        "Processing {} categories from {}",
        settings.categories.len(),
        settings.raw_dir.display()
    );
    // Each category creates its own output directory on write
    if let Err(e) = settings.ensure_directories() {
        tracing::warn!("{}", e);
        println!("{} {}", warn(), e);
    }
    PipelineRunner::new(settings).run();
    Ok(())
}

/// Extract one directory into `output`, or `<interim_dir>/<dirname>`.
pub fn cmd_extract(settings: &Settings, dir: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let output_dir = match output {
        Some(path) => path.to_path_buf(),
        None => settings.interim_dir.join(directory_name(dir)),
    };

    // A failed directory is reported, not fatal
    if let Err(e) = PipelineRunner::new(settings).run_directory(dir, &output_dir) {
        tracing::error!("{}", e);
        println!("{} {}", error(), e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_survives_unwritable_interim_dir() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let mut settings = Settings::with_base_dir(root.path());
        settings.interim_dir = blocker.join("interim");
        let gov = settings.raw_category_dir("gov");
        std::fs::create_dir_all(&gov).unwrap();
        std::fs::write(gov.join("ley_2020.html"), "<p>Ley</p>").unwrap();

        assert!(cmd_process(&settings).is_ok());
    }

    #[test]
    fn extract_failure_is_not_fatal() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("docs");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("informe.html"), "<p>Informe</p>").unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let settings = Settings::with_base_dir(root.path());
        assert!(cmd_extract(&settings, &dir, Some(&blocker.join("out"))).is_ok());
    }
}
