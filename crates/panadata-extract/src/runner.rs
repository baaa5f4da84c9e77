//! Pipeline runner that processes every category with progress output.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use panadata::config::Settings;

use super::{DirectoryProcessor, DirectoryReport, ExtractError, ExtractStats, ProcessError};

/// Orchestrates raw -> interim processing for configured categories.
pub struct PipelineRunner<'a> {
    settings: &'a Settings,
    processor: DirectoryProcessor,
}

impl<'a> PipelineRunner<'a> {
    /// Create a new pipeline runner.
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            processor: DirectoryProcessor::from_settings(settings),
        }
    }

    /// Process every configured category.
    ///
    /// Directory-level failures are reported and the next category is
    /// processed. Files extracted before a failed write still count.
    pub fn run(&self) -> ExtractStats {
        let mut total = ExtractStats::default();

        for category in &self.settings.categories {
            let raw_dir = self.settings.raw_category_dir(category);
            let interim_dir = self.settings.interim_category_dir(category);

            match self.run_directory(&raw_dir, &interim_dir) {
                Ok(report) => total.merge(&report.stats),
                Err(e) => {
                    if let Some(stats) = e.stats() {
                        total.merge(stats);
                    }
                    tracing::error!("Category {} failed: {}", category, e);
                    println!("{} {}", style("✗").red(), e);
                }
            }
        }

        self.print_summary(&total);
        total
    }

    /// Process one directory with a progress bar and per-file error lines.
    pub fn run_directory(
        &self,
        dir: &Path,
        output_dir: &Path,
    ) -> Result<DirectoryReport, ProcessError> {
        println!("\n{} Processing {}", style("→").cyan(), dir.display());

        let files = self.processor.discover(dir)?;
        let pb = Self::create_progress_bar(files.len() as u64);

        let report = self
            .processor
            .process_files_with(dir, &files, output_dir, |file, outcome| {
                pb.inc(1);
                match outcome {
                    Ok(records) => {
                        tracing::debug!(
                            "{} -> {} records",
                            file.path.display(),
                            records.len()
                        );
                    }
                    Err(ExtractError::Empty) => {
                        tracing::warn!("No usable text in {}", file.path.display());
                        pb.suspend(|| {
                            println!(
                                "  {} {}: no usable text",
                                style("!").yellow(),
                                file.path.display()
                            )
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Failed to extract {}: {}", file.path.display(), e);
                        pb.suspend(|| {
                            println!(
                                "  {} {}: {}",
                                style("✗").red(),
                                file.path.display(),
                                e
                            )
                        });
                    }
                }
            });

        pb.finish_and_clear();
        let report = report?;

        match report.output_path {
            Some(ref path) => println!(
                "  {} {} records from {} files -> {}",
                style("✓").green(),
                report.records.len(),
                report.stats.files_extracted,
                path.display()
            ),
            None => println!("  {} No records produced", style("!").yellow()),
        }

        Ok(report)
    }

    fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn print_summary(&self, stats: &ExtractStats) {
        println!("\n{} Extraction complete:", style("✓").green());
        println!("  Files seen:      {}", style(stats.files_seen).dim());
        println!("  Files extracted: {}", style(stats.files_extracted).green());
        if stats.files_empty > 0 {
            println!("  Files empty:     {}", style(stats.files_empty).yellow());
        }
        if stats.files_failed > 0 {
            println!("  Files failed:    {}", style(stats.files_failed).red());
        }
        for (format, count) in &stats.records_by_format {
            println!("  {:<16} {}", format!("{} records:", format), count);
        }
        println!("  Total records:   {}", style(stats.records).bold());
    }
}
