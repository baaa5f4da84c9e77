//! Interim table inspection.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use console::style;

use panadata::config::Settings;
use panadata::models::DocumentRecord;
use panadata_extract::{find_interim_files, read_interim};

use crate::cli::icons::{bullet, error, info, success, warn};

/// Record counts over one or more interim tables.
#[derive(Debug, Default, PartialEq, Eq)]
struct InterimSummary {
    files: usize,
    records: usize,
    by_type: BTreeMap<&'static str, usize>,
    by_format: BTreeMap<&'static str, usize>,
}

impl InterimSummary {
    fn add(&mut self, records: &[DocumentRecord]) {
        self.files += 1;
        self.records += records.len();
        for record in records {
            *self.by_type.entry(record.doc_type().as_str()).or_default() += 1;
            *self.by_format.entry(record.format.as_str()).or_default() += 1;
        }
    }
}

fn interim_paths(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    Ok(find_interim_files(path)?)
}

fn print_distribution(title: &str, counts: &BTreeMap<&'static str, usize>, total: usize) {
    println!("\n  {}:", title);
    for (key, count) in counts {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / total as f64
        };
        println!("    {} {:<16} {:>8} ({:.1}%)", bullet(), key, count, share);
    }
}

/// Print record counts and type/format distributions of interim tables.
pub fn cmd_inspect(settings: &Settings, path: Option<&Path>) -> anyhow::Result<()> {
    let root = path.unwrap_or(settings.interim_dir.as_path());
    if !root.exists() {
        println!("{} Nothing to inspect at {}", warn(), root.display());
        return Ok(());
    }

    let files = interim_paths(root)?;
    if files.is_empty() {
        println!("{} No interim tables under {}", warn(), root.display());
        return Ok(());
    }

    println!("{} Inspecting {} interim tables", info(), files.len());

    let mut summary = InterimSummary::default();
    for file in &files {
        match read_interim(file) {
            Ok(records) => {
                println!("  {:>8}  {}", records.len(), file.display());
                summary.add(&records);
            }
            Err(e) => println!("  {} {}: {}", error(), file.display(), e),
        }
    }

    print_distribution("By type", &summary.by_type, summary.records);
    print_distribution("By format", &summary.by_format, summary.records);

    println!(
        "\n{} {} records in {} tables",
        success(),
        style(summary.records).bold(),
        summary.files
    );
    Ok(())
}
