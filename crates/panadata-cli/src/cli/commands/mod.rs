//! CLI parser and command dispatch.

mod extract;
mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use panadata::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "panadata")]
#[command(about = "Extract raw PDF, HTML and CSV documents into interim Parquet tables")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `process` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every configured category from raw/ into interim/
    Process,

    /// Extract a single directory
    Extract {
        /// Directory of raw documents
        dir: PathBuf,
        /// Output directory (default: <interim_dir>/<dirname>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize interim Parquet tables
    Inspect {
        /// Interim file or directory (default: interim_dir)
        path: Option<PathBuf>,
    },
}

/// Parse arguments and run the selected command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
    };
    let (settings, config) = load_settings_with_options(options)?;
    if let Some(ref path) = config.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command.unwrap_or(Commands::Process) {
        Commands::Process => extract::cmd_process(&settings),
        Commands::Extract { dir, output } => {
            extract::cmd_extract(&settings, &dir, output.as_deref())
        }
        Commands::Inspect { path } => inspect::cmd_inspect(&settings, path.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["panadata"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn extract_with_output() {
        let cli =
            Cli::try_parse_from(["panadata", "extract", "raw/gov", "--output", "out", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Extract { dir, output }) => {
                assert_eq!(dir, PathBuf::from("raw/gov"));
                assert_eq!(output, Some(PathBuf::from("out")));
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["panadata", "inspect", "--config", "panadata.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("panadata.yaml")));
        assert!(matches!(cli.command, Some(Commands::Inspect { path: None })));
    }

    #[test]
    fn extract_requires_dir() {
        assert!(Cli::try_parse_from(["panadata", "extract"]).is_err());
    }
}
