//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{sort_cmd, watch};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "ticktidy")]
#[command(author, version, about = "Keeps markdown checklists sorted by completion status")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .ticktidy.toml config file
    Init {
        /// Directory for the config file (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Sort a checklist file by status
    Sort {
        /// File to sort in place, or '-' to read stdin and print to stdout
        file: PathBuf,

        /// Print the sorted document instead of rewriting the file
        #[arg(long)]
        stdout: bool,
    },

    /// Verify checklist files are sorted without rewriting them
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Watch a file or directory and resort checklists as checkboxes toggle
    Watch {
        /// File or directory to watch (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Override the event debounce in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = Output::new(cli.format, cli.verbose);
    output.verbose("ticktidy starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Writing config into: {}", path.display()));
            let (config_path, created) = Config::init_at(&path)?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": config_path.display().to_string(),
                    "created": created,
                }));
            } else if created {
                output.success(&format!("Initialized config at {}", config_path.display()));
            } else {
                output.success(&format!("Config already exists at {}", config_path.display()));
            }
        }

        Commands::Sort { file, stdout } => sort_cmd::sort(&output, &file, stdout)?,

        Commands::Check { files } => {
            output.verbose_ctx("check", &format!("Checking {} file(s)", files.len()));
            let all_sorted = sort_cmd::check(&output, &files)?;
            if !all_sorted {
                // Lint semantics: callers branch on the exit code.
                std::process::exit(1);
            }
        }

        Commands::Watch { path, debounce_ms } => watch::run(&output, &path, debounce_ms)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Installs the tracing subscriber the library's diagnostics report through
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "ticktidy=debug" } else { "ticktidy=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
