//! Command-line interface for sailtree.

use clap::{Parser, ValueEnum};
use sailtree_config::Config;
use std::path::PathBuf;

/// Tree output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// S-expression over named nodes
    Sexp,
    /// Full tree as JSON
    Json,
    /// Indented listing of visible nodes
    Ranges,
}

/// Sailtree - parse sailfish templates into concrete syntax trees.
#[derive(Parser, Debug)]
#[command(
    name = "slt",
    author = "Sailtree Contributors",
    version,
    about = "Parse sailfish templates into concrete syntax trees",
    after_help = "Examples:\n  \
                  slt template.stpl\n  \
                  cat template.stpl | slt --format json\n  \
                  slt --format ranges --time templates/*.stpl"
)]
pub struct Cli {
    /// Template files to parse (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Output format (overrides the config file)
    #[arg(short = 'f', long = "format")]
    pub format: Option<Format>,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Print parse timing to stderr
    #[arg(long = "time")]
    pub time: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve the output format from the CLI flag or the config file.
    pub fn effective_format(&self, config: &Config) -> Format {
        if let Some(format) = self.format {
            return format;
        }
        match config.output.format.as_str() {
            "json" => Format::Json,
            "ranges" => Format::Ranges,
            _ => Format::Sexp,
        }
    }
}

/// Show paths information.
pub fn show_paths() {
    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
