//! Sailtree - parse sailfish templates into concrete syntax trees.
//!
//! This binary provides the CLI interface to the sailtree library,
//! parsing template files or stdin and printing the resulting tree.

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Format};
use log::{debug, error, info, LevelFilter};
use sailtree_config::Config;
use sailtree_core::{Result, SailtreeError};
use sailtree_parser::{Parser, Tree};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    // Set up logging
    setup_logging(&cli.log_level);
    info!("sailtree v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(true) => {}
        // Grammatical errors in the input are reported through the tree;
        // signal them in the exit code for CI use.
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic. Returns whether every parsed tree was clean.
fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    let format = cli.effective_format(&config);
    debug!("output format: {:?}", format);

    let mut parser = Parser::new();
    let mut clean = true;

    if cli.should_read_stdin() {
        if atty::is(atty::Stream::Stdin) {
            info!("reading template from interactive stdin; pipe input or pass FILE");
        }
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        clean &= emit(&mut parser, &source, None, format, cli, &config)?;
    } else {
        for path in &cli.files {
            info!("parsing file: {}", path.display());
            let source = fs::read_to_string(path)?;
            clean &= emit(&mut parser, &source, Some(path), format, cli, &config)?;
        }
    }

    Ok(clean)
}

/// Load configuration with optional overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_with_override(cli.config.as_deref())?;
    debug!("loaded config: {:?}", config);
    Ok(config)
}

/// Parse one document and print its tree.
fn emit(
    parser: &mut Parser,
    source: &str,
    path: Option<&Path>,
    format: Format,
    cli: &Cli,
    config: &Config,
) -> Result<bool> {
    let started = Instant::now();
    let tree = parser.parse(source);

    if cli.time {
        let label = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string());
        eprintln!(
            "{}: {} bytes in {:?}",
            label,
            source.len(),
            started.elapsed()
        );
    }

    print_tree(&tree, format, config)?;
    Ok(!tree.has_error())
}

/// Print a tree in the requested format.
fn print_tree(tree: &Tree, format: Format, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Sexp => writeln!(out, "{}", tree.to_sexp())?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, tree)
                .map_err(|e| SailtreeError::Format(e.to_string()))?;
            writeln!(out)?;
        }
        Format::Ranges => write!(out, "{}", tree.ranges(config.output.spans))?,
    }
    Ok(())
}
