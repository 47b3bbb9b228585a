//! Command-line interface for `geodico`, a metadata inventory for spatial databases.
//!
//! This binary provides a user-friendly CLI to interact with the [`geodico_core`] library,
//! printing what a Spatialite, GeoPackage or File Geodatabase container holds: its layers,
//! their fields, spatial reference, geometry kind and extent.
//!
//! # Architecture
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for structured logging.
//! It parses arguments, configures logging, and delegates to command handlers.
//!
//! # Available Commands
//!
//! - `info` - Display the metadata report of one or more containers
//! - `drivers` - List the spatial database drivers and whether GDAL ships them

mod display;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tabled::Table;
use tracing::{Level, debug, error, info, warn};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use geodico_core::drivers::get_drivers;
use geodico_core::gdal_source::is_installed;
use geodico_core::{Report, TextLabels, read};

use display::{DriverRow, display_report};

#[derive(Parser)]
#[command(
    name = "geodico",
    version,
    about = "Metadata inventory for spatial databases",
    long_about = "geodico reads Spatialite, GeoPackage and File Geodatabase containers through GDAL\n\
                  and reports their layers, fields, spatial references and extents."
)]
/// Command-line arguments and options for the `geodico` CLI.
///
/// This struct defines the top-level CLI interface, including global flags for
/// logging verbosity and the subcommand to execute.
struct Cli {
    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Language of the labels written into reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Language {
    En,
    Fr,
}

impl Language {
    fn labels(self) -> TextLabels {
        match self {
            Self::En => TextLabels::english(),
            Self::Fr => TextLabels::french(),
        }
    }
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Text header followed by layer and field tables.
    Table,
    /// A pretty-printed JSON array with one report per dataset.
    Json,
}

/// Available subcommands for the `geodico` CLI.
#[derive(Subcommand)]
enum Commands {
    /// Displays the metadata report of spatial database containers.
    ///
    /// Every dataset is read in turn. A container that cannot be opened still
    /// produces a report carrying the "corrupt" marker.
    Info {
        /// Paths to the containers to read.
        #[arg(value_name = "DATASET", required = true)]
        inputs: Vec<String>,

        /// Language of the labels in the report.
        #[arg(short, long, value_enum, default_value_t = Language::En)]
        lang: Language,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Fail when any container could not be opened.
        #[arg(long)]
        strict: bool,
    },

    /// Lists the spatial database drivers and their support status.
    Drivers,
}

/// Entry point for the `geodico` command-line interface.
///
/// This function parses command-line arguments, configures the logging system based on
/// verbosity flags, and dispatches to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if command execution fails or if the logging system cannot be initialized.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity flags
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Info {
            inputs,
            lang,
            format,
            strict,
        } => {
            info!("Displaying info for {} dataset(s)", inputs.len());
            handle_info(&inputs, lang, format, strict)?;
        },
        Commands::Drivers => {
            handle_drivers();
        },
    }

    Ok(())
}

/// Reads every input and prints the reports in `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails, or in `strict` mode when at
/// least one container could not be opened.
fn handle_info(
    inputs: &[String],
    lang: Language,
    format: OutputFormat,
    strict: bool,
) -> Result<()> {
    let labels = lang.labels();
    debug!("Labels: {lang:?}, format: {format:?}, strict: {strict}");

    let reports: Vec<Report> = inputs.iter().map(|input| read(input, &labels)).collect();

    match format {
        OutputFormat::Table => reports.iter().for_each(display_report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    if !strict {
        return Ok(());
    }

    let total = reports.len();
    let mut failed = 0;
    for report in reports {
        if let Err(e) = report.into_result() {
            error!("{}", e.user_message());
            if let Some(suggestion) = e.recovery_suggestion() {
                warn!("{suggestion}");
            }
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} of {total} dataset(s) could not be read");
    }
    Ok(())
}

/// Handles the `drivers` subcommand by displaying a formatted table of the registry.
///
/// Every registered driver is listed, with its support status and whether the
/// linked GDAL build ships it.
fn handle_drivers() {
    let drivers = get_drivers();

    println!("\nSpatial Database Drivers ({} total):\n", drivers.len());

    let rows: Vec<DriverRow> = drivers
        .iter()
        .map(|d| DriverRow {
            short_name: d.short_name.to_string(),
            long_name: d.long_name.to_string(),
            extensions: d.extensions.join(", "),
            info: d.info.as_str().to_string(),
            installed: if is_installed(d.short_name) { "Yes" } else { "No" }.to_string(),
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!("{table}");
}
