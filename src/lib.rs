//! linesense: spectral line sensitivity from HITRAN-style line lists.
//!
//! linesense reads a molecular line list, converts each line's wavenumber to
//! wavelength, sums line intensities into fixed-width wavelength bins, and
//! reports which bins carry the most absorption ("sensitivity"). It is meant
//! for choosing instrument bandpasses and filters from line-list data.
//!
//! # Modules
//!
//! - [`catalog`]: line-list parsing and wavenumber → wavelength conversion
//! - [`binning`]: window checks and fixed-width binning
//! - [`sensitivity`]: top-N bins, line counts in sub-ranges, reports
//! - [`export`]: CSV/JSON profile sinks for external plotting
//! - [`config`]: YAML query configuration
//! - [`error`]: Error types for linesense operations
//!
//! # Example
//!
//! ```
//! use linesense::binning::{bin_catalog, BinOptions, BinWindow};
//! use linesense::catalog::{
//!     from_line_list_str, to_wavelength_catalog, ColumnLayout, UnitConversion,
//! };
//! use linesense::sensitivity::top_sensitivity_bins;
//!
//! let text = "2 1 1 4500.0 1.0E-21\n2 1 2 4800.0 4.0E-21\n2 1 3 5000.0 2.0E-21\n";
//! let lines = from_line_list_str(text, &ColumnLayout::default())?;
//! let catalog = to_wavelength_catalog(lines, &UnitConversion::default())?;
//!
//! let window = BinWindow::new(2000.0, 2200.0).with_bin_size(50.0);
//! let profile = bin_catalog(&catalog, &window, &BinOptions::default())?;
//! let top = top_sensitivity_bins(&profile, 1);
//! assert_eq!(top[0].midpoint, 2075.0);
//! # Ok::<(), linesense::LinesenseError>(())
//! ```

pub mod binning;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod sensitivity;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use log::info;

pub use error::LinesenseError;

use binning::bin_catalog;
use catalog::{load_catalog, summarize_catalog, ColumnLayout};
use config::QueryConfig;
use export::{CsvProfileSink, JsonProfileSink, ProfileSink};
use sensitivity::{build_sensitivity_report, ReportOptions};

/// The linesense CLI application.
#[derive(Parser)]
#[command(name = "linesense")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Bin line intensities over a wavelength window and report the most sensitive bins.
    Bin(BinArgs),
    /// Summarize a line list without binning it.
    Inspect(InspectArgs),
}

/// Arguments shared by every command that loads a line list.
#[derive(clap::Args)]
struct CatalogArgs {
    /// Line-list file (whitespace-delimited, no header).
    input: PathBuf,

    /// YAML file with query parameters; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wavelength = constant / wavenumber (1e7 gives nm from cm^-1).
    #[arg(long, env = "LINESENSE_CONVERSION_CONSTANT")]
    conversion_constant: Option<f64>,

    /// Zero-based wavenumber column. Setting either column flag reads only
    /// wavenumber and intensity.
    #[arg(long)]
    wavenumber_col: Option<usize>,

    /// Zero-based intensity column.
    #[arg(long)]
    intensity_col: Option<usize>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the bin subcommand.
#[derive(clap::Args)]
struct BinArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Start of the wavelength window (nm).
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f64>,

    /// End of the wavelength window (nm).
    #[arg(long, allow_negative_numbers = true)]
    end: Option<f64>,

    /// Bin width (nm) [default: 0.5].
    #[arg(long)]
    bin_size: Option<f64>,

    /// Number of top bins to list [default: 5].
    #[arg(long)]
    top: Option<usize>,

    /// Count lines in bins whose midpoint is in [START, END). Repeatable.
    #[arg(long, num_args = 2, value_names = ["START", "END"], action = ArgAction::Append)]
    count_range: Vec<f64>,

    /// Skip checking that the line list covers the window.
    #[arg(long)]
    no_coverage_check: bool,

    /// Slack (nm) allowed when checking the window against the data [default: 0.01].
    #[arg(long)]
    coverage_tolerance: Option<f64>,

    /// Write the binned profile as CSV for plotting.
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Write the binned profile as JSON for plotting.
    #[arg(long)]
    export_json: Option<PathBuf>,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
}

/// Run the linesense CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LinesenseError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Bin(args)) => run_bin(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("linesense {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Spectral line sensitivity binning.");
            println!();
            println!("Run 'linesense --help' for usage information.");
            Ok(())
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_output_format(value: &str) -> Result<OutputFormat, LinesenseError> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(LinesenseError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

/// File config (if any) with the shared catalog flags laid over it.
fn load_config(args: &CatalogArgs, flags: QueryConfig) -> Result<QueryConfig, LinesenseError> {
    let base = match &args.config {
        Some(path) => QueryConfig::from_yaml_file(path)?,
        None => QueryConfig::default(),
    };

    let columns = match (args.wavenumber_col, args.intensity_col) {
        (None, None) => None,
        (wavenumber, intensity) => {
            let defaults = ColumnLayout::default();
            Some(ColumnLayout::minimal(
                wavenumber.unwrap_or(defaults.wavenumber),
                intensity.unwrap_or(defaults.intensity),
            ))
        }
    };

    Ok(base.merged_with(QueryConfig {
        conversion_constant: args.conversion_constant,
        columns,
        ..flags
    }))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), LinesenseError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| LinesenseError::JsonWrite {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    println!("{text}");
    Ok(())
}

/// Execute the bin subcommand.
fn run_bin(args: BinArgs) -> Result<(), LinesenseError> {
    let output = parse_output_format(&args.catalog.output)?;

    if args.count_range.len() % 2 != 0 {
        return Err(LinesenseError::InvalidConfig {
            message: "--count-range takes a START and an END".to_string(),
        });
    }
    let count_ranges: Vec<(f64, f64)> = args
        .count_range
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect();

    let flags = QueryConfig {
        start_wavelength: args.start,
        end_wavelength: args.end,
        bin_size: args.bin_size,
        top_n: args.top,
        check_coverage: args.no_coverage_check.then_some(false),
        coverage_tolerance: args.coverage_tolerance,
        ..Default::default()
    };
    let query = load_config(&args.catalog, flags)?.resolve()?;

    let catalog = load_catalog(&args.catalog.input, &query.layout, &query.conversion)?;
    info!(
        "loaded {} line(s) from {}",
        catalog.len(),
        args.catalog.input.display()
    );

    let profile = bin_catalog(&catalog, &query.window, &query.bin_options())?;

    let opts = ReportOptions {
        top_n: query.top_n,
        count_ranges,
        species: catalog.species.clone(),
    };
    let report = build_sensitivity_report(&profile, &opts);

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", report),
    }

    let title = match &catalog.species {
        Some(species) => format!("{species} Sensitivity vs. Wavelength"),
        None => "Sensitivity vs. Wavelength".to_string(),
    };
    if let Some(path) = &args.export_csv {
        export_profile(&mut CsvProfileSink::create(path)?, &title, &profile, path)?;
    }
    if let Some(path) = &args.export_json {
        export_profile(&mut JsonProfileSink::create(path)?, &title, &profile, path)?;
    }

    Ok(())
}

fn export_profile(
    sink: &mut dyn ProfileSink,
    title: &str,
    profile: &binning::BinnedProfile,
    path: &Path,
) -> Result<(), LinesenseError> {
    sink.write_profile(title, profile)?;
    info!("wrote profile to {}", path.display());
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), LinesenseError> {
    let output = parse_output_format(&args.catalog.output)?;
    let (layout, conversion) =
        load_config(&args.catalog, QueryConfig::default())?.catalog_settings()?;

    let catalog = load_catalog(&args.catalog.input, &layout, &conversion)?;
    let summary = summarize_catalog(&catalog);

    match output {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => print!("{}", summary),
    }
    Ok(())
}
