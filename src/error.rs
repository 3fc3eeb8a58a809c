use std::path::PathBuf;
use thiserror::Error;

/// The main error type for linesense operations.
#[derive(Debug, Error)]
pub enum LinesenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse line list {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error(
        "Non-positive wavenumber {wavenumber} at record {position}; cannot convert to wavelength"
    )]
    Domain { position: usize, wavenumber: f64 },

    #[error("Invalid conversion constant {0}; expected a finite positive value")]
    InvalidConversion(f64),

    #[error(
        "Specified wavelength range ({start}-{end} nm) is outside the data range ({data_min:.2}-{data_max:.2} nm)"
    )]
    Range {
        start: f64,
        end: f64,
        data_min: f64,
        data_max: f64,
    },

    #[error("Line catalog is empty; cannot bin the range {start}-{end} nm")]
    EmptyCatalog { start: f64, end: f64 },

    #[error("Invalid binning window: {message}")]
    InvalidWindow { message: String },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to write profile CSV to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
