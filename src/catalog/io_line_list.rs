//! Whitespace-delimited line-list reader.
//!
//! HITRAN `.out` exports (and most tools that mimic them) write one spectral
//! line per row with no header. Fields are located purely by position, as
//! described by a [`ColumnLayout`]:
//!
//! ```text
//!  mol iso  idx   wavenumber   intensity    A-coeff
//!    2   1    1   5000.50000   1.230E-21    3.450E-02
//! ```
//!
//! Blank rows are skipped. Any row that is missing a required column, or
//! carries a token that does not parse as a finite number, aborts the read.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use super::model::{ColumnLayout, ParsedLine};
use crate::error::LinesenseError;

/// Reads a line list from disk.
///
/// The file handle is held only while the table is read into memory.
///
/// # Errors
/// Returns [`LinesenseError::File`] if the file cannot be read and
/// [`LinesenseError::Parse`] for the first malformed row.
pub fn read_line_list(
    path: &Path,
    layout: &ColumnLayout,
) -> Result<Vec<ParsedLine>, LinesenseError> {
    let file_error = |source: std::io::Error| LinesenseError::File {
        path: path.to_path_buf(),
        source,
    };
    let text = {
        let file = File::open(path).map_err(file_error)?;
        let mut reader = BufReader::new(file);
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(file_error)?;
        text
    };

    let lines = parse_rows(&text, &path.display().to_string(), layout)?;
    debug!("read {} line(s) from {}", lines.len(), path.display());
    Ok(lines)
}

/// Parses a line list held in memory.
///
/// Useful for testing without file I/O.
pub fn from_line_list_str(
    text: &str,
    layout: &ColumnLayout,
) -> Result<Vec<ParsedLine>, LinesenseError> {
    parse_rows(text, "<memory>", layout)
}

/// Derives a species label from a data file name.
///
/// HITRAN downloads are conventionally named `<species>_<anything>`, so the
/// label is the part of the file name before the first underscore
/// (`CO2_list.out` gives `CO2`). A name without an underscore yields its
/// stem.
pub fn species_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let label = match name.split_once('_') {
        Some((prefix, _)) => prefix,
        None => path.file_stem()?.to_str()?,
    };
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

fn parse_rows(
    text: &str,
    source_name: &str,
    layout: &ColumnLayout,
) -> Result<Vec<ParsedLine>, LinesenseError> {
    let mut rows = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        if let Some(row) = parse_row(line, source_name, line_idx + 1, layout)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Parses one row, returning `None` for blank lines.
fn parse_row(
    line: &str,
    source_name: &str,
    line_num: usize,
    layout: &ColumnLayout,
) -> Result<Option<ParsedLine>, LinesenseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // Only the columns the layout reads are kept.
    let tokens: Vec<&str> = trimmed
        .split_whitespace()
        .take(layout.max_column() + 1)
        .collect();

    let err = |message: String| LinesenseError::Parse {
        source_name: source_name.to_string(),
        line: line_num,
        message,
    };

    let required = |index: usize, name: &str| -> Result<f64, LinesenseError> {
        let token = tokens.get(index).ok_or_else(|| {
            err(format!(
                "missing {name} column {} (row has {} column(s))",
                index + 1,
                tokens.len()
            ))
        })?;
        parse_finite(token, name).map_err(err)
    };

    let wavenumber = required(layout.wavenumber, "wavenumber")?;
    let intensity = required(layout.intensity, "intensity")?;
    if intensity < 0.0 {
        return Err(err(format!(
            "intensity {intensity} is negative; expected a non-negative value"
        )));
    }

    let molecule_id = optional_id(&tokens, layout.molecule_id, "molecule id").map_err(err)?;
    let isotopologue_id =
        optional_id(&tokens, layout.isotopologue_id, "isotopologue id").map_err(err)?;

    let transition_rate = match layout.transition_rate.and_then(|i| tokens.get(i)) {
        Some(token) => {
            let rate = parse_finite(token, "transition rate").map_err(err)?;
            if rate < 0.0 {
                return Err(err(format!(
                    "transition rate {rate} is negative; expected a non-negative value"
                )));
            }
            Some(rate)
        }
        None => None,
    };

    Ok(Some(ParsedLine {
        wavenumber,
        intensity,
        molecule_id,
        isotopologue_id,
        transition_rate,
    }))
}

fn parse_finite(token: &str, name: &str) -> Result<f64, String> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("{name} '{token}' is not a finite number")),
        Err(_) => Err(format!("invalid {name} '{token}'; expected a number")),
    }
}

/// Auxiliary ids are read when configured and present; a short row leaves
/// them unset.
fn optional_id(tokens: &[&str], index: Option<usize>, name: &str) -> Result<Option<u32>, String> {
    match index.and_then(|i| tokens.get(i)) {
        Some(token) => token
            .parse::<u32>()
            .map(Some)
            .map_err(|_| format!("invalid {name} '{token}'; expected non-negative integer")),
        None => Ok(None),
    }
}

/// Fuzz-only entrypoint for single-row parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_row(input: &str) -> Result<(), LinesenseError> {
    let _ = parse_row(input, "<fuzz>", 1, &ColumnLayout::default())?;
    Ok(())
}
