//! Profile sinks for external plotting tools.
//!
//! linesense does not draw plots. A [`ProfileSink`] takes a finished
//! [`BinnedProfile`] and writes it somewhere a plotting tool can pick it up:
//! a CSV table (`midpoint,intensity,line_count`) or a JSON document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::binning::{BinWindow, BinnedProfile};
use crate::error::LinesenseError;

/// Consumer of a binned profile.
pub trait ProfileSink {
    /// Emit the profile. `title` is a free-form label such as
    /// `"CO2 sensitivity vs. wavelength"`.
    fn write_profile(
        &mut self,
        title: &str,
        profile: &BinnedProfile,
    ) -> Result<(), LinesenseError>;
}

#[derive(Serialize)]
struct CsvRow {
    midpoint: f64,
    intensity: f64,
    line_count: usize,
}

/// Writes one CSV row per bin.
///
/// The title is not written; CSV has nowhere to put it.
pub struct CsvProfileSink<W: Write> {
    writer: W,
    /// Used in error messages.
    target: PathBuf,
}

impl<W: Write> CsvProfileSink<W> {
    pub fn new(writer: W, target: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            target: target.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvProfileSink<BufWriter<File>> {
    /// Creates (or truncates) `path` for writing.
    pub fn create(path: &Path) -> Result<Self, LinesenseError> {
        let file = File::create(path).map_err(|source| LinesenseError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> ProfileSink for CsvProfileSink<W> {
    fn write_profile(
        &mut self,
        _title: &str,
        profile: &BinnedProfile,
    ) -> Result<(), LinesenseError> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
        for bin in profile.bins() {
            csv_writer
                .serialize(CsvRow {
                    midpoint: bin.midpoint,
                    intensity: bin.intensity,
                    line_count: bin.line_count,
                })
                .map_err(|source| LinesenseError::CsvWrite {
                    path: self.target.clone(),
                    source,
                })?;
        }
        csv_writer.flush().map_err(LinesenseError::Io)?;
        drop(csv_writer);
        self.writer.flush().map_err(LinesenseError::Io)
    }
}

#[derive(Serialize)]
struct JsonProfile<'a> {
    title: &'a str,
    window: &'a BinWindow,
    edges: &'a [f64],
    midpoints: &'a [f64],
    intensity: &'a [f64],
    line_counts: &'a [usize],
}

/// Writes the profile as a single pretty-printed JSON object.
pub struct JsonProfileSink<W: Write> {
    writer: W,
    target: PathBuf,
}

impl<W: Write> JsonProfileSink<W> {
    pub fn new(writer: W, target: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            target: target.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonProfileSink<BufWriter<File>> {
    /// Creates (or truncates) `path` for writing.
    pub fn create(path: &Path) -> Result<Self, LinesenseError> {
        let file = File::create(path).map_err(|source| LinesenseError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> ProfileSink for JsonProfileSink<W> {
    fn write_profile(
        &mut self,
        title: &str,
        profile: &BinnedProfile,
    ) -> Result<(), LinesenseError> {
        let doc = JsonProfile {
            title,
            window: profile.window(),
            edges: profile.edges(),
            midpoints: profile.midpoints(),
            intensity: profile.intensity(),
            line_counts: profile.line_counts(),
        };
        serde_json::to_writer_pretty(&mut self.writer, &doc).map_err(|source| {
            LinesenseError::JsonWrite {
                path: self.target.clone(),
                source,
            }
        })?;
        writeln!(self.writer).map_err(LinesenseError::Io)?;
        self.writer.flush().map_err(LinesenseError::Io)
    }
}
