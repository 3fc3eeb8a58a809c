//! Core catalog types: parsed rows, converted records, and the column layout.

use serde::{Deserialize, Serialize};

use crate::error::LinesenseError;

/// One row of a line list as read from disk, before unit conversion.
///
/// Rows keep their file order; nothing about wavelength is known yet.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedLine {
    /// Spectral position in inverse length (cm⁻¹ by convention).
    pub wavenumber: f64,
    /// Line intensity.
    pub intensity: f64,
    pub molecule_id: Option<u32>,
    pub isotopologue_id: Option<u32>,
    /// Einstein-A style transition rate, when the layout provides one.
    pub transition_rate: Option<f64>,
}

impl ParsedLine {
    /// Creates a row with only the two required fields set.
    pub fn new(wavenumber: f64, intensity: f64) -> Self {
        Self {
            wavenumber,
            intensity,
            molecule_id: None,
            isotopologue_id: None,
            transition_rate: None,
        }
    }
}

/// A single spectral line after conversion to the wavelength domain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineRecord {
    pub wavenumber: f64,
    /// Derived wavelength (nm with the default conversion constant).
    pub wavelength: f64,
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecule_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isotopologue_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_rate: Option<f64>,
}

/// An ordered set of line records, ascending by wavelength.
///
/// Built by [`to_wavelength_catalog`](super::to_wavelength_catalog); the
/// ordering is guaranteed there and not re-checked by consumers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineCatalog {
    /// Species label for reports, usually derived from the file name.
    pub species: Option<String>,
    pub(crate) records: Vec<LineRecord>,
}

impl LineCatalog {
    /// Records in ascending wavelength order.
    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attach a species label.
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Smallest and largest wavelength, or `None` for an empty catalog.
    ///
    /// Scans every record rather than trusting the ends of the vector, so the
    /// bounds stay correct for catalogs assembled by hand in tests.
    pub fn wavelength_bounds(&self) -> Option<(f64, f64)> {
        let first = self.records.first()?.wavelength;
        Some(self.records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.wavelength), hi.max(r.wavelength))
        }))
    }

    /// Wavelength column as a vector, in catalog order.
    pub fn wavelengths(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.wavelength).collect()
    }

    /// Intensity column as a vector, in catalog order.
    pub fn intensities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.intensity).collect()
    }
}

/// Zero-based column positions of a whitespace-delimited line list.
///
/// The layout is always supplied by the caller; files are never sniffed.
///
/// When deserialized, unlisted `wavenumber`/`intensity` fall back to the
/// HITRAN positions, while auxiliary columns are read only when listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnLayout {
    #[serde(default)]
    pub molecule_id: Option<usize>,
    #[serde(default)]
    pub isotopologue_id: Option<usize>,
    #[serde(default = "default_wavenumber_column")]
    pub wavenumber: usize,
    #[serde(default = "default_intensity_column")]
    pub intensity: usize,
    #[serde(default)]
    pub transition_rate: Option<usize>,
}

fn default_wavenumber_column() -> usize {
    3
}

fn default_intensity_column() -> usize {
    4
}

impl Default for ColumnLayout {
    /// The HITRAN `.out` convention: molecule, isotopologue, (unused),
    /// wavenumber, intensity, transition rate.
    fn default() -> Self {
        Self {
            molecule_id: Some(0),
            isotopologue_id: Some(1),
            wavenumber: default_wavenumber_column(),
            intensity: default_intensity_column(),
            transition_rate: Some(5),
        }
    }
}

impl ColumnLayout {
    /// A layout that reads only wavenumber and intensity.
    pub fn minimal(wavenumber: usize, intensity: usize) -> Self {
        Self {
            molecule_id: None,
            isotopologue_id: None,
            wavenumber,
            intensity,
            transition_rate: None,
        }
    }

    /// Checks that no two configured fields read the same column.
    pub fn validate(&self) -> Result<(), LinesenseError> {
        let fields = [
            ("wavenumber", Some(self.wavenumber)),
            ("intensity", Some(self.intensity)),
            ("molecule_id", self.molecule_id),
            ("isotopologue_id", self.isotopologue_id),
            ("transition_rate", self.transition_rate),
        ];
        for (i, &(name, column)) in fields.iter().enumerate() {
            let Some(column) = column else { continue };
            let clash = fields[i + 1..]
                .iter()
                .find(|(_, other)| *other == Some(column));
            if let Some((other, _)) = clash {
                return Err(LinesenseError::InvalidConfig {
                    message: format!("columns {name} and {other} both read column {column}"),
                });
            }
        }
        Ok(())
    }

    /// Highest column index any configured field reads.
    pub(crate) fn max_column(&self) -> usize {
        [
            Some(self.wavenumber),
            Some(self.intensity),
            self.molecule_id,
            self.isotopologue_id,
            self.transition_rate,
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0)
    }
}
