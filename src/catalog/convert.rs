//! Wavenumber to wavelength conversion.
//!
//! Wavelength is the reciprocal of wavenumber scaled by a unit constant.
//! Because `x -> c / x` is order-reversing for positive `x`, a list sorted by
//! ascending wavenumber (the order HITRAN exports use) becomes ascending in
//! wavelength once the whole record sequence is reversed. Records move as
//! whole structs, so intensity and ids can never drift out of alignment with
//! their wavelength.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::model::{LineCatalog, LineRecord, ParsedLine};
use crate::error::LinesenseError;

/// Nanometres per inverse centimetre: `λ[nm] = 1e7 / ν̃[cm⁻¹]`.
pub const WAVENUMBER_CM_TO_WAVELENGTH_NM: f64 = 1e7;

/// A reciprocal unit conversion between an inverse-length and a length unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    /// `wavelength = constant / wavenumber`.
    pub constant: f64,
    pub wavenumber_unit: String,
    pub wavelength_unit: String,
}

impl Default for UnitConversion {
    fn default() -> Self {
        Self {
            constant: WAVENUMBER_CM_TO_WAVELENGTH_NM,
            wavenumber_unit: "cm^-1".to_string(),
            wavelength_unit: "nm".to_string(),
        }
    }
}

impl UnitConversion {
    /// Same units as the default, with a different constant.
    pub fn with_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Self::default()
        }
    }

    /// Converts a single wavenumber. The caller is responsible for the sign.
    #[inline]
    pub fn wavelength(&self, wavenumber: f64) -> f64 {
        self.constant / wavenumber
    }
}

/// Converts parsed rows (file order) into a wavelength-ascending catalog.
///
/// # Errors
/// [`LinesenseError::Domain`] for the first wavenumber that is not strictly
/// positive, and [`LinesenseError::InvalidConversion`] for a constant that is
/// not finite and positive.
pub fn to_wavelength_catalog(
    lines: Vec<ParsedLine>,
    conversion: &UnitConversion,
) -> Result<LineCatalog, LinesenseError> {
    if !(conversion.constant.is_finite() && conversion.constant > 0.0) {
        return Err(LinesenseError::InvalidConversion(conversion.constant));
    }

    let mut records = Vec::with_capacity(lines.len());
    for (idx, line) in lines.into_iter().enumerate() {
        // `!(x > 0)` also rejects NaN.
        if !(line.wavenumber > 0.0) {
            return Err(LinesenseError::Domain {
                position: idx + 1,
                wavenumber: line.wavenumber,
            });
        }
        records.push(LineRecord {
            wavenumber: line.wavenumber,
            wavelength: conversion.wavelength(line.wavenumber),
            intensity: line.intensity,
            molecule_id: line.molecule_id,
            isotopologue_id: line.isotopologue_id,
            transition_rate: line.transition_rate,
        });
    }

    records.reverse();

    if !is_ascending(&records) {
        warn!(
            "line list is not sorted by ascending wavenumber; sorting {} record(s) by wavelength",
            records.len()
        );
        records.sort_by(|a, b| a.wavelength.total_cmp(&b.wavelength));
    }

    debug!("converted {} record(s) to wavelength", records.len());
    Ok(LineCatalog {
        species: None,
        records,
    })
}

fn is_ascending(records: &[LineRecord]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].wavelength <= pair[1].wavelength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(wavenumber: f64, intensity: f64, molecule_id: u32) -> ParsedLine {
        ParsedLine {
            molecule_id: Some(molecule_id),
            ..ParsedLine::new(wavenumber, intensity)
        }
    }

    #[test]
    fn converts_and_reverses_ascending_wavenumbers() {
        let lines = vec![line(4000.0, 1.0, 1), line(4500.0, 2.0, 2), line(5000.0, 3.0, 3)];
        let catalog = to_wavelength_catalog(lines, &UnitConversion::default()).unwrap();

        assert_eq!(catalog.wavelengths(), vec![2000.0, 1e7 / 4500.0, 2500.0]);
        assert_eq!(catalog.intensities(), vec![3.0, 2.0, 1.0]);
        let ids: Vec<Option<u32>> = catalog.records().iter().map(|r| r.molecule_id).collect();
        assert_eq!(ids, vec![Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn descending_wavenumbers_still_give_ascending_wavelengths() {
        let lines = vec![line(5000.0, 1.0, 1), line(4000.0, 2.0, 2)];
        let catalog = to_wavelength_catalog(lines, &UnitConversion::default()).unwrap();
        assert_eq!(catalog.wavelengths(), vec![2000.0, 2500.0]);
        assert_eq!(catalog.intensities(), vec![1.0, 2.0]);
    }

    #[test]
    fn every_field_follows_its_wavelength() {
        let lines = vec![line(4000.0, 20.0, 8), line(5000.0, 10.0, 7)];
        let catalog = to_wavelength_catalog(lines, &UnitConversion::default()).unwrap();
        for record in catalog.records() {
            assert_eq!(record.wavelength, 1e7 / record.wavenumber);
        }
        assert_eq!(catalog.records()[0].wavenumber, 5000.0);
        assert_eq!(catalog.records()[0].intensity, 10.0);
        assert_eq!(catalog.records()[0].molecule_id, Some(7));
    }

    #[test]
    fn unsorted_input_is_sorted_by_wavelength() {
        let lines = vec![line(4500.0, 1.0, 1), line(5000.0, 2.0, 2), line(4000.0, 3.0, 3)];
        let catalog = to_wavelength_catalog(lines, &UnitConversion::default()).unwrap();
        let wl = catalog.wavelengths();
        assert!(wl.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(catalog.intensities(), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn zero_wavenumber_is_domain_error() {
        let lines = vec![line(4000.0, 1.0, 1), line(0.0, 1.0, 1)];
        let err = to_wavelength_catalog(lines, &UnitConversion::default()).unwrap_err();
        match err {
            LinesenseError::Domain {
                position,
                wavenumber,
            } => {
                assert_eq!(position, 2);
                assert_eq!(wavenumber, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_wavenumber_is_domain_error() {
        let err = to_wavelength_catalog(vec![line(-1.0, 1.0, 1)], &UnitConversion::default())
            .unwrap_err();
        assert!(matches!(err, LinesenseError::Domain { .. }));
    }

    #[test]
    fn custom_constant_is_used() {
        // cm^-1 to micrometres
        let conversion = UnitConversion::with_constant(1e4);
        let catalog = to_wavelength_catalog(vec![line(5000.0, 1.0, 1)], &conversion).unwrap();
        assert_eq!(catalog.wavelengths(), vec![2.0]);
    }

    #[test]
    fn non_positive_constant_is_rejected() {
        let err = to_wavelength_catalog(vec![], &UnitConversion::with_constant(0.0)).unwrap_err();
        assert!(matches!(err, LinesenseError::InvalidConversion(_)));
    }

    #[test]
    fn empty_input_gives_empty_catalog() {
        let catalog = to_wavelength_catalog(vec![], &UnitConversion::default()).unwrap();
        assert!(catalog.is_empty());
    }
}
