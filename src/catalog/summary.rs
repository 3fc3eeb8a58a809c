//! Catalog summary for the `inspect` command.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::model::LineCatalog;
use crate::sensitivity::Scientific;

/// Summary counts and bounds of a line catalog.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CatalogSummary {
    pub species: Option<String>,
    /// Number of records.
    pub lines: usize,
    pub wavelength_min: Option<f64>,
    pub wavelength_max: Option<f64>,
    pub wavenumber_min: Option<f64>,
    pub wavenumber_max: Option<f64>,
    /// Sum of all line intensities.
    pub total_intensity: f64,
    /// The single strongest line, as (wavelength, intensity).
    pub strongest_line: Option<(f64, f64)>,
    /// Distinct molecule ids seen, ascending.
    pub molecule_ids: Vec<u32>,
    /// Distinct isotopologue ids seen, ascending.
    pub isotopologue_ids: Vec<u32>,
    /// Lines carrying a transition rate.
    pub with_transition_rate: usize,
}

/// Summarize a catalog.
pub fn summarize_catalog(catalog: &LineCatalog) -> CatalogSummary {
    let mut summary = CatalogSummary {
        species: catalog.species.clone(),
        lines: catalog.len(),
        ..Default::default()
    };

    let mut molecule_ids = BTreeSet::new();
    let mut isotopologue_ids = BTreeSet::new();

    for record in catalog.records() {
        summary.total_intensity += record.intensity;

        summary.wavelength_min =
            Some(summary.wavelength_min.map_or(record.wavelength, |m| m.min(record.wavelength)));
        summary.wavelength_max =
            Some(summary.wavelength_max.map_or(record.wavelength, |m| m.max(record.wavelength)));
        summary.wavenumber_min =
            Some(summary.wavenumber_min.map_or(record.wavenumber, |m| m.min(record.wavenumber)));
        summary.wavenumber_max =
            Some(summary.wavenumber_max.map_or(record.wavenumber, |m| m.max(record.wavenumber)));

        // First strongest line wins on ties.
        let stronger = summary
            .strongest_line
            .map_or(true, |(_, best)| record.intensity > best);
        if stronger {
            summary.strongest_line = Some((record.wavelength, record.intensity));
        }

        if let Some(id) = record.molecule_id {
            molecule_ids.insert(id);
        }
        if let Some(id) = record.isotopologue_id {
            isotopologue_ids.insert(id);
        }
        if record.transition_rate.is_some() {
            summary.with_transition_rate += 1;
        }
    }

    summary.molecule_ids = molecule_ids.into_iter().collect();
    summary.isotopologue_ids = isotopologue_ids.into_iter().collect();
    summary
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.species {
            Some(species) => writeln!(f, "Line catalog: {species}")?,
            None => writeln!(f, "Line catalog")?,
        }
        writeln!(f, "  Lines:            {}", self.lines)?;

        match (self.wavelength_min, self.wavelength_max) {
            (Some(lo), Some(hi)) => writeln!(f, "  Wavelength (nm):  {lo:.2} - {hi:.2}")?,
            _ => writeln!(f, "  Wavelength (nm):  -")?,
        }
        match (self.wavenumber_min, self.wavenumber_max) {
            (Some(lo), Some(hi)) => writeln!(f, "  Wavenumber:       {lo:.4} - {hi:.4}")?,
            _ => writeln!(f, "  Wavenumber:       -")?,
        }

        writeln!(
            f,
            "  Total intensity:  {}",
            Scientific::new(self.total_intensity, 3)
        )?;
        if let Some((wavelength, intensity)) = self.strongest_line {
            writeln!(
                f,
                "  Strongest line:   {} at {wavelength:.2} nm",
                Scientific::new(intensity, 3)
            )?;
        }
        if !self.molecule_ids.is_empty() {
            writeln!(f, "  Molecule ids:     {}", join_ids(&self.molecule_ids))?;
        }
        if !self.isotopologue_ids.is_empty() {
            writeln!(f, "  Isotopologues:    {}", join_ids(&self.isotopologue_ids))?;
        }
        if self.with_transition_rate > 0 {
            writeln!(f, "  With A-coeff:     {}", self.with_transition_rate)?;
        }
        Ok(())
    }
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
