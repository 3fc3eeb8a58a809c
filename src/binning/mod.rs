//! Fixed-width wavelength binning of a line catalog.
//!
//! Boundary policy, reproduced exactly:
//!
//! - records are kept when `start <= wavelength <= end` (inclusive filter);
//! - each kept record goes to the bin with `lower <= wavelength < upper`
//!   (right-open lookup);
//! - a kept record with no bin, typically one sitting exactly on `end` when
//!   `end` is also the last edge, is dropped rather than moved into a
//!   neighbouring bin.
//!
//! Before binning, the window is checked against the catalog's wavelength
//! span with a small absolute tolerance (0.01 by default).

mod profile;

pub use profile::{Bin, BinAxis, BinWindow, BinnedProfile, DEFAULT_BIN_SIZE};

use log::debug;

use crate::catalog::LineCatalog;
use crate::error::LinesenseError;

/// Default slack, in the wavelength unit, when checking the window against
/// the catalog's span.
pub const DEFAULT_COVERAGE_TOLERANCE: f64 = 0.01;

/// Options for binning.
#[derive(Clone, Debug)]
pub struct BinOptions {
    /// Require the catalog to cover the window within this tolerance.
    /// `None` skips the check.
    pub coverage_tolerance: Option<f64>,
}

impl Default for BinOptions {
    fn default() -> Self {
        Self {
            coverage_tolerance: Some(DEFAULT_COVERAGE_TOLERANCE),
        }
    }
}

impl BinOptions {
    /// Options that skip the coverage check.
    pub fn unchecked() -> Self {
        Self {
            coverage_tolerance: None,
        }
    }
}

/// Checks that a catalog spans the window, within `tolerance`.
///
/// # Errors
/// [`LinesenseError::EmptyCatalog`] when there is nothing to check against,
/// [`LinesenseError::Range`] when `start < min - tolerance` or
/// `end > max + tolerance`.
pub fn check_coverage(
    catalog: &LineCatalog,
    window: &BinWindow,
    tolerance: f64,
) -> Result<(), LinesenseError> {
    let (data_min, data_max) =
        catalog
            .wavelength_bounds()
            .ok_or(LinesenseError::EmptyCatalog {
                start: window.start,
                end: window.end,
            })?;

    if window.start < data_min - tolerance || window.end > data_max + tolerance {
        return Err(LinesenseError::Range {
            start: window.start,
            end: window.end,
            data_min,
            data_max,
        });
    }
    Ok(())
}

/// Bin a catalog's intensities over a wavelength window.
///
/// Intensities are summed in catalog order, so the result is bit-for-bit
/// reproducible for the same catalog and window.
///
/// # Errors
/// [`LinesenseError::InvalidWindow`] for a malformed window, and the errors
/// of [`check_coverage`] when `opts.coverage_tolerance` is set.
pub fn bin_catalog(
    catalog: &LineCatalog,
    window: &BinWindow,
    opts: &BinOptions,
) -> Result<BinnedProfile, LinesenseError> {
    window.validate()?;
    if let Some(tolerance) = opts.coverage_tolerance {
        check_coverage(catalog, window, tolerance)?;
    }

    let axis = BinAxis::new(window)?;
    let mut intensity = vec![0.0; axis.len()];
    let mut line_counts = vec![0usize; axis.len()];
    let mut filtered_lines = 0;
    let mut dropped_lines = 0;

    for record in catalog
        .records()
        .iter()
        .filter(|r| window.contains(r.wavelength))
    {
        filtered_lines += 1;
        match axis.locate(record.wavelength) {
            Some(index) => {
                intensity[index] += record.intensity;
                line_counts[index] += 1;
            }
            None => dropped_lines += 1,
        }
    }

    debug!(
        "binned {} of {} line(s) into {} bin(s) over {}-{} (dropped {} at the boundary)",
        filtered_lines - dropped_lines,
        catalog.len(),
        axis.len(),
        window.start,
        window.end,
        dropped_lines
    );

    Ok(BinnedProfile {
        window: *window,
        midpoints: axis.midpoints(),
        edges: axis.edges().to_vec(),
        intensity,
        line_counts,
        filtered_lines,
        dropped_lines,
    })
}
