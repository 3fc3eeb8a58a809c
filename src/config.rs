//! Query configuration.
//!
//! Parameters can come from a YAML file, from command-line flags, or both;
//! flags win. Example file:
//!
//! ```yaml
//! start_wavelength: 2000.0
//! end_wavelength: 2400.0
//! bin_size: 0.05
//! top_n: 10
//! columns:
//!   wavenumber: 3
//!   intensity: 4
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::binning::{BinOptions, BinWindow, DEFAULT_BIN_SIZE, DEFAULT_COVERAGE_TOLERANCE};
use crate::catalog::{ColumnLayout, UnitConversion, WAVENUMBER_CM_TO_WAVELENGTH_NM};
use crate::error::LinesenseError;
use crate::sensitivity::DEFAULT_TOP_N;

/// Query parameters, every field optional until [`QueryConfig::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    pub start_wavelength: Option<f64>,
    pub end_wavelength: Option<f64>,
    pub bin_size: Option<f64>,
    pub top_n: Option<usize>,
    pub conversion_constant: Option<f64>,
    /// Set to `false` to skip the window-vs-data check.
    pub check_coverage: Option<bool>,
    pub coverage_tolerance: Option<f64>,
    pub columns: Option<ColumnLayout>,
}

/// Fully resolved parameters for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedQuery {
    pub window: BinWindow,
    pub top_n: usize,
    pub conversion: UnitConversion,
    pub layout: ColumnLayout,
    pub coverage_tolerance: Option<f64>,
}

impl ResolvedQuery {
    pub fn bin_options(&self) -> BinOptions {
        BinOptions {
            coverage_tolerance: self.coverage_tolerance,
        }
    }
}

impl QueryConfig {
    /// Reads a YAML config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, LinesenseError> {
        let data = fs::read_to_string(path).map_err(|source| LinesenseError::File {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&data).map_err(|source| LinesenseError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `other` on `self`: any field set in `other` replaces ours.
    pub fn merged_with(self, other: QueryConfig) -> Self {
        Self {
            start_wavelength: other.start_wavelength.or(self.start_wavelength),
            end_wavelength: other.end_wavelength.or(self.end_wavelength),
            bin_size: other.bin_size.or(self.bin_size),
            top_n: other.top_n.or(self.top_n),
            conversion_constant: other.conversion_constant.or(self.conversion_constant),
            check_coverage: other.check_coverage.or(self.check_coverage),
            coverage_tolerance: other.coverage_tolerance.or(self.coverage_tolerance),
            columns: other.columns.or(self.columns),
        }
    }

    /// Column layout and conversion only; enough to load a catalog.
    pub fn catalog_settings(&self) -> Result<(ColumnLayout, UnitConversion), LinesenseError> {
        let layout = self.columns.clone().unwrap_or_default();
        layout.validate()?;
        let conversion = UnitConversion::with_constant(
            self.conversion_constant
                .unwrap_or(WAVENUMBER_CM_TO_WAVELENGTH_NM),
        );
        Ok((layout, conversion))
    }

    /// Fill defaults and check that the window bounds are present.
    pub fn resolve(&self) -> Result<ResolvedQuery, LinesenseError> {
        let start = self.start_wavelength.ok_or_else(|| LinesenseError::InvalidConfig {
            message: "start wavelength is required (--start or start_wavelength)".to_string(),
        })?;
        let end = self.end_wavelength.ok_or_else(|| LinesenseError::InvalidConfig {
            message: "end wavelength is required (--end or end_wavelength)".to_string(),
        })?;

        let tolerance = self.coverage_tolerance.unwrap_or(DEFAULT_COVERAGE_TOLERANCE);
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(LinesenseError::InvalidConfig {
                message: format!(
                    "coverage tolerance must be finite and non-negative, got {tolerance}"
                ),
            });
        }

        let window = BinWindow {
            start,
            end,
            bin_size: self.bin_size.unwrap_or(DEFAULT_BIN_SIZE),
        };
        window.validate()?;

        let (layout, conversion) = self.catalog_settings()?;
        Ok(ResolvedQuery {
            window,
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            conversion,
            layout,
            coverage_tolerance: if self.check_coverage.unwrap_or(true) {
                Some(tolerance)
            } else {
                None
            },
        })
    }
}
