//! Line catalogs: reading HITRAN-style line lists and converting them to the
//! wavelength domain.
//!
//! ```text
//!  line list (.out)
//!        │  io_line_list: fixed columns → ParsedLine (file order)
//!        ▼
//!  Vec<ParsedLine>
//!        │  convert: λ = c / ν̃, reverse → ascending wavelength
//!        ▼
//!  LineCatalog
//! ```

mod convert;
pub mod io_line_list;
mod model;
mod summary;

pub use convert::{to_wavelength_catalog, UnitConversion, WAVENUMBER_CM_TO_WAVELENGTH_NM};
pub use io_line_list::{from_line_list_str, read_line_list, species_from_file_name};
pub use model::{ColumnLayout, LineCatalog, LineRecord, ParsedLine};
pub use summary::{summarize_catalog, CatalogSummary};

use std::path::Path;

use crate::error::LinesenseError;

/// Read a line list and convert it to a wavelength-ascending catalog.
///
/// The species label is taken from the file name.
pub fn load_catalog(
    path: &Path,
    layout: &ColumnLayout,
    conversion: &UnitConversion,
) -> Result<LineCatalog, LinesenseError> {
    let lines = read_line_list(path, layout)?;
    let mut catalog = to_wavelength_catalog(lines, conversion)?;
    catalog.species = species_from_file_name(path);
    Ok(catalog)
}
