//! Fuzz target for whole line-list tables.
//!
//! Parsed tables are also run through wavelength conversion, so any row the
//! parser accepts must either convert or fail with an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use linesense::catalog::{from_line_list_str, to_wavelength_catalog, ColumnLayout, UnitConversion};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(lines) = from_line_list_str(text, &ColumnLayout::default()) {
        let _ = to_wavelength_catalog(lines, &UnitConversion::default());
    }
});
