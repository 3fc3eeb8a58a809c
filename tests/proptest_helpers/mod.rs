#![allow(dead_code)]

use linesense::catalog::{to_wavelength_catalog, LineCatalog, ParsedLine, UnitConversion};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// One generated row: wavenumber (cm^-1), intensity, isotopologue id.
pub type Row = (f64, f64, u32);

/// Rows in the order HITRAN writes them (ascending wavenumber), between
/// 4000 and 5200 cm^-1 (roughly 1923-2500 nm).
pub fn arb_sorted_rows(max_rows: usize) -> BoxedStrategy<Vec<Row>> {
    arb_rows(max_rows)
        .prop_map(|mut rows| {
            rows.sort_by(|a, b| a.0.total_cmp(&b.0));
            rows
        })
        .boxed()
}

/// Rows in arbitrary order.
pub fn arb_rows(max_rows: usize) -> BoxedStrategy<Vec<Row>> {
    prop::collection::vec(
        (4000.0f64..5200.0, 0.0f64..1e-19, 1u32..4),
        0..=max_rows,
    )
    .boxed()
}

/// Render rows as a HITRAN-style `.out` table, inserting a blank line after
/// every row whose flag is set.
pub fn render_table(rows: &[Row], blank_after: &[bool]) -> String {
    let mut text = String::new();
    for (i, (wavenumber, intensity, iso)) in rows.iter().enumerate() {
        text.push_str(&format!(
            "  2  {iso}  {:>4}  {wavenumber:.6}  {intensity:.3E}  1.000E-02\n",
            i + 1
        ));
        if blank_after.get(i).copied().unwrap_or(false) {
            text.push_str("   \n");
        }
    }
    text
}

/// Convert rows straight to a catalog, skipping text.
pub fn catalog_of(rows: &[Row]) -> LineCatalog {
    let lines = rows
        .iter()
        .map(|&(wavenumber, intensity, iso)| ParsedLine {
            isotopologue_id: Some(iso),
            ..ParsedLine::new(wavenumber, intensity)
        })
        .collect();
    to_wavelength_catalog(lines, &UnitConversion::default()).expect("positive wavenumbers")
}
