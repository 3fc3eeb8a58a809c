//! Sensitivity queries over a binned profile.
//!
//! "Sensitivity" is the summed line intensity in a wavelength bin. This
//! module answers two questions about a [`BinnedProfile`]: which bins are
//! the most sensitive, and how many lines fall in a given sub-range. Both
//! are read-only; the combined [`SensitivityReport`] renders as text or JSON.

mod report;

pub(crate) use report::Scientific;
pub use report::{RangeLineCount, SensitiveBin, SensitivityReport};

use crate::binning::BinnedProfile;

/// Number of top bins reported when the caller does not say.
pub const DEFAULT_TOP_N: usize = 5;

/// Options for building a sensitivity report.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Number of top bins to list.
    pub top_n: usize,
    /// Sub-ranges `[start, end)` to count lines in, by bin midpoint.
    pub count_ranges: Vec<(f64, f64)>,
    /// Label for the report heading.
    pub species: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            count_ranges: Vec::new(),
            species: None,
        }
    }
}

/// The `n` bins with the greatest summed intensity, strongest first.
///
/// Ties keep axis order (stable sort), so the lower-wavelength bin wins.
/// Asking for more bins than exist returns them all.
pub fn top_sensitivity_bins(profile: &BinnedProfile, n: usize) -> Vec<SensitiveBin> {
    let mut bins: Vec<SensitiveBin> = profile
        .bins()
        .map(|bin| SensitiveBin {
            index: bin.index,
            midpoint: bin.midpoint,
            intensity: bin.intensity,
            line_count: bin.line_count,
        })
        .collect();

    bins.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
    bins.truncate(n);
    bins
}

/// Sum of line counts over bins whose midpoint is in `[range_start, range_end)`.
///
/// A range that matches no bin is not an error; the result reports zero
/// matched bins and [`RangeLineCount::has_data`] is false.
pub fn line_count_in_range(
    profile: &BinnedProfile,
    range_start: f64,
    range_end: f64,
) -> RangeLineCount {
    let mut count = 0;
    let mut matched_bins = 0;
    for (midpoint, line_count) in profile.midpoints().iter().zip(profile.line_counts()) {
        if range_start <= *midpoint && *midpoint < range_end {
            count += line_count;
            matched_bins += 1;
        }
    }

    RangeLineCount {
        start: range_start,
        end: range_end,
        count,
        matched_bins,
    }
}

/// Build the combined report for a profile.
pub fn build_sensitivity_report(
    profile: &BinnedProfile,
    opts: &ReportOptions,
) -> SensitivityReport {
    let range_counts = opts
        .count_ranges
        .iter()
        .map(|&(start, end)| line_count_in_range(profile, start, end))
        .collect();

    SensitivityReport {
        species: opts.species.clone(),
        window: *profile.window(),
        bins: profile.len(),
        filtered_lines: profile.filtered_lines(),
        binned_lines: profile.binned_lines(),
        dropped_lines: profile.dropped_lines(),
        total_intensity: profile.total_intensity(),
        top_n: opts.top_n,
        top_bins: top_sensitivity_bins(profile, opts.top_n),
        range_counts,
    }
}
