//! Sensitivity report types and terminal formatting.

use serde::Serialize;
use std::fmt;

use crate::binning::BinWindow;

/// Scientific notation with a signed, at least two-digit exponent
/// (`5.00e-20`, `2.00e+00`).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scientific {
    pub value: f64,
    pub precision: usize,
}

impl Scientific {
    pub fn new(value: f64, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.*e}", self.precision, self.value);
        // NaN and infinities have no exponent.
        let Some((mantissa, exponent)) = text.split_once('e') else {
            return f.write_str(&text);
        };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        write!(f, "{mantissa}e{sign}{digits:0>2}")
    }
}

/// A bin picked by [`top_sensitivity_bins`](super::top_sensitivity_bins).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensitiveBin {
    /// Position on the bin axis.
    pub index: usize,
    pub midpoint: f64,
    /// Summed intensity of the bin.
    pub intensity: f64,
    pub line_count: usize,
}

/// Result of [`line_count_in_range`](super::line_count_in_range).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RangeLineCount {
    pub start: f64,
    pub end: f64,
    /// Lines summed over the matched bins.
    pub count: usize,
    /// Bins whose midpoint fell in `[start, end)`.
    pub matched_bins: usize,
}

impl RangeLineCount {
    /// False when no bin midpoint fell in the range ("no data").
    pub fn has_data(&self) -> bool {
        self.matched_bins > 0
    }
}

impl fmt::Display for RangeLineCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_data() {
            write!(
                f,
                "Number of lines in the range {}-{} nm: {}",
                self.start, self.end, self.count
            )
        } else {
            write!(f, "No data in the range {}-{} nm.", self.start, self.end)
        }
    }
}

/// Everything the `bin` command prints.
#[derive(Clone, Debug, Serialize)]
pub struct SensitivityReport {
    pub species: Option<String>,
    pub window: BinWindow,
    /// Number of bins on the axis.
    pub bins: usize,
    /// Lines that passed the window filter.
    pub filtered_lines: usize,
    /// Lines that landed in a bin.
    pub binned_lines: usize,
    /// Filtered lines dropped at the right-open boundary.
    pub dropped_lines: usize,
    pub total_intensity: f64,
    /// Requested number of top bins.
    pub top_n: usize,
    pub top_bins: Vec<SensitiveBin>,
    pub range_counts: Vec<RangeLineCount>,
}

impl fmt::Display for SensitivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.species {
            Some(species) => writeln!(f, "{species} sensitivity vs. wavelength")?,
            None => writeln!(f, "Sensitivity vs. wavelength")?,
        }
        writeln!(
            f,
            "  Window:      {:.2}-{:.2} nm, bin size {} nm ({} bins)",
            self.window.start, self.window.end, self.window.bin_size, self.bins
        )?;
        write!(
            f,
            "  Lines:       {} binned of {} in window",
            self.binned_lines, self.filtered_lines
        )?;
        if self.dropped_lines > 0 {
            write!(f, " ({} dropped at the upper edge)", self.dropped_lines)?;
        }
        writeln!(f)?;
        writeln!(f, "  Total:       {}", Scientific::new(self.total_intensity, 2))?;

        writeln!(f)?;
        writeln!(f, "Top bins with highest sensitivities:")?;
        if self.top_bins.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for bin in &self.top_bins {
            writeln!(
                f,
                "Wavelength (nm): {:.2}, Sensitivity: {}",
                bin.midpoint,
                Scientific::new(bin.intensity, 2)
            )?;
        }

        if !self.range_counts.is_empty() {
            writeln!(f)?;
            for range in &self.range_counts {
                writeln!(f, "{range}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SensitivityReport {
        SensitivityReport {
            species: Some("CO2".to_string()),
            window: BinWindow::new(2000.0, 2400.0).with_bin_size(50.0),
            bins: 8,
            filtered_lines: 11,
            binned_lines: 10,
            dropped_lines: 1,
            total_intensity: 6.2e-20,
            top_n: 1,
            top_bins: vec![SensitiveBin {
                index: 4,
                midpoint: 2225.0,
                intensity: 5.0e-20,
                line_count: 1,
            }],
            range_counts: vec![
                RangeLineCount {
                    start: 2000.0,
                    end: 2050.0,
                    count: 3,
                    matched_bins: 1,
                },
                RangeLineCount {
                    start: 2500.0,
                    end: 2600.0,
                    count: 0,
                    matched_bins: 0,
                },
            ],
        }
    }

    #[test]
    fn display_lists_top_bins() {
        let text = report().to_string();
        assert!(text.starts_with("CO2 sensitivity vs. wavelength"));
        assert!(text.contains("Wavelength (nm): 2225.00, Sensitivity: 5.00e-20"));
        assert!(text.contains("(1 dropped at the upper edge)"));
    }

    #[test]
    fn scientific_pads_exponent_to_two_digits() {
        assert_eq!(Scientific::new(1.234e-5, 2).to_string(), "1.23e-05");
        assert_eq!(Scientific::new(5.0e-20, 2).to_string(), "5.00e-20");
        assert_eq!(Scientific::new(2.0, 2).to_string(), "2.00e+00");
        assert_eq!(Scientific::new(0.0, 2).to_string(), "0.00e+00");
        assert_eq!(Scientific::new(-3.5e12, 3).to_string(), "-3.500e+12");
        assert_eq!(Scientific::new(1.0e100, 1).to_string(), "1.0e+100");
        assert_eq!(Scientific::new(f64::INFINITY, 2).to_string(), "inf");
    }

    #[test]
    fn display_uses_two_digit_exponents() {
        let mut report = report();
        report.top_bins[0].intensity = 4.0e-5;
        let text = report.to_string();
        assert!(text.contains("Wavelength (nm): 2225.00, Sensitivity: 4.00e-05"), "{text}");
        assert!(text.contains("Total:       6.20e-20"), "{text}");
    }

    #[test]
    fn display_reports_range_counts_and_no_data() {
        let text = report().to_string();
        assert!(text.contains("Number of lines in the range 2000-2050 nm: 3"));
        assert!(text.contains("No data in the range 2500-2600 nm."));
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_value(report()).expect("serialize report");
        assert_eq!(json["bins"], 8);
        assert_eq!(json["top_bins"][0]["midpoint"], 2225.0);
        assert_eq!(json["range_counts"][1]["matched_bins"], 0);
        assert_eq!(json["window"]["bin_size"], 50.0);
    }
}
