//! Bin axis and binned profile types.

use serde::Serialize;

use crate::error::LinesenseError;

/// Default bin width in the wavelength unit.
pub const DEFAULT_BIN_SIZE: f64 = 0.5;

/// Upper bound on the number of bins a window may request.
const MAX_BINS: f64 = 50_000_000.0;

/// A wavelength window and bin width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BinWindow {
    pub start: f64,
    pub end: f64,
    pub bin_size: f64,
}

impl BinWindow {
    /// A window using [`DEFAULT_BIN_SIZE`].
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            bin_size: DEFAULT_BIN_SIZE,
        }
    }

    pub fn with_bin_size(mut self, bin_size: f64) -> Self {
        self.bin_size = bin_size;
        self
    }

    /// Checks the window is finite, ordered and has a positive bin width.
    pub fn validate(&self) -> Result<(), LinesenseError> {
        if !(self.start.is_finite() && self.end.is_finite() && self.bin_size.is_finite()) {
            return Err(LinesenseError::InvalidWindow {
                message: format!(
                    "start ({}), end ({}) and bin size ({}) must be finite",
                    self.start, self.end, self.bin_size
                ),
            });
        }
        if self.bin_size <= 0.0 {
            return Err(LinesenseError::InvalidWindow {
                message: format!("bin size must be positive, got {}", self.bin_size),
            });
        }
        if self.start >= self.end {
            return Err(LinesenseError::InvalidWindow {
                message: format!(
                    "start ({}) must be less than end ({})",
                    self.start, self.end
                ),
            });
        }
        Ok(())
    }

    /// Inclusive on both ends.
    #[inline]
    pub fn contains(&self, wavelength: f64) -> bool {
        self.start <= wavelength && wavelength <= self.end
    }
}

/// Contiguous half-open bins `[start + k·w, start + (k+1)·w)`.
///
/// The bin count is `ceil((end - start) / w)`, taken as the smallest `K`
/// with `start + K·w >= end`, so the last upper edge may overshoot `end` by
/// less than one bin width but never falls short of it.
#[derive(Clone, Debug, PartialEq)]
pub struct BinAxis {
    edges: Vec<f64>,
}

impl BinAxis {
    /// Builds the axis for a window.
    pub fn new(window: &BinWindow) -> Result<Self, LinesenseError> {
        window.validate()?;

        let ratio = (window.end - window.start) / window.bin_size;
        if ratio > MAX_BINS {
            return Err(LinesenseError::InvalidWindow {
                message: format!(
                    "window {}-{} with bin size {} needs {:.0} bins (limit {:.0})",
                    window.start, window.end, window.bin_size, ratio, MAX_BINS
                ),
            });
        }
        // Edges are computed from the index, not accumulated, so error does
        // not build up along the axis.
        let edge = |k: usize| window.start + k as f64 * window.bin_size;

        // The ceiling of a rounded ratio can be off by one either way; settle
        // on the smallest count whose last edge reaches `end`.
        let mut bins = (ratio.ceil() as usize).max(1);
        while bins > 1 && edge(bins - 1) >= window.end {
            bins -= 1;
        }
        while edge(bins) < window.end {
            bins += 1;
        }

        Ok(Self {
            edges: (0..=bins).map(edge).collect(),
        })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always false; an axis has at least one bin.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `len() + 1` bin edges, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the bin with `lower <= value < upper`.
    ///
    /// Values below the first edge or at/after the last edge (including
    /// NaN) have no bin.
    pub fn locate(&self, value: f64) -> Option<usize> {
        let above = self.edges.partition_point(|&edge| edge <= value);
        if above == 0 || above > self.len() {
            None
        } else {
            Some(above - 1)
        }
    }

    /// `(lower + upper) / 2` for each bin.
    pub fn midpoints(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }
}

/// One bin of a [`BinnedProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bin {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    pub midpoint: f64,
    pub intensity: f64,
    pub line_count: usize,
}

/// Summed intensities and line counts over a bin axis.
///
/// Produced by [`bin_catalog`](super::bin_catalog) and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinnedProfile {
    pub(crate) window: BinWindow,
    #[serde(skip)]
    pub(crate) edges: Vec<f64>,
    pub(crate) midpoints: Vec<f64>,
    pub(crate) intensity: Vec<f64>,
    pub(crate) line_counts: Vec<usize>,
    /// Records that passed the inclusive window filter.
    pub(crate) filtered_lines: usize,
    /// Filtered records with no bin (right-open edge at `end`).
    pub(crate) dropped_lines: usize,
}

impl BinnedProfile {
    pub fn window(&self) -> &BinWindow {
        &self.window
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn midpoints(&self) -> &[f64] {
        &self.midpoints
    }

    /// Summed intensity per bin ("sensitivity").
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    pub fn line_counts(&self) -> &[usize] {
        &self.line_counts
    }

    pub fn filtered_lines(&self) -> usize {
        self.filtered_lines
    }

    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    /// Lines that landed in some bin.
    pub fn binned_lines(&self) -> usize {
        self.line_counts.iter().sum()
    }

    /// Intensity summed over every bin.
    pub fn total_intensity(&self) -> f64 {
        self.intensity.iter().sum()
    }

    /// Iterate bins in axis order.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..self.len()).map(move |i| Bin {
            index: i,
            lower: self.edges[i],
            upper: self.edges[i + 1],
            midpoint: self.midpoints[i],
            intensity: self.intensity[i],
            line_count: self.line_counts[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rejects_non_positive_bin_size() {
        let err = BinWindow::new(2000.0, 2001.0)
            .with_bin_size(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, LinesenseError::InvalidWindow { .. }));
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        assert!(BinWindow::new(2001.0, 2000.0).validate().is_err());
        assert!(BinWindow::new(2000.0, 2000.0).validate().is_err());
    }

    #[test]
    fn window_rejects_nan() {
        assert!(BinWindow::new(f64::NAN, 2000.0).validate().is_err());
    }

    #[test]
    fn default_bin_size_is_half() {
        assert_eq!(BinWindow::new(0.0, 1.0).bin_size, 0.5);
    }

    #[test]
    fn axis_has_exactly_one_bin_for_one_width_span() {
        let axis = BinAxis::new(&BinWindow::new(2000.0, 2000.1).with_bin_size(0.1)).unwrap();
        assert_eq!(axis.len(), 1);
        assert_eq!(axis.edges(), &[2000.0, 2000.0 + 0.1]);
    }

    #[test]
    fn axis_last_edge_may_overshoot_end() {
        let axis = BinAxis::new(&BinWindow::new(0.0, 1.2).with_bin_size(0.5)).unwrap();
        assert_eq!(axis.len(), 3);
        assert_eq!(axis.edges(), &[0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn axis_reaches_end_just_past_a_whole_bin() {
        let window = BinWindow::new(0.0, 1.000_000_4).with_bin_size(0.5);
        let axis = BinAxis::new(&window).unwrap();
        assert_eq!(axis.len(), 3);
        assert_eq!(axis.edges(), &[0.0, 0.5, 1.0, 1.5]);
        assert_eq!(axis.locate(1.000_000_2), Some(2));
    }

    #[test]
    fn axis_last_edge_never_falls_short_of_end() {
        for (start, end, bin_size) in [
            (2000.0, 2000.2, 0.1),
            (2000.0, 2000.3, 0.1),
            (0.0, 0.3, 0.1),
            (1999.9, 2400.0, 0.05),
            (2000.0, 2000.000_001, 0.5),
        ] {
            let axis = BinAxis::new(&BinWindow::new(start, end).with_bin_size(bin_size)).unwrap();
            let edges = axis.edges();
            assert!(edges[edges.len() - 1] >= end, "{start}-{end} by {bin_size}");
            if axis.len() > 1 {
                assert!(edges[edges.len() - 2] < end, "{start}-{end} by {bin_size}");
            }
        }
    }

    #[test]
    fn axis_bin_count_for_typical_window() {
        let axis = BinAxis::new(&BinWindow::new(2000.0, 2400.0).with_bin_size(0.05)).unwrap();
        assert_eq!(axis.len(), 8000);
        let axis = BinAxis::new(&BinWindow::new(2000.0, 2400.0)).unwrap();
        assert_eq!(axis.len(), 800);
    }

    #[test]
    fn locate_is_right_open() {
        let axis = BinAxis::new(&BinWindow::new(0.0, 2.0).with_bin_size(1.0)).unwrap();
        assert_eq!(axis.locate(0.0), Some(0));
        assert_eq!(axis.locate(0.999), Some(0));
        assert_eq!(axis.locate(1.0), Some(1));
        assert_eq!(axis.locate(1.999), Some(1));
        assert_eq!(axis.locate(2.0), None);
        assert_eq!(axis.locate(-0.1), None);
        assert_eq!(axis.locate(f64::NAN), None);
    }

    #[test]
    fn midpoints_are_bin_centres() {
        let axis = BinAxis::new(&BinWindow::new(10.0, 12.0).with_bin_size(1.0)).unwrap();
        assert_eq!(axis.midpoints(), vec![10.5, 11.5]);
    }

    #[test]
    fn absurd_bin_count_is_rejected() {
        let err = BinAxis::new(&BinWindow::new(0.0, 1e12).with_bin_size(1e-3)).unwrap_err();
        assert!(matches!(err, LinesenseError::InvalidWindow { .. }));
    }
}
