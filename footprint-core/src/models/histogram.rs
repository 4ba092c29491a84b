use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::errors::{FootprintError, Result};

///
/// V-plot: fragment counts over (relative-midpoint bin x length bin).
///
/// Row `i` covers relative midpoints `[midpoint_edges[i], midpoint_edges[i + 1])`,
/// column `j` covers lengths `[length_edges[j], length_edges[j + 1])`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct VPlotHistogram {
    pub counts: Array2<u64>,
    pub bins: VPlotBins,
}

/// Bin-edge metadata persisted next to the count matrix.
///
/// Only built through [`VPlotBins::new`], so both dimensions are always non-zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VPlotBins {
    max_fragment_length: u64,
    distance_from_center: u64,
    bin_lens: u64,
    bin_locs: u64,
    midpoint_edges: Vec<f64>,
    length_edges: Vec<f64>,
    shape: (usize, usize),
}

impl VPlotBins {
    ///
    /// Evenly spaced edges: midpoints from `-distance_from_center` to
    /// `+distance_from_center` in steps of `bin_locs`, lengths from 0 to
    /// `max_fragment_length` in steps of `bin_lens`.
    ///
    /// Both ranges must be positive and evenly divided by their bin width.
    ///
    pub fn new(
        max_fragment_length: u64,
        distance_from_center: u64,
        bin_lens: u64,
        bin_locs: u64,
    ) -> Result<Self> {
        if max_fragment_length == 0 || distance_from_center == 0 {
            return Err(FootprintError::InvalidBinningConfig(format!(
                "max_fragment_length ({}) and distance_from_center ({}) must be positive",
                max_fragment_length, distance_from_center
            )));
        }
        if bin_lens == 0 || bin_locs == 0 {
            return Err(FootprintError::InvalidBinningConfig(format!(
                "bin widths must be positive (bin_lens = {}, bin_locs = {})",
                bin_lens, bin_locs
            )));
        }
        if max_fragment_length % bin_lens != 0 {
            return Err(FootprintError::InvalidBinningConfig(format!(
                "bin_lens ({}) does not evenly divide max_fragment_length ({})",
                bin_lens, max_fragment_length
            )));
        }
        let span = 2 * distance_from_center;
        if span % bin_locs != 0 {
            return Err(FootprintError::InvalidBinningConfig(format!(
                "bin_locs ({}) does not evenly divide the midpoint range ({})",
                bin_locs, span
            )));
        }

        let n_locs = (span / bin_locs) as usize;
        let n_lens = (max_fragment_length / bin_lens) as usize;

        let lower = -(distance_from_center as f64);
        let midpoint_edges = (0..=n_locs)
            .map(|i| lower + (i as u64 * bin_locs) as f64)
            .collect();
        let length_edges = (0..=n_lens)
            .map(|j| (j as u64 * bin_lens) as f64)
            .collect();

        Ok(Self {
            max_fragment_length,
            distance_from_center,
            bin_lens,
            bin_locs,
            midpoint_edges,
            length_edges,
            shape: (n_locs, n_lens),
        })
    }

    pub fn max_fragment_length(&self) -> u64 {
        self.max_fragment_length
    }

    pub fn distance_from_center(&self) -> u64 {
        self.distance_from_center
    }

    pub fn bin_lens(&self) -> u64 {
        self.bin_lens
    }

    pub fn bin_locs(&self) -> u64 {
        self.bin_locs
    }

    pub fn midpoint_edges(&self) -> &[f64] {
        &self.midpoint_edges
    }

    pub fn length_edges(&self) -> &[f64] {
        &self.length_edges
    }

    /// (midpoint bins, length bins)
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
}

impl VPlotHistogram {
    pub fn empty(bins: VPlotBins) -> Self {
        Self {
            counts: Array2::zeros(bins.shape),
            bins,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.counts.dim()
    }

    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    ///
    /// Counts rescaled to [0, 1] within each midpoint bin (row), by that row's
    /// minimum and maximum over the length bins. A flat row maps to zeros.
    ///
    pub fn min_max_normalized(&self) -> Array2<f64> {
        let mut normalized = Array2::zeros(self.counts.dim());

        for (counts, mut out) in self
            .counts
            .axis_iter(Axis(0))
            .zip(normalized.axis_iter_mut(Axis(0)))
        {
            let min = counts.iter().copied().min().unwrap_or(0);
            let max = counts.iter().copied().max().unwrap_or(0);
            if max == min {
                continue;
            }

            let range = (max - min) as f64;
            out.assign(&counts.mapv(|c| (c - min) as f64 / range));
        }

        normalized
    }
}

///
/// Fragment length distribution binned at a fixed width. Bins are aligned to
/// multiples of `bin_width`, from the one holding the shortest fragment to the
/// one holding the longest.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthDistribution {
    pub bin_width: u64,
    /// Lower edge of each bin
    pub bin_starts: Vec<u64>,
    pub counts: Vec<u64>,
    pub probabilities: Vec<f64>,
}

impl LengthDistribution {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// (start, end, count, probability) rows
    pub fn rows(&self) -> impl Iterator<Item = (u64, u64, u64, f64)> + '_ {
        self.bin_starts
            .iter()
            .zip(&self.counts)
            .zip(&self.probabilities)
            .map(|((&start, &count), &p)| (start, start + self.bin_width, count, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use pretty_assertions::assert_eq;

    fn histogram(counts: Array2<u64>) -> VPlotHistogram {
        let (rows, cols) = counts.dim();
        let bins = VPlotBins::new(cols as u64, rows as u64, 1, 2).unwrap();
        VPlotHistogram { counts, bins }
    }

    #[test]
    fn test_bins_shape_and_edges() {
        let bins = VPlotBins::new(300, 500, 3, 20).unwrap();
        assert_eq!(bins.shape(), (50, 100));
        assert_eq!(bins.midpoint_edges().len(), 51);
        assert_eq!(bins.midpoint_edges()[0], -500.0);
        assert_eq!(bins.midpoint_edges()[50], 500.0);
        assert_eq!(bins.length_edges()[1], 3.0);
        assert_eq!(bins.length_edges()[100], 300.0);
    }

    #[test]
    fn test_bins_reject_bad_widths() {
        assert!(matches!(
            VPlotBins::new(300, 500, 0, 20),
            Err(FootprintError::InvalidBinningConfig(_))
        ));
        assert!(matches!(
            VPlotBins::new(300, 500, 7, 20),
            Err(FootprintError::InvalidBinningConfig(_))
        ));
        assert!(matches!(
            VPlotBins::new(300, 500, 3, 30),
            Err(FootprintError::InvalidBinningConfig(_))
        ));
        assert!(matches!(
            VPlotBins::new(0, 500, 3, 20),
            Err(FootprintError::InvalidBinningConfig(_))
        ));
    }

    #[test]
    fn test_min_max_normalized() {
        let vplot = histogram(array![[0, 2], [4, 1]]);
        assert_eq!(vplot.total(), 7);
        assert_eq!(
            vplot.min_max_normalized(),
            array![[0.0, 1.0], [1.0, 0.0]]
        );
    }

    #[test]
    fn test_rows_normalize_independently() {
        // rows are midpoint bins; a flat row stays zero
        let vplot = histogram(array![[1, 3, 5], [7, 7, 7], [0, 10, 5]]);
        assert_eq!(
            vplot.min_max_normalized(),
            array![[0.0, 0.5, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.5]]
        );
    }

    #[test]
    fn test_all_zero_normalizes_to_zero() {
        let vplot = histogram(Array2::zeros((3, 2)));
        assert_eq!(vplot.min_max_normalized(), Array2::<f64>::zeros((3, 2)));
    }
}
