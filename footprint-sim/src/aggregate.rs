//! Binning of aggregated fragments into v-plots and length distributions.

use footprint_core::errors::{FootprintError, Result};
use footprint_core::models::{
    AggregateDistribution, LengthDistribution, RelativeDistribution, VPlotBins, VPlotHistogram,
};
use log::warn;

///
/// Attach `midpoint - fiber_midpoint` to every fragment. No filtering.
///
pub fn with_relative_midpoints(
    aggregate: &AggregateDistribution,
    fiber_midpoint: f64,
) -> RelativeDistribution {
    let relative_midpoints = aggregate
        .midpoints()
        .iter()
        .map(|&m| m as f64 - fiber_midpoint)
        .collect();

    RelativeDistribution {
        lengths: aggregate.lengths().to_vec(),
        midpoints: aggregate.midpoints().to_vec(),
        relative_midpoints,
        fiber_midpoint,
    }
}

///
/// Count fragments with `length < max_fragment_length` and
/// `|relative_midpoint| < distance_from_center` into a
/// `(2 * distance_from_center / bin_locs, max_fragment_length / bin_lens)` matrix.
///
/// Fails with `InvalidBinningConfig` before counting anything if a bin width is zero
/// or does not evenly divide its range.
///
pub fn build_vplot(
    distribution: &RelativeDistribution,
    max_fragment_length: u64,
    distance_from_center: u64,
    bin_lens: u64,
    bin_locs: u64,
) -> Result<VPlotHistogram> {
    let bins = VPlotBins::new(max_fragment_length, distance_from_center, bin_lens, bin_locs)?;
    Ok(build_vplot_with_bins(distribution, bins))
}

/// Count fragments into already validated bins.
pub fn build_vplot_with_bins(distribution: &RelativeDistribution, bins: VPlotBins) -> VPlotHistogram {
    let mut vplot = VPlotHistogram::empty(bins);
    let (n_locs, n_lens) = vplot.shape();

    let max_length = vplot.bins.max_fragment_length();
    let distance = vplot.bins.distance_from_center() as f64;
    let bin_locs = vplot.bins.bin_locs() as f64;
    let bin_lens = vplot.bins.bin_lens();

    for (length, _, relative) in distribution.records() {
        if length >= max_length || relative.abs() >= distance {
            continue;
        }

        // clamp guards float rounding right at the upper edge
        let row = (((relative + distance) / bin_locs).floor() as usize).min(n_locs - 1);
        let col = ((length / bin_lens) as usize).min(n_lens - 1);
        vplot.counts[[row, col]] += 1;
    }

    if vplot.total() == 0 {
        warn!(
            "V-plot is empty: no fragments shorter than {} within {} nt of the fiber midpoint",
            max_length,
            vplot.bins.distance_from_center()
        );
    }

    vplot
}

///
/// Fragment length histogram with bins `[k * bin_width, (k + 1) * bin_width)`, from the
/// bin holding the shortest fragment up to the one holding the longest, as counts and
/// as probabilities.
///
pub fn build_length_distribution(
    aggregate: &AggregateDistribution,
    bin_width: u64,
) -> Result<LengthDistribution> {
    if bin_width == 0 {
        return Err(FootprintError::InvalidBinningConfig(
            "length bin width must be positive".to_string(),
        ));
    }

    let (Some(&shortest), Some(&longest)) = (
        aggregate.lengths().iter().min(),
        aggregate.lengths().iter().max(),
    ) else {
        warn!("Fragment length distribution is empty");
        return Ok(LengthDistribution {
            bin_width,
            bin_starts: Vec::new(),
            counts: Vec::new(),
            probabilities: Vec::new(),
        });
    };

    let first = shortest / bin_width;
    let n_bins = (longest / bin_width - first) as usize + 1;
    let mut counts = vec![0u64; n_bins];
    for &length in aggregate.lengths() {
        counts[(length / bin_width - first) as usize] += 1;
    }

    let total = aggregate.len() as f64;
    let probabilities = counts.iter().map(|&c| c as f64 / total).collect();
    let bin_starts = (first..first + n_bins as u64).map(|k| k * bin_width).collect();

    Ok(LengthDistribution {
        bin_width,
        bin_starts,
        counts,
        probabilities,
    })
}
