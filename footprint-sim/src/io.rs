//! Persistence of simulation artifacts. Called only between stages, never from the
//! simulation itself.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use footprint_core::models::{
    AggregateDistribution, CleavageProfile, FragmentSummary, LengthDistribution,
    RelativeDistribution, SimulationConfig, VPlotHistogram,
};
use log::info;
use ndarray::Array1;
use ndarray_npy::{read_npy, write_npy};
use serde::{Deserialize, Serialize};

use crate::planner::BreakPlan;
use crate::simulate::SimulationStats;

pub const PROFILE_FILE: &str = "cleavage_prob.npy";
pub const PROFILE_WINDOW_FILE: &str = "cleavage_prob_window.npy";
pub const LENGTHS_FILE: &str = "frag_lens.npy";
pub const MIDPOINTS_FILE: &str = "frag_midpoints.npy";
pub const VPLOT_FILE: &str = "vplot.npy";
pub const VPLOT_BINS_FILE: &str = "vplot_bins.json";
pub const FLD_FILE: &str = "fld.tsv";
pub const FRAGMENTS_FILE: &str = "fragments.tsv";
pub const SUMMARY_FILE: &str = "run_summary.yaml";

/// Everything needed to reproduce and interpret a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub fiber_length: usize,
    pub fiber_midpoint: f64,
    pub plan: BreakPlan,
    pub stats: SimulationStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragments: Option<FragmentSummary>,
    pub config: SimulationConfig,
}

/// Output locations under one run directory.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub root: PathBuf,
}

impl OutputPaths {
    ///
    /// Create `root` (and parents) if needed.
    ///
    pub fn create(root: &Path) -> Result<Self> {
        create_dir_all(root)
            .with_context(|| format!("Failed to create output directory {:?}", root))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn fragments_file(&self, compress: bool) -> PathBuf {
        if compress {
            self.file(&format!("{}.gz", FRAGMENTS_FILE))
        } else {
            self.file(FRAGMENTS_FILE)
        }
    }
}

pub fn write_profile(profile: &CleavageProfile, path: &Path) -> Result<()> {
    write_npy(path, &profile.to_array())
        .with_context(|| format!("Failed to write cleavage profile to {:?}", path))?;
    Ok(())
}

pub fn write_profile_window(
    profile: &CleavageProfile,
    center: usize,
    half_width: usize,
    path: &Path,
) -> Result<()> {
    let window = Array1::from_vec(profile.window(center, half_width).to_vec());
    write_npy(path, &window)
        .with_context(|| format!("Failed to write profile window to {:?}", path))?;
    Ok(())
}

pub fn read_profile(path: &Path) -> Result<CleavageProfile> {
    let array: Array1<f64> = read_npy(path)
        .with_context(|| format!("Failed to read cleavage profile from {:?}", path))?;
    let profile = CleavageProfile::new(array.to_vec())
        .with_context(|| format!("Invalid cleavage profile in {:?}", path))?;
    Ok(profile)
}

///
/// Lengths and midpoints as two index-aligned `.npy` arrays.
///
pub fn write_aggregate(
    aggregate: &AggregateDistribution,
    lengths_path: &Path,
    midpoints_path: &Path,
) -> Result<()> {
    write_npy(lengths_path, &Array1::from_vec(aggregate.lengths().to_vec()))
        .with_context(|| format!("Failed to write fragment lengths to {:?}", lengths_path))?;
    write_npy(
        midpoints_path,
        &Array1::from_vec(aggregate.midpoints().to_vec()),
    )
    .with_context(|| format!("Failed to write fragment midpoints to {:?}", midpoints_path))?;
    Ok(())
}

pub fn read_aggregate(lengths_path: &Path, midpoints_path: &Path) -> Result<(Vec<u64>, Vec<u64>)> {
    let lengths: Array1<u64> = read_npy(lengths_path)
        .with_context(|| format!("Failed to read fragment lengths from {:?}", lengths_path))?;
    let midpoints: Array1<u64> = read_npy(midpoints_path)
        .with_context(|| format!("Failed to read fragment midpoints from {:?}", midpoints_path))?;
    if lengths.len() != midpoints.len() {
        anyhow::bail!(
            "Fragment arrays are misaligned: {} lengths vs {} midpoints",
            lengths.len(),
            midpoints.len()
        );
    }
    Ok((lengths.to_vec(), midpoints.to_vec()))
}

///
/// Count matrix as `.npy` plus its bin edges as JSON.
///
pub fn write_vplot(vplot: &VPlotHistogram, counts_path: &Path, bins_path: &Path) -> Result<()> {
    write_npy(counts_path, &vplot.counts)
        .with_context(|| format!("Failed to write v-plot counts to {:?}", counts_path))?;

    let file = File::create(bins_path)
        .with_context(|| format!("Failed to create v-plot bins file {:?}", bins_path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &vplot.bins)
        .with_context(|| format!("Failed to write v-plot bins to {:?}", bins_path))?;
    writer.flush()?;
    Ok(())
}

pub fn write_length_distribution(fld: &LengthDistribution, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create length distribution file {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "bin_start\tbin_end\tcount\tprobability")?;
    for (start, end, count, probability) in fld.rows() {
        writeln!(writer, "{}\t{}\t{}\t{}", start, end, count, probability)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_fragment_rows<W: Write>(distribution: &RelativeDistribution, writer: &mut W) -> Result<()> {
    writeln!(writer, "length\tmidpoint\trelative_midpoint")?;
    for (length, midpoint, relative) in distribution.records() {
        writeln!(writer, "{}\t{}\t{}", length, midpoint, relative)?;
    }
    Ok(())
}

///
/// One `length, midpoint, relative_midpoint` row per fragment, gzipped when `compress`.
///
pub fn write_fragment_table(
    distribution: &RelativeDistribution,
    path: &Path,
    compress: bool,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create fragment table {:?}", path))?;

    if compress {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        write_fragment_rows(distribution, &mut encoder)?;
        encoder
            .finish()
            .with_context(|| format!("Failed to finish gzip stream for {:?}", path))?
            .flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        write_fragment_rows(distribution, &mut writer)?;
        writer.flush()?;
    }

    info!("Wrote {} fragments to {}", distribution.len(), path.display());
    Ok(())
}

pub fn write_run_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let content = serde_yaml::to_string(summary)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write run summary to {:?}", path))?;
    Ok(())
}

pub fn read_run_summary(path: &Path) -> Result<RunSummary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read run summary from {:?}", path))?;
    let summary = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse run summary from {:?}", path))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use footprint_core::models::Fragment;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::TempDir;

    use crate::aggregate::with_relative_midpoints;

    fn small_aggregate() -> AggregateDistribution {
        let mut aggregate = AggregateDistribution::new();
        aggregate.push(&Fragment::new(10, 60));
        aggregate.push(&Fragment::new(60, 200));
        aggregate
    }

    #[test]
    fn test_profile_npy() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(PROFILE_FILE);
        let profile = CleavageProfile::new(vec![1.0, 0.5, 0.25, 0.0]).unwrap();

        write_profile(&profile, &path).expect("Failed to write profile");
        let loaded = read_profile(&path).expect("Failed to read profile");
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_aggregate_npy() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = OutputPaths::create(&temp_dir.path().join("run")).unwrap();
        let aggregate = small_aggregate();

        write_aggregate(&aggregate, &paths.file(LENGTHS_FILE), &paths.file(MIDPOINTS_FILE))
            .expect("Failed to write aggregate");
        let (lengths, midpoints) =
            read_aggregate(&paths.file(LENGTHS_FILE), &paths.file(MIDPOINTS_FILE))
                .expect("Failed to read aggregate");
        assert_eq!(lengths, vec![50, 140]);
        assert_eq!(midpoints, vec![35, 130]);
    }

    #[test]
    fn test_gzipped_fragment_table() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = OutputPaths::create(temp_dir.path()).unwrap();
        let path = paths.fragments_file(true);
        assert!(path.to_string_lossy().ends_with("fragments.tsv.gz"));

        let relative = with_relative_midpoints(&small_aggregate(), 100.0);
        write_fragment_table(&relative, &path, true).expect("Failed to write table");

        let mut content = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(
            content,
            "length\tmidpoint\trelative_midpoint\n50\t35\t-65\n140\t130\t30\n"
        );
    }
}
