use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::errors::{FootprintError, Result};
use crate::models::geometry::FiberGeometry;
use crate::models::histogram::VPlotBins;
use crate::models::probability::{ProbabilitySpec, check_probability};

/// Configuration for one fragmentation run
///
/// Every stage receives this value (or something derived from it) explicitly.
///
/// # Example
/// ```yaml
/// nrl: 212
/// wrap: 147
/// num_nucs: 121
/// link_prob: 1.0
/// nuc_prob: 0.1
/// trials: 1000
/// break_rate: 150.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub nrl: usize,
    pub wrap: usize,
    pub num_nucs: usize,
    pub link_prob: f64,
    pub nuc_prob: ProbabilitySpec,
    pub dyad_enabled: bool,
    pub dyad_width: usize,
    /// Peak of the dyad gradient; falls back to `link_prob`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dyad_prob: Option<f64>,
    pub trials: usize,
    /// One break per this many nucleotides
    pub break_rate: f64,
    pub min_fragment_length: u64,
    pub max_fragment_length: u64,
    pub distance_from_center: u64,
    pub bin_lens: u64,
    pub bin_locs: u64,
    pub length_bin_width: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    pub output_dir: PathBuf,
    pub compress: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nrl: DEFAULT_NRL,
            wrap: DEFAULT_WRAP,
            num_nucs: DEFAULT_NUM_NUCS,
            link_prob: DEFAULT_LINK_PROB,
            nuc_prob: ProbabilitySpec::Constant(DEFAULT_NUC_PROB),
            dyad_enabled: false,
            dyad_width: DEFAULT_DYAD_WIDTH,
            dyad_prob: None,
            trials: DEFAULT_TRIALS,
            break_rate: DEFAULT_BREAK_RATE,
            min_fragment_length: DEFAULT_MIN_FRAGMENT_LENGTH,
            max_fragment_length: DEFAULT_MAX_FRAGMENT_LENGTH,
            distance_from_center: DEFAULT_DISTANCE_FROM_CENTER,
            bin_lens: DEFAULT_BIN_LENS,
            bin_locs: DEFAULT_BIN_LOCS,
            length_bin_width: DEFAULT_LENGTH_BIN_WIDTH,
            seed: None,
            threads: None,
            output_dir: PathBuf::from("output"),
            compress: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ConfigFormat {
    Yaml,
    Toml,
}

fn config_format(path: &Path) -> anyhow::Result<ConfigFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
        Some("toml") => Ok(ConfigFormat::Toml),
        _ => anyhow::bail!(
            "Unsupported config file extension for {:?} (expected .yaml, .yml or .toml)",
            path
        ),
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file from {:?}", path))?;

        let config: Self = match config_format(path)? {
            ConfigFormat::Yaml => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config from {:?}", path))?,
            ConfigFormat::Toml => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config from {:?}", path))?,
        };

        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = match config_format(path)? {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    pub fn geometry(&self) -> Result<FiberGeometry> {
        FiberGeometry::new(
            self.nrl,
            self.wrap,
            self.num_nucs,
            self.dyad_width,
            self.dyad_enabled,
        )
    }

    pub fn vplot_bins(&self) -> Result<VPlotBins> {
        VPlotBins::new(
            self.max_fragment_length,
            self.distance_from_center,
            self.bin_lens,
            self.bin_locs,
        )
    }

    pub fn breaks_per_nt(&self) -> f64 {
        1.0 / self.break_rate
    }

    ///
    /// Check every parameter a pipeline stage would reject, before any stage runs.
    ///
    pub fn validate(&self) -> Result<()> {
        self.geometry()?;
        check_probability(0, self.link_prob)?;
        if let Some(dyad_prob) = self.dyad_prob {
            check_probability(0, dyad_prob)?;
        }
        let dyad = self
            .dyad_enabled
            .then(|| (self.dyad_width, self.dyad_prob.unwrap_or(self.link_prob)));
        self.nuc_prob.nucleosome_segment(self.wrap, dyad)?;

        if self.trials == 0 {
            return Err(FootprintError::InvalidSimulationConfig(
                "trials must be positive".to_string(),
            ));
        }
        if !(self.break_rate.is_finite() && self.break_rate > 0.0) {
            return Err(FootprintError::InvalidSimulationConfig(format!(
                "break_rate must be a positive number, got {}",
                self.break_rate
            )));
        }

        self.vplot_bins()?;
        if self.length_bin_width == 0 {
            return Err(FootprintError::InvalidBinningConfig(
                "length_bin_width must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
