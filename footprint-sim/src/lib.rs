//! # footprint-sim: stochastic breakage of nucleosome-protected DNA
//!
//! Forward-simulates radiation-induced fragmentation of a synthetic chromatin fiber
//! and summarises the fragments as a v-plot and a fragment length distribution.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`profile`] builds the per-nucleotide cleavage probability profile
//! 2. [`planner`] calibrates how many break attempts realise the target break rate
//! 3. [`simulate`] runs independent Monte Carlo trials in parallel and merges their fragments
//! 4. [`aggregate`] bins the merged fragments into a v-plot and a length distribution
//!
//! [`io`] persists the artifacts of each stage; none of the computing stages touch storage.
//!
//! ```rust,ignore
//! use footprint_core::models::SimulationConfig;
//! use footprint_sim::{ProbabilityModel, SimulationOptions, run_all};
//! use footprint_sim::aggregate::{build_vplot_with_bins, with_relative_midpoints};
//!
//! let config = SimulationConfig::default();
//! let geometry = config.geometry()?;
//! let profile = ProbabilityModel::from_config(&config).build(&geometry)?;
//!
//! let output = run_all(&profile, &SimulationOptions::from_config(&config))?;
//! let relative = with_relative_midpoints(&output.aggregate, geometry.fiber_midpoint());
//! let vplot = build_vplot_with_bins(&relative, config.vplot_bins()?);
//! ```

pub mod aggregate;
pub mod io;
pub mod planner;
pub mod profile;
pub mod simulate;

pub use aggregate::{
    build_length_distribution, build_vplot, build_vplot_with_bins, with_relative_midpoints,
};
pub use planner::{BreakPlan, compute_attempts};
pub use profile::{ProbabilityModel, build_profile};
pub use simulate::{SimulationOptions, SimulationOutput, SimulationStats, run_all, run_trial};
