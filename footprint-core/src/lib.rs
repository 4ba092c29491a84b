//! # footprint-core
//!
//! Data model for simulating how a linear DNA fiber, partially shielded by bound
//! nucleosomes, fragments under randomly placed radiation-induced breaks.
//!
//! The types here are shared by the simulation engine (`footprint-sim`) and the CLI:
//!
//! - [`models::FiberGeometry`] - linker / nucleosome layout of the synthetic fiber
//! - [`models::ProbabilitySpec`] - constant or per-position nucleosome protection
//! - [`models::CleavageProfile`] - per-nucleotide cleavage probability
//! - [`models::AggregateDistribution`] - fragment lengths and midpoints across trials
//! - [`models::VPlotHistogram`] - fragment length vs. midpoint 2D histogram
//! - [`models::SimulationConfig`] - the full parameter set, loaded from YAML or TOML

pub mod consts;
pub mod errors;
pub mod models;

pub use errors::{FootprintError, Result};
