//! Per-nucleotide cleavage probability for a synthetic chromatin fiber.

use footprint_core::errors::Result;
use footprint_core::models::probability::check_probability;
pub use footprint_core::models::probability::dyad_gradient;
use footprint_core::models::{CleavageProfile, FiberGeometry, ProbabilitySpec, SimulationConfig};
use log::debug;

/// Protection parameters for the linker and nucleosome segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    pub link_prob: f64,
    pub nuc_prob: ProbabilitySpec,
    /// Peak of the dyad gradient; `link_prob` when unset
    pub dyad_prob: Option<f64>,
}

impl ProbabilityModel {
    pub fn new(link_prob: f64, nuc_prob: ProbabilitySpec) -> Self {
        Self {
            link_prob,
            nuc_prob,
            dyad_prob: None,
        }
    }

    pub fn with_dyad_prob(mut self, dyad_prob: f64) -> Self {
        self.dyad_prob = Some(dyad_prob);
        self
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            link_prob: config.link_prob,
            nuc_prob: config.nuc_prob.clone(),
            dyad_prob: config.dyad_prob,
        }
    }

    ///
    /// Resolve the `wrap`-long nucleosome segment: the baseline protection, plus the
    /// dyad gradient when the geometry enables it.
    ///
    pub fn nucleosome_segment(&self, geometry: &FiberGeometry) -> Result<Vec<f64>> {
        let dyad = geometry
            .dyad_enabled
            .then(|| (geometry.dyad_width, self.dyad_prob.unwrap_or(self.link_prob)));
        self.nuc_prob.nucleosome_segment(geometry.wrap, dyad)
    }

    ///
    /// Assemble `linker, (nucleosome, linker) x num_nucs`.
    ///
    pub fn build(&self, geometry: &FiberGeometry) -> Result<CleavageProfile> {
        check_probability(0, self.link_prob)?;

        let nucleosome = self.nucleosome_segment(geometry)?;
        let linker = vec![self.link_prob; geometry.linker_length()];

        let mut probs = Vec::with_capacity(geometry.fiber_length());
        probs.extend_from_slice(&linker);
        for _ in 0..geometry.num_nucs {
            probs.extend_from_slice(&nucleosome);
            probs.extend_from_slice(&linker);
        }

        debug!(
            "Built cleavage profile: {} nt, {} nucleosomes, linker {} nt",
            probs.len(),
            geometry.num_nucs,
            geometry.linker_length()
        );

        CleavageProfile::new(probs)
    }
}

/// Build a profile with the dyad peak defaulting to `link_prob`.
pub fn build_profile(
    link_prob: f64,
    nuc_prob: &ProbabilitySpec,
    geometry: &FiberGeometry,
) -> Result<CleavageProfile> {
    ProbabilityModel::new(link_prob, nuc_prob.clone()).build(geometry)
}
