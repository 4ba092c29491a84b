use serde::{Deserialize, Serialize};

use crate::errors::{FootprintError, Result};

///
/// Layout of the synthetic chromatin fiber: `num_nucs` nucleosomes of `wrap` bp each,
/// bracketed by linkers of `nrl - wrap` bp (one leading and one trailing linker).
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiberGeometry {
    pub nrl: usize,
    pub wrap: usize,
    pub num_nucs: usize,
    pub dyad_width: usize,
    pub dyad_enabled: bool,
}

impl FiberGeometry {
    pub fn new(
        nrl: usize,
        wrap: usize,
        num_nucs: usize,
        dyad_width: usize,
        dyad_enabled: bool,
    ) -> Result<Self> {
        if nrl == 0 {
            return Err(FootprintError::InvalidGeometry(
                "nucleosome repeat length must be positive".to_string(),
            ));
        }
        if wrap > nrl {
            return Err(FootprintError::InvalidGeometry(format!(
                "wrap ({}) exceeds nucleosome repeat length ({})",
                wrap, nrl
            )));
        }

        Ok(Self {
            nrl,
            wrap,
            num_nucs,
            dyad_width,
            dyad_enabled,
        })
    }

    pub fn linker_length(&self) -> usize {
        self.nrl - self.wrap
    }

    ///
    /// Total fiber length: `linker * (num_nucs + 1) + wrap * num_nucs`
    ///
    pub fn fiber_length(&self) -> usize {
        self.linker_length() * (self.num_nucs + 1) + self.wrap * self.num_nucs
    }

    pub fn fiber_midpoint(&self) -> f64 {
        self.fiber_length() as f64 / 2.0
    }
}
