use ndarray::Array1;

use crate::errors::{FootprintError, Result};
use crate::models::probability::check_probability;

///
/// Per-nucleotide cleavage probability along the fiber.
///
/// Built once per configuration and only ever read afterwards; simulation
/// trials share it by reference.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CleavageProfile {
    probs: Vec<f64>,
}

impl CleavageProfile {
    ///
    /// Wrap an assembled probability vector, rejecting values outside [0, 1].
    ///
    pub fn new(probs: Vec<f64>) -> Result<Self> {
        for (position, &value) in probs.iter().enumerate() {
            check_probability(position, value)?;
        }
        Ok(Self { probs })
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.probs.get(position).copied()
    }

    ///
    /// Mean cleavage probability, i.e. the success probability of an attempt at a
    /// uniformly random position. `DegenerateProfile` for an empty profile.
    ///
    pub fn mean(&self) -> Result<f64> {
        if self.probs.is_empty() {
            return Err(FootprintError::DegenerateProfile);
        }
        Ok(self.probs.iter().sum::<f64>() / self.probs.len() as f64)
    }

    ///
    /// Slice `[center - half_width, center + half_width)`, clamped to the fiber.
    ///
    pub fn window(&self, center: usize, half_width: usize) -> &[f64] {
        let start = center.saturating_sub(half_width).min(self.probs.len());
        let end = center.saturating_add(half_width).min(self.probs.len());
        &self.probs[start..end]
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_vec(self.probs.clone())
    }
}
