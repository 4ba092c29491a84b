use serde::{Deserialize, Serialize};

use crate::errors::{FootprintError, Result};

///
/// DNA segment between two consecutive successful breaks of one trial.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub start: u64,
    pub end: u64,
}

impl Fragment {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    /// Rounded mean of both break positions; exact halves round to even.
    pub fn midpoint(&self) -> u64 {
        ((self.start + self.end) as f64 / 2.0).round_ties_even() as u64
    }
}

///
/// Everything one Monte Carlo trial produced.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialResult {
    pub fragments: Vec<Fragment>,
    /// Number of sampled break attempts
    pub attempts: usize,
    /// Attempts whose Bernoulli draw succeeded, duplicates included
    pub successful_attempts: usize,
    /// Distinct positions with at least one successful attempt
    pub breaks: usize,
}

///
/// Fragment lengths and midpoints concatenated over all trials.
/// `lengths[i]` and `midpoints[i]` always describe the same fragment.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateDistribution {
    lengths: Vec<u64>,
    midpoints: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSummary {
    pub count: usize,
    pub min_length: u64,
    pub max_length: u64,
    pub mean_length: f64,
    pub median_length: f64,
}

impl AggregateDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &Fragment) {
        self.lengths.push(fragment.length());
        self.midpoints.push(fragment.midpoint());
    }

    pub fn extend_from_trial(&mut self, trial: &TrialResult) {
        self.lengths.reserve(trial.fragments.len());
        self.midpoints.reserve(trial.fragments.len());
        for fragment in &trial.fragments {
            self.push(fragment);
        }
    }

    ///
    /// Keep only fragments strictly longer than `min_length`, masking lengths and
    /// midpoints together.
    ///
    pub fn retain_longer_than(self, min_length: u64) -> Self {
        let (lengths, midpoints) = self
            .lengths
            .into_iter()
            .zip(self.midpoints)
            .filter(|(length, _)| *length > min_length)
            .unzip();

        Self { lengths, midpoints }
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    pub fn midpoints(&self) -> &[u64] {
        &self.midpoints
    }

    /// (length, midpoint) pairs
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.lengths.iter().copied().zip(self.midpoints.iter().copied())
    }

    pub fn summary(&self) -> Result<FragmentSummary> {
        if self.lengths.is_empty() {
            return Err(FootprintError::EmptyAggregate);
        }

        let mut sorted = self.lengths.clone();
        sorted.sort_unstable();

        let count = sorted.len();
        let mean_length = sorted.iter().map(|&l| l as f64).sum::<f64>() / count as f64;
        let median_length = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) as f64 / 2.0
        } else {
            sorted[count / 2] as f64
        };

        Ok(FragmentSummary {
            count,
            min_length: sorted[0],
            max_length: sorted[count - 1],
            mean_length,
            median_length,
        })
    }
}

///
/// Aggregate distribution with each midpoint re-expressed relative to the fiber center.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeDistribution {
    pub lengths: Vec<u64>,
    pub midpoints: Vec<u64>,
    pub relative_midpoints: Vec<f64>,
    pub fiber_midpoint: f64,
}

impl RelativeDistribution {
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// (length, midpoint, relative midpoint) records
    pub fn records(&self) -> impl Iterator<Item = (u64, u64, f64)> + '_ {
        self.lengths
            .iter()
            .zip(&self.midpoints)
            .zip(&self.relative_midpoints)
            .map(|((&l, &m), &r)| (l, m, r))
    }
}
