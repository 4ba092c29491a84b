use serde::{Deserialize, Serialize};

use crate::errors::{FootprintError, Result};

///
/// Nucleosome protection: a single probability for every wrapped position,
/// or one probability per wrapped position.
///
/// Deserializes from either a bare float or a list of floats.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbabilitySpec {
    Constant(f64),
    Explicit(Vec<f64>),
}

impl ProbabilitySpec {
    ///
    /// Expand to a per-position array of exactly `wrap` values.
    ///
    pub fn resolve(&self, wrap: usize) -> Result<Vec<f64>> {
        match self {
            ProbabilitySpec::Constant(p) => Ok(vec![*p; wrap]),
            ProbabilitySpec::Explicit(probs) => {
                if probs.len() != wrap {
                    return Err(FootprintError::InvalidProfileLength {
                        expected: wrap,
                        found: probs.len(),
                    });
                }
                Ok(probs.clone())
            }
        }
    }

    ///
    /// Resolve the `wrap`-long nucleosome segment and, when `dyad` carries
    /// `(dyad_width, peak)`, add the dyad gradient on top of the baseline.
    /// Every resulting value must lie in [0, 1].
    ///
    pub fn nucleosome_segment(&self, wrap: usize, dyad: Option<(usize, f64)>) -> Result<Vec<f64>> {
        let mut segment = self.resolve(wrap)?;

        if let Some((dyad_width, peak)) = dyad {
            check_probability(0, peak)?;
            let gradient = dyad_gradient(wrap, dyad_width, peak)?;
            for (value, extra) in segment.iter_mut().zip(gradient) {
                *value += extra;
            }
        }

        for (position, &value) in segment.iter().enumerate() {
            check_probability(position, value)?;
        }

        Ok(segment)
    }
}

///
/// Symmetric gradient over a `wrap`-long segment: zero padding at both edges, then a
/// linear ramp from 0 to `peak` over `dyad_width / 2` positions, mirrored about the dyad.
///
pub fn dyad_gradient(wrap: usize, dyad_width: usize, peak: f64) -> Result<Vec<f64>> {
    let half = dyad_width / 2;
    if 2 * half > wrap {
        return Err(FootprintError::InvalidProfileLength {
            expected: wrap,
            found: 2 * half,
        });
    }

    let ramp: Vec<f64> = match half {
        0 => Vec::new(),
        1 => vec![peak],
        _ => (0..half)
            .map(|i| peak * (i as f64 / (half - 1) as f64))
            .collect(),
    };

    let padding = wrap - 2 * half;
    let left = padding / 2;
    let right = padding - left;

    let mut gradient = Vec::with_capacity(wrap);
    gradient.extend(std::iter::repeat_n(0.0, left));
    gradient.extend_from_slice(&ramp);
    gradient.extend(ramp.iter().rev());
    gradient.extend(std::iter::repeat_n(0.0, right));

    Ok(gradient)
}

impl Default for ProbabilitySpec {
    fn default() -> Self {
        ProbabilitySpec::Constant(crate::consts::DEFAULT_NUC_PROB)
    }
}

impl From<f64> for ProbabilitySpec {
    fn from(value: f64) -> Self {
        ProbabilitySpec::Constant(value)
    }
}

impl From<Vec<f64>> for ProbabilitySpec {
    fn from(value: Vec<f64>) -> Self {
        ProbabilitySpec::Explicit(value)
    }
}

/// Check that a single probability lies in [0, 1]; NaN is rejected.
pub fn check_probability(position: usize, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FootprintError::InvalidProbabilityValue { position, value })
    }
}
