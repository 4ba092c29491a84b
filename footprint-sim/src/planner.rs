//! Calibration of break attempts against a target breakage rate.

use footprint_core::errors::{FootprintError, Result};
use footprint_core::models::CleavageProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakPlan {
    /// Attempts to sample per trial
    pub attempt_count: usize,
    /// Successful breaks per trial the plan targets
    pub expected_breaks: f64,
    /// Success probability of one attempt at a uniformly random position
    pub mean_probability: f64,
}

///
/// Number of break attempts per trial such that, on average, `breaks_per_nt` breaks per
/// nucleotide succeed.
///
/// Most positions cleave with probability below 1, so attempts are inflated by the
/// inverse mean probability: `attempt_count = floor(expected_breaks / mean(profile))`.
///
pub fn compute_attempts(profile: &CleavageProfile, breaks_per_nt: f64) -> Result<BreakPlan> {
    if !(breaks_per_nt.is_finite() && breaks_per_nt >= 0.0) {
        return Err(FootprintError::InvalidSimulationConfig(format!(
            "breaks per nucleotide must be a non-negative number, got {}",
            breaks_per_nt
        )));
    }

    let mean_probability = profile.mean()?;
    if mean_probability <= 0.0 {
        return Err(FootprintError::DegenerateProfile);
    }

    let expected_breaks = breaks_per_nt * profile.len() as f64;
    let attempt_count = (expected_breaks / mean_probability).floor() as usize;

    Ok(BreakPlan {
        attempt_count,
        expected_breaks,
        mean_probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_exposed_profile() {
        let profile = CleavageProfile::new(vec![1.0; 1000]).unwrap();
        let plan = compute_attempts(&profile, 0.01).unwrap();
        assert_eq!(plan.expected_breaks, 10.0);
        assert_eq!(plan.mean_probability, 1.0);
        assert_eq!(plan.attempt_count, 10);
    }

    #[test]
    fn test_attempts_inflated_by_mean_probability() {
        let mut probs = vec![1.0; 500];
        probs.extend(vec![0.0; 500]);
        let profile = CleavageProfile::new(probs).unwrap();
        let plan = compute_attempts(&profile, 0.01).unwrap();
        assert_eq!(plan.expected_breaks, 10.0);
        assert_eq!(plan.mean_probability, 0.5);
        assert_eq!(plan.attempt_count, 20);
    }

    #[test]
    fn test_attempts_are_floored() {
        let profile = CleavageProfile::new(vec![0.3; 100]).unwrap();
        let plan = compute_attempts(&profile, 0.1).unwrap();
        // 10 / 0.3 = 33.3
        assert_eq!(plan.attempt_count, 33);
    }

    #[test]
    fn test_zero_profile_is_degenerate() {
        let profile = CleavageProfile::new(vec![0.0; 100]).unwrap();
        assert_eq!(
            compute_attempts(&profile, 0.01),
            Err(FootprintError::DegenerateProfile)
        );
    }

    #[test]
    fn test_negative_rate() {
        let profile = CleavageProfile::new(vec![0.5; 100]).unwrap();
        assert!(matches!(
            compute_attempts(&profile, -1.0),
            Err(FootprintError::InvalidSimulationConfig(_))
        ));
    }
}
