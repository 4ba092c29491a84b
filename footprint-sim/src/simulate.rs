//! Monte Carlo breakage trials and their aggregation.

use footprint_core::errors::{FootprintError, Result};
use footprint_core::models::{
    AggregateDistribution, CleavageProfile, Fragment, SimulationConfig, TrialResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::planner::{BreakPlan, compute_attempts};

// ============================================================================
// Single trial
// ============================================================================

///
/// Run one trial: sample `attempt_count` positions uniformly with replacement, accept
/// each with the profile's probability at that position, and cut the fiber at every
/// position with at least one accepted attempt.
///
/// Fragments span consecutive breaks. The region after the last break yields no
/// fragment, and neither does the region before the first one; fewer than two breaks
/// means no fragments at all.
///
pub fn run_trial<R: Rng>(
    profile: &CleavageProfile,
    attempt_count: usize,
    rng: &mut R,
) -> TrialResult {
    let probs = profile.as_slice();
    if probs.is_empty() {
        return TrialResult::default();
    }

    let mut breaks: Vec<u64> = Vec::new();
    let mut successful_attempts = 0;

    for _ in 0..attempt_count {
        let position = rng.random_range(0..probs.len());
        let draw: f64 = rng.random();
        if draw < probs[position] {
            successful_attempts += 1;
            breaks.push(position as u64);
        }
    }

    // repeated hits on one position are a single break
    breaks.sort_unstable();
    breaks.dedup();

    let fragments = breaks
        .windows(2)
        .map(|pair| Fragment::new(pair[0], pair[1]))
        .collect();

    TrialResult {
        fragments,
        attempts: attempt_count,
        successful_attempts,
        breaks: breaks.len(),
    }
}

// ============================================================================
// Full run
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    pub trials: usize,
    /// One break per this many nucleotides
    pub break_rate: f64,
    /// Fragments must be strictly longer than this to be kept
    pub min_fragment_length: u64,
    /// Run seed; drawn at random (and logged) when unset
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl SimulationOptions {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            trials: config.trials,
            break_rate: config.break_rate,
            min_fragment_length: config.min_fragment_length,
            seed: config.seed,
            show_progress: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Counters accumulated over every trial of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub trials: usize,
    pub attempts: u64,
    pub successful_attempts: u64,
    pub breaks: u64,
    /// Trials with fewer than two breaks
    pub empty_trials: usize,
    pub fragments_before_filter: usize,
    pub fragments_after_filter: usize,
}

impl SimulationStats {
    fn record(&mut self, trial: &TrialResult) {
        self.trials += 1;
        self.attempts += trial.attempts as u64;
        self.successful_attempts += trial.successful_attempts as u64;
        self.breaks += trial.breaks as u64;
        self.fragments_before_filter += trial.fragments.len();
        if trial.fragments.is_empty() {
            self.empty_trials += 1;
        }
    }

    /// Mean successful attempts per trial; compare against `BreakPlan::expected_breaks`.
    pub fn mean_successful_attempts(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.successful_attempts as f64 / self.trials as f64
    }

    pub fn mean_breaks(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.breaks as f64 / self.trials as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub aggregate: AggregateDistribution,
    pub plan: BreakPlan,
    pub stats: SimulationStats,
    pub seed: u64,
}

/// Seed of one trial's random stream
pub fn trial_seed(run_seed: u64, trial_index: usize) -> u64 {
    run_seed.wrapping_add(trial_index as u64)
}

fn trial_progress_bar(trials: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(trials as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

///
/// Calibrate attempts for `1 / break_rate` breaks per nucleotide, run every trial in
/// parallel, concatenate their fragments in trial order, and drop fragments no longer
/// than `min_fragment_length`.
///
/// Each trial draws from its own `StdRng` seeded with `run_seed + trial_index`, so the
/// output depends only on the seed, never on thread scheduling.
///
pub fn run_all(profile: &CleavageProfile, options: &SimulationOptions) -> Result<SimulationOutput> {
    if options.trials == 0 {
        return Err(FootprintError::InvalidSimulationConfig(
            "trials must be positive".to_string(),
        ));
    }
    if !(options.break_rate.is_finite() && options.break_rate > 0.0) {
        return Err(FootprintError::InvalidSimulationConfig(format!(
            "break_rate must be a positive number, got {}",
            options.break_rate
        )));
    }

    let plan = compute_attempts(profile, 1.0 / options.break_rate)?;
    info!(
        "Calibrated {} attempts per trial for {:.2} expected breaks (mean cleavage probability {:.4})",
        plan.attempt_count, plan.expected_breaks, plan.mean_probability
    );

    let run_seed = options.seed.unwrap_or_else(|| rand::rng().random());
    info!("Running {} trials with seed {}", options.trials, run_seed);

    let pb = trial_progress_bar(options.trials, options.show_progress);

    let results: Vec<TrialResult> = (0..options.trials)
        .into_par_iter()
        .map(|trial_index| {
            let mut rng = StdRng::seed_from_u64(trial_seed(run_seed, trial_index));
            let result = run_trial(profile, plan.attempt_count, &mut rng);
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_with_message("Trials complete");

    let mut stats = SimulationStats::default();
    let mut aggregate = AggregateDistribution::new();
    for trial in &results {
        stats.record(trial);
        aggregate.extend_from_trial(trial);
    }

    let aggregate = aggregate.retain_longer_than(options.min_fragment_length);
    stats.fragments_after_filter = aggregate.len();

    debug!(
        "{} fragments from {} trials ({} kept after length > {} filter, {} empty trials)",
        stats.fragments_before_filter,
        stats.trials,
        stats.fragments_after_filter,
        options.min_fragment_length,
        stats.empty_trials
    );
    if aggregate.is_empty() {
        warn!("No fragments survived filtering; downstream histograms will be empty");
    }

    Ok(SimulationOutput {
        aggregate,
        plan,
        stats,
        seed: run_seed,
    })
}
