use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use footprint_core::consts::get_thread_count;
use footprint_core::models::SimulationConfig;
use footprint_sim::io::{self, OutputPaths, RunSummary};
use footprint_sim::{
    ProbabilityModel, SimulationOptions, build_length_distribution, build_vplot_with_bins, run_all,
    with_relative_midpoints,
};

/// Read the config named by `--config`, or fall back to defaults.
pub fn load_config(matches: &ArgMatches) -> Result<SimulationConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => SimulationConfig::from_file(&PathBuf::from(path)),
        None => {
            info!("No --config provided, using default parameters");
            Ok(SimulationConfig::default())
        }
    }
}

pub fn run_simulate(matches: &ArgMatches) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(matches)?;
    if let Some(output) = matches.get_one::<String>("output") {
        config.output_dir = PathBuf::from(output);
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = Some(*threads);
    }
    if matches.get_flag("compress") {
        config.compress = true;
    }
    config.validate().context("Invalid simulation config")?;

    let thread_count = get_thread_count(config.threads);
    info!("Using {} threads for trials", thread_count);
    rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build_global()
        .context("Failed to configure thread pool")?;

    simulate_to_dir(config, !matches.get_flag("no_progress"))?;

    info!(
        "Simulation finished in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

///
/// Run every stage for a validated config, then write all outputs under
/// `config.output_dir`. A failing stage leaves the output directory untouched.
///
pub fn simulate_to_dir(config: SimulationConfig, show_progress: bool) -> Result<()> {
    // stage 1: profile
    let geometry = config.geometry()?;
    let profile = ProbabilityModel::from_config(&config).build(&geometry)?;
    info!(
        "Fiber: {} nt, {} nucleosomes, midpoint {}",
        geometry.fiber_length(),
        geometry.num_nucs,
        geometry.fiber_midpoint()
    );

    // stage 2 + 3: calibrate and simulate
    let options = SimulationOptions::from_config(&config).with_progress(show_progress);
    let output = run_all(&profile, &options)?;
    info!(
        "Observed {:.2} successful breaks per trial (expected {:.2})",
        output.stats.mean_successful_attempts(),
        output.plan.expected_breaks
    );

    // nothing is written until every stage that can fail on the config has run
    let paths = OutputPaths::create(&config.output_dir)?;
    io::write_profile(&profile, &paths.file(io::PROFILE_FILE))?;
    io::write_profile_window(
        &profile,
        geometry.fiber_midpoint() as usize,
        config.distance_from_center as usize,
        &paths.file(io::PROFILE_WINDOW_FILE),
    )?;
    io::write_aggregate(
        &output.aggregate,
        &paths.file(io::LENGTHS_FILE),
        &paths.file(io::MIDPOINTS_FILE),
    )?;

    // stage 4: aggregate
    let relative = with_relative_midpoints(&output.aggregate, geometry.fiber_midpoint());
    let vplot = build_vplot_with_bins(&relative, config.vplot_bins()?);
    let fld = build_length_distribution(&output.aggregate, config.length_bin_width)?;

    io::write_vplot(&vplot, &paths.file(io::VPLOT_FILE), &paths.file(io::VPLOT_BINS_FILE))?;
    io::write_length_distribution(&fld, &paths.file(io::FLD_FILE))?;
    io::write_fragment_table(&relative, &paths.fragments_file(config.compress), config.compress)?;

    let fragments = match output.aggregate.summary() {
        Ok(summary) => {
            info!(
                "{} fragments, length {}-{} (mean {:.1}, median {:.1})",
                summary.count,
                summary.min_length,
                summary.max_length,
                summary.mean_length,
                summary.median_length
            );
            Some(summary)
        }
        Err(e) => {
            warn!("{}; writing empty outputs", e);
            None
        }
    };

    let summary = RunSummary {
        seed: output.seed,
        fiber_length: geometry.fiber_length(),
        fiber_midpoint: geometry.fiber_midpoint(),
        plan: output.plan,
        stats: output.stats,
        fragments,
        config,
    };
    io::write_run_summary(&summary, &paths.file(io::SUMMARY_FILE))?;

    info!("Outputs written to {}", paths.root.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::errors::FootprintError;
    use footprint_core::models::ProbabilitySpec;
    use tempfile::tempdir;

    fn small_config(output_dir: PathBuf) -> SimulationConfig {
        SimulationConfig {
            num_nucs: 10,
            trials: 20,
            seed: Some(11),
            max_fragment_length: 300,
            distance_from_center: 500,
            output_dir,
            ..Default::default()
        }
    }

    #[test]
    fn test_degenerate_profile_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("out");
        let config = SimulationConfig {
            link_prob: 0.0,
            nuc_prob: ProbabilitySpec::Constant(0.0),
            ..small_config(output_dir.clone())
        };
        assert!(config.validate().is_ok());

        let err = simulate_to_dir(config, false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FootprintError>(),
            Some(&FootprintError::DegenerateProfile)
        );
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_simulate_writes_outputs() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("out");
        simulate_to_dir(small_config(output_dir.clone()), false).unwrap();

        for name in [
            io::PROFILE_FILE,
            io::PROFILE_WINDOW_FILE,
            io::LENGTHS_FILE,
            io::MIDPOINTS_FILE,
            io::VPLOT_FILE,
            io::VPLOT_BINS_FILE,
            io::FLD_FILE,
            io::SUMMARY_FILE,
        ] {
            assert!(output_dir.join(name).exists(), "missing {}", name);
        }
    }
}
