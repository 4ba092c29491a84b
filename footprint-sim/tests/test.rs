use footprint_core::errors::FootprintError;
use footprint_core::models::{FiberGeometry, ProbabilitySpec, SimulationConfig};
use footprint_sim::io::{self, OutputPaths, RunSummary};
use footprint_sim::{
    ProbabilityModel, SimulationOptions, build_length_distribution, build_profile, build_vplot,
    build_vplot_with_bins, compute_attempts, run_all, run_trial, with_relative_midpoints,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::*;
use tempfile::tempdir;

#[fixture]
fn default_geometry() -> FiberGeometry {
    FiberGeometry::new(212, 147, 121, 20, false).unwrap()
}

#[fixture]
fn small_config() -> SimulationConfig {
    SimulationConfig {
        num_nucs: 20,
        trials: 50,
        seed: Some(2024),
        max_fragment_length: 300,
        distance_from_center: 500,
        bin_lens: 3,
        bin_locs: 20,
        ..Default::default()
    }
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(147)]
    #[case(160)]
    fn test_constant_and_explicit_profiles_agree(#[case] wrap: usize) {
        let geometry = FiberGeometry::new(wrap + 50, wrap, 5, 0, false).unwrap();
        let constant = build_profile(0.9, &ProbabilitySpec::Constant(0.3), &geometry).unwrap();
        let explicit =
            build_profile(0.9, &ProbabilitySpec::Explicit(vec![0.3; wrap]), &geometry).unwrap();
        assert_eq!(constant, explicit);
        assert_eq!(constant.len(), 50 * 6 + wrap * 5);
    }

    #[rstest]
    fn test_short_explicit_array_is_rejected(default_geometry: FiberGeometry) {
        let result = build_profile(1.0, &ProbabilitySpec::Explicit(vec![0.5; 146]), &default_geometry);
        assert_eq!(
            result,
            Err(FootprintError::InvalidProfileLength {
                expected: 147,
                found: 146
            })
        );
    }

    #[rstest]
    fn test_breakage_calibration(default_geometry: FiberGeometry) {
        let profile = build_profile(1.0, &ProbabilitySpec::Constant(0.1), &default_geometry).unwrap();
        let options = SimulationOptions {
            trials: 2000,
            break_rate: 150.0,
            min_fragment_length: 0,
            seed: Some(42),
            show_progress: false,
        };

        let output = run_all(&profile, &options).unwrap();
        let observed = output.stats.mean_successful_attempts();
        let diff = (output.plan.expected_breaks - observed).abs();
        assert!(
            diff < 1.0,
            "expected {} breaks per trial, observed {}",
            output.plan.expected_breaks,
            observed
        );
    }

    #[rstest]
    fn test_trial_fragments_stay_on_the_fiber(default_geometry: FiberGeometry) {
        let profile = build_profile(1.0, &ProbabilitySpec::Constant(0.1), &default_geometry).unwrap();
        let plan = compute_attempts(&profile, 1.0 / 150.0).unwrap();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let trial = run_trial(&profile, plan.attempt_count, &mut rng);
            for fragment in &trial.fragments {
                assert!(fragment.midpoint() < profile.len() as u64);
                assert!(fragment.end < profile.len() as u64);
            }
        }
    }

    #[rstest]
    fn test_vplot_shape_from_config(small_config: SimulationConfig) {
        let geometry = small_config.geometry().unwrap();
        let profile = ProbabilityModel::from_config(&small_config)
            .build(&geometry)
            .unwrap();
        let output = run_all(&profile, &SimulationOptions::from_config(&small_config)).unwrap();
        let relative = with_relative_midpoints(&output.aggregate, geometry.fiber_midpoint());

        let vplot = build_vplot(&relative, 300, 500, 3, 20).unwrap();
        assert_eq!(vplot.shape(), (50, 100));
        assert!(vplot.total() > 0);
        assert!(vplot.total() <= output.aggregate.len() as u64);
    }

    #[rstest]
    fn test_unprotected_nucleosomes_still_yield_a_vplot(small_config: SimulationConfig) {
        let config = SimulationConfig {
            nuc_prob: ProbabilitySpec::Constant(0.0),
            ..small_config
        };
        let geometry = config.geometry().unwrap();
        let profile = ProbabilityModel::from_config(&config).build(&geometry).unwrap();
        let output = run_all(&profile, &SimulationOptions::from_config(&config)).unwrap();
        let relative = with_relative_midpoints(&output.aggregate, geometry.fiber_midpoint());

        let vplot = build_vplot_with_bins(&relative, config.vplot_bins().unwrap());
        assert_eq!(vplot.shape(), (50, 100));
    }

    #[rstest]
    fn test_wholly_zero_profile_is_degenerate(default_geometry: FiberGeometry) {
        let profile = build_profile(0.0, &ProbabilitySpec::Constant(0.0), &default_geometry).unwrap();
        assert_eq!(
            run_all(&profile, &SimulationOptions::default().with_seed(1)),
            Err(FootprintError::DegenerateProfile)
        );
    }

    #[rstest]
    fn test_dyad_profile_runs(small_config: SimulationConfig) {
        let config = SimulationConfig {
            dyad_enabled: true,
            dyad_width: 40,
            link_prob: 0.8,
            nuc_prob: ProbabilitySpec::Constant(0.05),
            ..small_config
        };
        let geometry = config.geometry().unwrap();
        let profile = ProbabilityModel::from_config(&config).build(&geometry).unwrap();
        assert_eq!(profile.len(), geometry.fiber_length());

        // dyad of the first nucleosome peaks at link_prob on top of the baseline
        let first_nucleosome = &profile.as_slice()[65..65 + 147];
        let peak = first_nucleosome.iter().cloned().fold(f64::MIN, f64::max);
        assert!((peak - 0.85).abs() < 1e-12);
        assert_eq!(first_nucleosome[0], 0.05);

        let output = run_all(&profile, &SimulationOptions::from_config(&config)).unwrap();
        assert!(!output.aggregate.is_empty());
    }

    #[rstest]
    fn test_pipeline_persistence(small_config: SimulationConfig) {
        let temp_dir = tempdir().unwrap();
        let paths = OutputPaths::create(&temp_dir.path().join("out")).unwrap();

        let geometry = small_config.geometry().unwrap();
        let profile = ProbabilityModel::from_config(&small_config)
            .build(&geometry)
            .unwrap();
        let output = run_all(&profile, &SimulationOptions::from_config(&small_config)).unwrap();
        let relative = with_relative_midpoints(&output.aggregate, geometry.fiber_midpoint());
        let vplot = build_vplot_with_bins(&relative, small_config.vplot_bins().unwrap());
        let fld = build_length_distribution(&output.aggregate, small_config.length_bin_width).unwrap();

        io::write_profile(&profile, &paths.file(io::PROFILE_FILE)).unwrap();
        io::write_aggregate(
            &output.aggregate,
            &paths.file(io::LENGTHS_FILE),
            &paths.file(io::MIDPOINTS_FILE),
        )
        .unwrap();
        io::write_vplot(&vplot, &paths.file(io::VPLOT_FILE), &paths.file(io::VPLOT_BINS_FILE))
            .unwrap();
        io::write_length_distribution(&fld, &paths.file(io::FLD_FILE)).unwrap();
        io::write_fragment_table(&relative, &paths.fragments_file(false), false).unwrap();

        let summary = RunSummary {
            seed: output.seed,
            fiber_length: geometry.fiber_length(),
            fiber_midpoint: geometry.fiber_midpoint(),
            plan: output.plan,
            stats: output.stats.clone(),
            fragments: output.aggregate.summary().ok(),
            config: small_config.clone(),
        };
        io::write_run_summary(&summary, &paths.file(io::SUMMARY_FILE)).unwrap();

        assert_eq!(io::read_profile(&paths.file(io::PROFILE_FILE)).unwrap(), profile);
        let (lengths, midpoints) =
            io::read_aggregate(&paths.file(io::LENGTHS_FILE), &paths.file(io::MIDPOINTS_FILE))
                .unwrap();
        assert_eq!(lengths, output.aggregate.lengths());
        assert_eq!(midpoints, output.aggregate.midpoints());

        let loaded = io::read_run_summary(&paths.file(io::SUMMARY_FILE)).unwrap();
        assert_eq!(loaded.seed, 2024);
        assert_eq!(loaded.stats, output.stats);
        assert_eq!(loaded.config, small_config);

        let table = std::fs::read_to_string(paths.fragments_file(false)).unwrap();
        assert_eq!(table.lines().count(), output.aggregate.len() + 1);
    }
}
