use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use footprint_sim::ProbabilityModel;
use footprint_sim::io::write_profile;

use crate::simulate::handlers::load_config;

pub fn run_profile(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .context("--output is required")?;

    let geometry = config.geometry()?;
    let profile = ProbabilityModel::from_config(&config).build(&geometry)?;
    write_profile(&profile, &output)?;

    info!(
        "Wrote {} nt cleavage profile (mean probability {:.4}) to {}",
        profile.len(),
        profile.mean()?,
        output.display()
    );

    Ok(())
}
