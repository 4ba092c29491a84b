mod config;
mod profile;
mod simulate;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "footprint";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Predict fragment length distributions and v-plots for nucleosome-protected DNA fragmented by radiation-induced breaks.")
        .subcommand_required(true)
        .subcommand(simulate::cli::create_simulate_cli())
        .subcommand(profile::cli::create_profile_cli())
        .subcommand(config::cli::create_config_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SIMULATE
        //
        Some((simulate::cli::SIMULATE_CMD, matches)) => {
            simulate::handlers::run_simulate(matches)?;
        }

        //
        // PROFILE
        //
        Some((profile::cli::PROFILE_CMD, matches)) => {
            profile::handlers::run_profile(matches)?;
        }

        //
        // CONFIG
        //
        Some((config::cli::CONFIG_CMD, matches)) => {
            config::handlers::run_config(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
