use clap::{Arg, Command};

pub const PROFILE_CMD: &str = "profile";

pub fn create_profile_cli() -> Command {
    Command::new(PROFILE_CMD)
        .about("Build the cleavage probability profile only and save it as .npy")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML or TOML simulation config (defaults are used when omitted)")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output .npy file")
                .default_value("cleavage_prob.npy"),
        )
}
