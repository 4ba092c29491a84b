use clap::{Arg, Command};

pub const CONFIG_CMD: &str = "config";

pub fn create_config_cli() -> Command {
    Command::new(CONFIG_CMD)
        .about("Generate an example simulation config (.yaml, .yml or .toml)")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output configuration file")
                .default_value("footprint_config.yaml"),
        )
}
