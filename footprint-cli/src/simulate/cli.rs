use clap::{Arg, ArgAction, Command, value_parser};

pub const SIMULATE_CMD: &str = "simulate";

pub fn create_simulate_cli() -> Command {
    Command::new(SIMULATE_CMD)
        .about("Simulate fragmentation and write the profile, fragments, v-plot and length distribution")
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
                .value_name("DIR")
                .help("Output directory (overrides output_dir in the config)")
                .required(false),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("Run seed (overrides seed in the config)")
                .value_parser(value_parser!(u64))
                .required(false),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("NUMBER")
                .help("Number of worker threads for trials (default: 4)")
                .value_parser(value_parser!(usize))
                .required(false),
        )
        .arg(
            Arg::new("compress")
                .long("compress")
                .help("Gzip the per-fragment table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no_progress")
                .long("no-progress")
                .help("Hide the trial progress bar")
                .action(ArgAction::SetTrue),
        )
}
