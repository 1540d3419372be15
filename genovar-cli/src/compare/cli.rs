use clap::{Arg, Command, arg};

pub const COMPARE_CMD: &str = "compare";

pub fn create_compare_cli() -> Command {
    Command::new(COMPARE_CMD)
        .about("Compare the variants of two genomes: union, intersection and both differences.")
        .arg(
            arg!(--config <CONFIG>)
                .required(true)
                .help("Path to the TOML run configuration"),
        )
        .arg(
            arg!(--variants <VARIANTS>)
                .required(true)
                .help("Path to the tab separated variant table (optionally gzipped)"),
        )
        .arg(
            Arg::new("genome-a")
                .long("genome-a")
                .required(true)
                .help("First genome id"),
        )
        .arg(
            Arg::new("genome-b")
                .long("genome-b")
                .required(true)
                .help("Second genome id"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output path (default: the config's output, else stdout)"),
        )
}
