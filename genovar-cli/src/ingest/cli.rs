use clap::{Arg, ArgAction, Command, arg};

pub const INGEST_CMD: &str = "ingest";

pub fn create_ingest_cli() -> Command {
    Command::new(INGEST_CMD)
        .about("Build a population from a variant table and report variant counts per genome, contig and phase.")
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
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output path (default: the config's output, else stdout)"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Write every variant instead of counts"),
        )
}
