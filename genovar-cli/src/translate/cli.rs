use clap::{Arg, ArgGroup, ArgAction, Command, arg};

pub const TRANSLATE_CMD: &str = "translate";

pub fn create_translate_cli() -> Command {
    Command::new(TRANSLATE_CMD)
        .about("Translate an offset between contig and coding sequence coordinates, or print a coding sequence and its protein.")
        .arg(
            arg!(--config <CONFIG>)
                .required(true)
                .help("Path to the TOML run configuration"),
        )
        .arg(
            arg!(--sequence <SEQUENCE>)
                .required(true)
                .help("Coding sequence id"),
        )
        .arg(
            Arg::new("contig-offset")
                .long("contig-offset")
                .value_parser(clap::value_parser!(u32))
                .help("Zero-based contig offset to translate into the coding sequence"),
        )
        .arg(
            Arg::new("coding-offset")
                .long("coding-offset")
                .value_parser(clap::value_parser!(u32))
                .help("Zero-based coding sequence offset to translate into the contig"),
        )
        .arg(
            Arg::new("protein")
                .long("protein")
                .action(ArgAction::SetTrue)
                .help("Print the coding bases and amino acids (needs a fasta in the config)"),
        )
        .group(
            ArgGroup::new("mode")
                .args(["contig-offset", "coding-offset", "protein"])
                .required(true),
        )
}
