mod compare;
mod config;
mod ingest;
mod output;
mod translate;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "genovar";
    pub const BIN_NAME: &str = "genovar";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Genome variant collections: ingest phased variant calls, compare genomes and translate between contig and coding sequence coordinates.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Verbosity level (-v info, -vv debug); RUST_LOG overrides"),
        )
        .subcommand(ingest::cli::create_ingest_cli())
        .subcommand(translate::cli::create_translate_cli())
        .subcommand(compare::cli::create_compare_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(&matches);

    match matches.subcommand() {
        //
        // INGEST
        //
        Some((ingest::cli::INGEST_CMD, matches)) => {
            ingest::handlers::run_ingest(matches)?;
        }

        //
        // TRANSLATE
        //
        Some((translate::cli::TRANSLATE_CMD, matches)) => {
            translate::handlers::run_translate(matches)?;
        }

        //
        // COMPARE
        //
        Some((compare::cli::COMPARE_CMD, matches)) => {
            compare::handlers::run_compare(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
