use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;

use genovar_core::models::translate;
use genovar_offset::{
    ref_coding_sequence_contig_offset, ref_coding_sub_sequence, ref_offset_within_coding_sequence,
};

use crate::config::RunConfig;

pub fn run_translate(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .context("A path to a run configuration is required.")?;
    let sequence_id = matches
        .get_one::<String>("sequence")
        .context("A coding sequence id is required.")?;

    let config = RunConfig::try_from(Path::new(config_path))
        .with_context(|| format!("Failed to read config: {}", config_path))?;
    let database = config.load_database()?;

    let Some(sequence) = database.coding_sequence(sequence_id) else {
        bail!("Coding sequence: {} not found in genome: {}", sequence_id, database.genome_id());
    };

    if let Some(contig_offset) = matches.get_one::<u32>("contig-offset") {
        println!("{}", ref_offset_within_coding_sequence(&sequence, *contig_offset));
    } else if let Some(coding_offset) = matches.get_one::<u32>("coding-offset") {
        println!("{}", ref_coding_sequence_contig_offset(&sequence, *coding_offset));
    } else {
        let contig = database
            .contig(sequence.contig_id())
            .with_context(|| format!("Contig: {} not found", sequence.contig_id()))?;
        if contig.sequence().is_empty() {
            bail!("Contig: {} has no reference bases, add a fasta to the config", contig.contig_id());
        }

        let coding = ref_coding_sub_sequence(&sequence, contig.sequence(), 0, 0, 0);
        println!("{}", coding.bases());
        println!("{}", translate(&coding));
    }

    Ok(())
}
