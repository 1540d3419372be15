use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use genovar_variant::{
    AnchoredAligner, PopulationVariant, VariantFactory, build_population, read_variant_table,
};

use crate::config::RunConfig;
use crate::output::open_output;

pub const POPULATION_ID: &str = "population";

///
/// Load the genome, read the variant table and build the filtered population.
///
pub fn load_population(config: &RunConfig, variants: &Path) -> Result<PopulationVariant> {
    let database = config.load_database()?;
    info!("{}", database);

    let records = read_variant_table(variants)?;
    let factory = VariantFactory::new(&database, AnchoredAligner::new());
    let population = build_population(&factory, POPULATION_ID, &records, config.ploidy);

    Ok(population.filter_variants(&config.filter.build()))
}

pub fn run_ingest(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .context("A path to a run configuration is required.")?;
    let variants = matches
        .get_one::<String>("variants")
        .context("A path to a variant table is required.")?;
    let list = matches.get_flag("list");

    let config = RunConfig::try_from(Path::new(config_path))
        .with_context(|| format!("Failed to read config: {}", config_path))?;
    let population = load_population(&config, Path::new(variants))?;

    let output = matches
        .get_one::<String>("output")
        .map(Path::new)
        .or(config.output.as_deref());
    let mut writer = open_output(output)?;

    if list {
        writeln!(writer, "genome,contig,phase,offset,quality,kind,mutation,feature")?;
        for genome in population.genomes() {
            for variant in genome.iter() {
                writeln!(writer, "{}", variant.output(',', config.output_index()))?;
            }
        }
    } else {
        writeln!(writer, "genome,contig,phase,offsets,variants")?;
        for genome in population.genomes() {
            for contig in genome.contigs() {
                for homologous in contig.homologous_iter() {
                    writeln!(
                        writer,
                        "{},{},{},{},{}",
                        genome.genome_id(),
                        contig.contig_id(),
                        homologous.phase(),
                        homologous.offset_count(),
                        homologous.variant_count()
                    )?;
                }
            }
        }
    }
    writer.flush()?;

    info!("{}", population);
    Ok(())
}
