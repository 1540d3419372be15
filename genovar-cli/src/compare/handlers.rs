use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use genovar_variant::{GenomeVariant, PopulationVariant};

use crate::config::RunConfig;
use crate::ingest::handlers::load_population;
use crate::output::open_output;

/// Variant counts of the four set operations between two genomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomeComparison {
    pub union: usize,
    pub intersection: usize,
    pub a_only: usize,
    pub b_only: usize,
}

impl GenomeComparison {
    pub fn new(a: &GenomeVariant, b: &GenomeVariant) -> Self {
        GenomeComparison {
            union: a.union(b).variant_count(),
            intersection: a.intersection(b).variant_count(),
            a_only: a.difference(b).variant_count(),
            b_only: b.difference(a).variant_count(),
        }
    }
}

fn genome<'a>(population: &'a PopulationVariant, genome_id: &str) -> Result<&'a GenomeVariant> {
    population
        .genome(genome_id)
        .with_context(|| format!("Genome: {} has no variants in the table", genome_id))
}

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .context("A path to a run configuration is required.")?;
    let variants = matches
        .get_one::<String>("variants")
        .context("A path to a variant table is required.")?;
    let genome_a = matches
        .get_one::<String>("genome-a")
        .context("A first genome id is required.")?;
    let genome_b = matches
        .get_one::<String>("genome-b")
        .context("A second genome id is required.")?;

    let config = RunConfig::try_from(Path::new(config_path))
        .with_context(|| format!("Failed to read config: {}", config_path))?;
    let population = load_population(&config, Path::new(variants))?;

    let comparison = GenomeComparison::new(genome(&population, genome_a)?, genome(&population, genome_b)?);

    let output = matches
        .get_one::<String>("output")
        .map(Path::new)
        .or(config.output.as_deref());
    let mut writer = open_output(output)?;
    writeln!(writer, "set,variants")?;
    writeln!(writer, "union,{}", comparison.union)?;
    writeln!(writer, "intersection,{}", comparison.intersection)?;
    writeln!(writer, "{}-{},{}", genome_a, genome_b, comparison.a_only)?;
    writeln!(writer, "{}-{},{}", genome_b, genome_a, comparison.b_only)?;
    writer.flush()?;

    Ok(())
}
