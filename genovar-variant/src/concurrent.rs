use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::info;
use rayon::prelude::*;

use genovar_core::models::GenomeId;

use crate::aligner::SequenceAligner;
use crate::db::genome::GenomeVariant;
use crate::db::population::PopulationVariant;
use crate::factory::{VariantFactory, VcfVariantRecord};
use crate::variant::Variant;

///
/// A genome that many threads can add variants to.
///
/// Insertion is serialised by one lock per genome. When two threads add
/// competing alleles at one offset, the first to take the lock wins.
///
#[derive(Debug)]
pub struct ThreadSafeGenomeBuilder {
    ploidy: usize,
    genome: Mutex<GenomeVariant>,
}

impl ThreadSafeGenomeBuilder {
    pub fn new(genome_id: impl Into<GenomeId>, ploidy: usize) -> Self {
        ThreadSafeGenomeBuilder {
            ploidy,
            genome: Mutex::new(GenomeVariant::new(genome_id)),
        }
    }

    pub fn add_variant(&self, variant: Arc<Variant>) -> bool {
        let mut genome = self.genome.lock().unwrap_or_else(PoisonError::into_inner);
        genome.add_variant(variant, self.ploidy)
    }

    /// Add a batch under one lock. Returns the number accepted.
    pub fn add_variants(&self, variants: Vec<Variant>) -> usize {
        let mut genome = self.genome.lock().unwrap_or_else(PoisonError::into_inner);
        variants
            .into_iter()
            .map(|variant| genome.add_variant(Arc::new(variant), self.ploidy))
            .filter(|added| *added)
            .count()
    }

    pub fn variant_count(&self) -> usize {
        self.genome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .variant_count()
    }

    pub fn into_genome(self) -> GenomeVariant {
        self.genome.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

///
/// Create and add the variants of every record of one genome, in parallel.
///
/// Records are processed concurrently and inserted through a
/// [`ThreadSafeGenomeBuilder`]; records for other genomes are ignored.
///
pub fn build_genome_parallel<A: SequenceAligner>(
    factory: &VariantFactory<'_, A>,
    genome_id: &str,
    records: &[VcfVariantRecord],
    ploidy: usize,
) -> GenomeVariant {
    let builder = ThreadSafeGenomeBuilder::new(genome_id, ploidy);

    records
        .par_iter()
        .filter(|record| record.genome_id == genome_id)
        .for_each(|record| {
            builder.add_variants(factory.create_variants(record));
        });

    builder.into_genome()
}

///
/// Build a population from records, one genome per worker.
///
/// Each genome is built from its own records in record order, so the
/// result does not depend on scheduling.
///
pub fn build_population<A: SequenceAligner>(
    factory: &VariantFactory<'_, A>,
    population_id: &str,
    records: &[VcfVariantRecord],
    ploidy: usize,
) -> PopulationVariant {
    let mut by_genome: BTreeMap<&str, Vec<&VcfVariantRecord>> = BTreeMap::new();
    for record in records {
        by_genome.entry(record.genome_id.as_str()).or_default().push(record);
    }

    let genomes: Vec<GenomeVariant> = by_genome
        .into_par_iter()
        .map(|(genome_id, genome_records)| {
            let mut genome = GenomeVariant::new(genome_id);
            for record in genome_records {
                for variant in factory.create_variants(record) {
                    genome.add_variant(Arc::new(variant), ploidy);
                }
            }
            genome
        })
        .collect();

    let mut population = PopulationVariant::new(population_id);
    for genome in genomes {
        population.merge_genome(genome);
    }

    info!("build_population(), {}", population);
    population
}

#[cfg(test)]
mod tests {
    use super::*;

    use genovar_core::models::{ContigFeatures, DnaSequenceLinear, GenomeDatabase, Phase};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::aligner::AnchoredAligner;
    use crate::db::contig::DIPLOID;

    #[fixture]
    fn database() -> GenomeDatabase {
        let mut database = GenomeDatabase::new("ref");
        database
            .add_contig(ContigFeatures::new("chr1", DnaSequenceLinear::from("ACGT".repeat(50).as_str())))
            .unwrap();
        database
    }

    fn records() -> Vec<VcfVariantRecord> {
        (0..120u32)
            .map(|index| VcfVariantRecord {
                genome_id: format!("sample{}", index % 3),
                contig_id: "chr1".to_string(),
                phase: if index % 2 == 0 { Phase::Maternal } else { Phase::Paternal },
                offset: index,
                reference: "ACGT".chars().nth(index as usize % 4).unwrap().to_string(),
                alternate: "N".to_string(),
                quality: 30.0,
                info: None,
                record_index: index as usize,
            })
            .collect()
    }

    #[rstest]
    fn test_builder_shared_across_threads(database: GenomeDatabase) {
        let factory = VariantFactory::new(&database, AnchoredAligner::new());
        let records = records();

        let genome = build_genome_parallel(&factory, "sample1", &records, DIPLOID);
        assert_eq!(genome.variant_count(), 40);
        assert_eq!(genome.genome_id(), "sample1");
    }

    #[rstest]
    fn test_builder_rejects_duplicates() {
        let builder = ThreadSafeGenomeBuilder::new("genome1", DIPLOID);
        let variants: Vec<Variant> = (0..8)
            .map(|_| crate::variant::tests::snp(7, Phase::Maternal, genovar_core::models::Dna5::G))
            .collect();

        (0..4).into_par_iter().for_each(|_| {
            builder.add_variants(variants.clone());
        });
        assert_eq!(builder.variant_count(), 1);
    }

    #[rstest]
    fn test_build_population(database: GenomeDatabase) {
        let factory = VariantFactory::new(&database, AnchoredAligner::new());
        let population = build_population(&factory, "cohort", &records(), DIPLOID);

        assert_eq!(population.genome_count(), 3);
        assert_eq!(population.variant_count(), 120);
        let sample0 = population.genome("sample0").unwrap();
        assert_eq!(sample0.contig("chr1").unwrap().phase_count(), 2);
    }
}
