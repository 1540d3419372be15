use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{self, Display};
use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use genovar_core::models::GenomeId;

use crate::db::genome::GenomeVariant;
use crate::errors::{VariantError, VariantResult};
use crate::filter::VariantFilter;
use crate::variant::Variant;

///
/// A population of genomes keyed by genome id.
///
/// Filtering and copying work on genomes in parallel; each genome is an
/// independent subtree.
///
#[derive(Debug, Clone)]
pub struct PopulationVariant {
    population_id: String,
    genomes: BTreeMap<GenomeId, GenomeVariant>,
}

impl PopulationVariant {
    pub fn new(population_id: impl Into<String>) -> Self {
        PopulationVariant {
            population_id: population_id.into(),
            genomes: BTreeMap::new(),
        }
    }

    pub fn population_id(&self) -> &str {
        &self.population_id
    }

    pub fn genome(&self, genome_id: &str) -> Option<&GenomeVariant> {
        self.genomes.get(genome_id)
    }

    pub fn genomes(&self) -> impl Iterator<Item = &GenomeVariant> {
        self.genomes.values()
    }

    pub fn genome_count(&self) -> usize {
        self.genomes.len()
    }

    pub fn variant_count(&self) -> usize {
        self.genomes.values().map(GenomeVariant::variant_count).sum()
    }

    /// Add a genome. A genome id can be added once.
    pub fn add_genome(&mut self, genome: GenomeVariant) -> VariantResult<()> {
        match self.genomes.entry(genome.genome_id().to_string()) {
            Entry::Occupied(_) => Err(VariantError::DuplicateGenome(genome.genome_id().to_string())),
            Entry::Vacant(entry) => {
                entry.insert(genome);
                Ok(())
            }
        }
    }

    pub fn genome_mut(&mut self, genome_id: &str) -> &mut GenomeVariant {
        self.genomes
            .entry(genome_id.to_string())
            .or_insert_with(|| GenomeVariant::new(genome_id))
    }

    /// Add a variant to its genome, creating the genome if needed.
    pub fn add_variant(&mut self, variant: Arc<Variant>, ploidy: usize) -> bool {
        let genome_id = variant.genome_id().to_string();
        self.genome_mut(&genome_id).add_variant(variant, ploidy)
    }

    pub fn erase_variant(&mut self, variant: &Variant) -> bool {
        self.genomes
            .get_mut(variant.genome_id())
            .is_some_and(|genome| genome.erase_variant(variant))
    }

    ///
    /// Merge a genome built elsewhere.
    ///
    /// Unlike [`PopulationVariant::add_genome`], a genome id already present
    /// is united with the incoming genome, whose variants lose at shared offsets.
    ///
    pub fn merge_genome(&mut self, genome: GenomeVariant) {
        match self.genomes.entry(genome.genome_id().to_string()) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().union(&genome);
                entry.insert(merged);
            }
            Entry::Vacant(entry) => {
                entry.insert(genome);
            }
        }
    }

    /// Filter every genome. Genomes left empty are kept.
    pub fn filter_variants(&self, filter: &dyn VariantFilter) -> PopulationVariant {
        let genomes: BTreeMap<GenomeId, GenomeVariant> = self
            .genomes
            .par_iter()
            .map(|(genome_id, genome)| (genome_id.clone(), genome.filter_variants(filter)))
            .collect();

        let filtered = PopulationVariant {
            population_id: self.population_id.clone(),
            genomes,
        };
        info!(
            "filter_variants(), population: {} filter: {} kept {} of {} variants",
            self.population_id,
            filter.name(),
            filtered.variant_count(),
            self.variant_count()
        );
        filtered
    }

    pub fn deep_copy(&self) -> PopulationVariant {
        PopulationVariant {
            population_id: self.population_id.clone(),
            genomes: self
                .genomes
                .par_iter()
                .map(|(genome_id, genome)| (genome_id.clone(), genome.deep_copy()))
                .collect(),
        }
    }
}

impl Display for PopulationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Population: {}, genomes: {}, variants: {}",
            self.population_id,
            self.genome_count(),
            self.variant_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use genovar_core::models::{Dna5, Phase};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::db::contig::DIPLOID;
    use crate::filter::QualityFilter;
    use crate::variant::tests::snp;

    #[fixture]
    fn population() -> PopulationVariant {
        let mut population = PopulationVariant::new("cohort");
        for offset in [10, 20, 30] {
            population.add_variant(Arc::new(snp(offset, Phase::Maternal, Dna5::G)), DIPLOID);
        }
        population
    }

    #[rstest]
    fn test_duplicate_genome(mut population: PopulationVariant) {
        assert!(matches!(
            population.add_genome(GenomeVariant::new("genome1")),
            Err(VariantError::DuplicateGenome(_))
        ));
        assert!(population.add_genome(GenomeVariant::new("genome2")).is_ok());
        assert_eq!(population.genome_count(), 2);
    }

    #[rstest]
    fn test_filter(population: PopulationVariant) {
        let none = population.filter_variants(&QualityFilter { min_quality: 50.0 });
        assert_eq!(none.variant_count(), 0);
        assert_eq!(none.genome_count(), 1);

        let all = population.filter_variants(&QualityFilter { min_quality: 10.0 });
        assert_eq!(all.variant_count(), 3);
    }

    #[rstest]
    fn test_deep_copy(population: PopulationVariant) {
        let mut copy = population.deep_copy();
        assert!(copy.erase_variant(&snp(20, Phase::Maternal, Dna5::G)));
        assert_eq!(copy.variant_count(), 2);
        assert_eq!(population.variant_count(), 3);
        assert_eq!(population.to_string(), "Population: cohort, genomes: 1, variants: 3");
    }

    #[rstest]
    fn test_merge_genome(mut population: PopulationVariant) {
        let mut incoming = GenomeVariant::new("genome1");
        incoming.add_variant(Arc::new(snp(10, Phase::Maternal, Dna5::T)), DIPLOID);
        incoming.add_variant(Arc::new(snp(40, Phase::Maternal, Dna5::T)), DIPLOID);

        population.merge_genome(incoming);
        assert_eq!(population.variant_count(), 4);
        assert!(population.genome("genome1").unwrap().is_element(&snp(10, Phase::Maternal, Dna5::G)));
    }
}
