use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{self, Display};
use std::sync::Arc;

use log::error;

use genovar_core::models::{ContigId, GenomeId};

use crate::compound::CompoundVariant;
use crate::db::contig::ContigVariant;
use crate::errors::{VariantError, VariantResult};
use crate::filter::VariantFilter;
use crate::variant::Variant;

///
/// The variants of one genome (sample), keyed by contig id.
///
#[derive(Debug, Clone)]
pub struct GenomeVariant {
    genome_id: GenomeId,
    contigs: BTreeMap<ContigId, ContigVariant>,
}

impl GenomeVariant {
    pub fn new(genome_id: impl Into<GenomeId>) -> Self {
        GenomeVariant {
            genome_id: genome_id.into(),
            contigs: BTreeMap::new(),
        }
    }

    pub fn genome_id(&self) -> &str {
        &self.genome_id
    }

    pub fn contig(&self, contig_id: &str) -> Option<&ContigVariant> {
        self.contigs.get(contig_id)
    }

    pub fn contigs(&self) -> impl Iterator<Item = &ContigVariant> {
        self.contigs.values()
    }

    pub fn contig_count(&self) -> usize {
        self.contigs.len()
    }

    pub fn variant_count(&self) -> usize {
        self.contigs.values().map(ContigVariant::variant_count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.contigs.values().flat_map(ContigVariant::iter)
    }

    /// Add a contig. A contig id can be added once.
    pub fn add_contig(&mut self, contig: ContigVariant) -> VariantResult<()> {
        match self.contigs.entry(contig.contig_id().to_string()) {
            Entry::Occupied(_) => Err(VariantError::DuplicateContig(contig.contig_id().to_string())),
            Entry::Vacant(entry) => {
                entry.insert(contig);
                Ok(())
            }
        }
    }

    /// The contig's collection, created with `ploidy` on first use.
    pub fn contig_mut(&mut self, contig_id: &str, ploidy: usize) -> &mut ContigVariant {
        self.contigs
            .entry(contig_id.to_string())
            .or_insert_with(|| ContigVariant::new(contig_id, ploidy))
    }

    ///
    /// Add a variant to its contig.
    ///
    /// `ploidy` is used only when the contig is created.
    ///
    pub fn add_variant(&mut self, variant: Arc<Variant>, ploidy: usize) -> bool {
        if variant.genome_id() != self.genome_id {
            error!(
                "add_variant(), variant genome: {} does not match genome: {}",
                variant.genome_id(),
                self.genome_id
            );
            return false;
        }

        let contig_id = variant.contig_id().to_string();
        self.contig_mut(&contig_id, ploidy).add_variant(variant)
    }

    pub fn add_compound(&mut self, compound: &CompoundVariant, ploidy: usize) -> bool {
        let contig_id = compound.contig_id().to_string();
        self.contig_mut(&contig_id, ploidy).add_compound(compound)
    }

    pub fn erase_variant(&mut self, variant: &Variant) -> bool {
        self.contigs
            .get_mut(variant.contig_id())
            .is_some_and(|contig| contig.erase_variant(variant))
    }

    pub fn is_element(&self, variant: &Variant) -> bool {
        self.contigs
            .get(variant.contig_id())
            .is_some_and(|contig| contig.is_element(variant))
    }

    fn with_contigs(&self, contigs: BTreeMap<ContigId, ContigVariant>) -> GenomeVariant {
        GenomeVariant {
            genome_id: self.genome_id.clone(),
            contigs: contigs
                .into_iter()
                .filter(|(_, contig)| !contig.is_empty())
                .collect(),
        }
    }

    /// Contig by contig union, keeping this genome's id.
    pub fn union(&self, other: &GenomeVariant) -> GenomeVariant {
        let mut contigs = self.contigs.clone();
        for (contig_id, theirs) in &other.contigs {
            let merged = match contigs.get(contig_id) {
                Some(ours) => ours.union(theirs),
                None => theirs.clone(),
            };
            contigs.insert(contig_id.clone(), merged);
        }

        self.with_contigs(contigs)
    }

    pub fn intersection(&self, other: &GenomeVariant) -> GenomeVariant {
        let contigs = self
            .contigs
            .iter()
            .filter_map(|(contig_id, ours)| {
                other
                    .contigs
                    .get(contig_id)
                    .map(|theirs| (contig_id.clone(), ours.intersection(theirs)))
            })
            .collect();

        self.with_contigs(contigs)
    }

    pub fn difference(&self, other: &GenomeVariant) -> GenomeVariant {
        let contigs = self
            .contigs
            .iter()
            .map(|(contig_id, ours)| {
                let remaining = match other.contigs.get(contig_id) {
                    Some(theirs) => ours.difference(theirs),
                    None => ours.clone(),
                };
                (contig_id.clone(), remaining)
            })
            .collect();

        self.with_contigs(contigs)
    }

    pub fn filter_variants(&self, filter: &dyn VariantFilter) -> GenomeVariant {
        let contigs = self
            .contigs
            .iter()
            .map(|(contig_id, ours)| (contig_id.clone(), ours.filter_variants(filter)))
            .collect();

        self.with_contigs(contigs)
    }

    pub fn deep_copy(&self) -> GenomeVariant {
        GenomeVariant {
            genome_id: self.genome_id.clone(),
            contigs: self
                .contigs
                .iter()
                .map(|(contig_id, ours)| (contig_id.clone(), ours.deep_copy()))
                .collect(),
        }
    }
}

impl Display for GenomeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Genome: {}, contigs: {}, variants: {}",
            self.genome_id,
            self.contig_count(),
            self.variant_count()
        )
    }
}
