use std::collections::BTreeMap;
use std::sync::Arc;

use log::error;

use genovar_core::models::{ContigId, ContigOffset, Phase};

use crate::compound::CompoundVariant;
use crate::db::homologous::HomologousVariant;
use crate::errors::{VariantError, VariantResult};
use crate::filter::VariantFilter;
use crate::variant::Variant;

/// Ploidy of a diploid organism.
pub const DIPLOID: usize = 2;

///
/// The variants of one contig, one [`HomologousVariant`] per phase.
///
/// A contig never holds more phases than its ploidy.
///
#[derive(Debug, Clone)]
pub struct ContigVariant {
    contig_id: ContigId,
    ploidy: usize,
    homologous: BTreeMap<Phase, HomologousVariant>,
}

impl ContigVariant {
    pub fn new(contig_id: impl Into<ContigId>, ploidy: usize) -> Self {
        ContigVariant {
            contig_id: contig_id.into(),
            ploidy,
            homologous: BTreeMap::new(),
        }
    }

    pub fn contig_id(&self) -> &str {
        &self.contig_id
    }

    pub fn ploidy(&self) -> usize {
        self.ploidy
    }

    pub fn phase_count(&self) -> usize {
        self.homologous.len()
    }

    pub fn homologous(&self, phase: Phase) -> Option<&HomologousVariant> {
        self.homologous.get(&phase)
    }

    pub fn homologous_iter(&self) -> impl Iterator<Item = &HomologousVariant> {
        self.homologous.values()
    }

    pub fn variant_count(&self) -> usize {
        self.homologous.values().map(HomologousVariant::variant_count).sum()
    }

    pub fn offset_count(&self) -> usize {
        self.homologous.values().map(HomologousVariant::offset_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.homologous.values().all(HomologousVariant::is_empty)
    }

    /// Every variant, phase by phase.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.homologous.values().flat_map(HomologousVariant::iter)
    }

    ///
    /// The collection of a phase, created on first use.
    ///
    /// Creating a phase beyond the ploidy is an error.
    ///
    pub fn homologous_mut(&mut self, phase: Phase) -> VariantResult<&mut HomologousVariant> {
        let phase_count = self.homologous.len();
        if !self.homologous.contains_key(&phase) && phase_count >= self.ploidy {
            return Err(VariantError::PloidyExceeded {
                contig_id: self.contig_id.clone(),
                ploidy: self.ploidy,
                phase,
            });
        }
        Ok(self
            .homologous
            .entry(phase)
            .or_insert_with(|| HomologousVariant::new(phase)))
    }

    pub fn add_variant(&mut self, variant: Arc<Variant>) -> bool {
        if variant.contig_id() != self.contig_id {
            error!(
                "add_variant(), variant contig: {} does not match contig: {}",
                variant.contig_id(),
                self.contig_id
            );
            return false;
        }

        match self.homologous_mut(variant.phase()) {
            Ok(homologous) => homologous.add_variant(variant),
            Err(e) => {
                error!("add_variant(), {}", e);
                false
            }
        }
    }

    pub fn add_compound(&mut self, compound: &CompoundVariant) -> bool {
        if compound.contig_id() != self.contig_id {
            error!(
                "add_compound(), compound contig: {} does not match contig: {}",
                compound.contig_id(),
                self.contig_id
            );
            return false;
        }

        match self.homologous_mut(compound.phase()) {
            Ok(homologous) => homologous.add_compound(compound),
            Err(e) => {
                error!("add_compound(), {}", e);
                false
            }
        }
    }

    pub fn erase_variant(&mut self, variant: &Variant) -> bool {
        self.homologous
            .get_mut(&variant.phase())
            .is_some_and(|homologous| homologous.erase_variant(variant))
    }

    pub fn is_element(&self, variant: &Variant) -> bool {
        self.homologous
            .get(&variant.phase())
            .is_some_and(|homologous| homologous.is_element(variant))
    }

    /// Variants of a phase at offsets in `[start, end)`.
    pub fn sorted_variants(
        &self,
        phase: Phase,
        start: ContigOffset,
        end: ContigOffset,
    ) -> Vec<Arc<Variant>> {
        self.homologous
            .get(&phase)
            .map(|homologous| homologous.sorted_variants(start, end))
            .unwrap_or_default()
    }

    fn with_homologous(&self, homologous: BTreeMap<Phase, HomologousVariant>) -> ContigVariant {
        ContigVariant {
            contig_id: self.contig_id.clone(),
            ploidy: self.ploidy,
            homologous: homologous
                .into_iter()
                .filter(|(_, homologous)| !homologous.is_empty())
                .collect(),
        }
    }

    /// Phase by phase union; the result's ploidy is the larger of the two.
    pub fn union(&self, other: &ContigVariant) -> ContigVariant {
        let mut homologous = self.homologous.clone();
        for (phase, theirs) in &other.homologous {
            let merged = match homologous.get(phase) {
                Some(ours) => ours.union(theirs),
                None => theirs.clone(),
            };
            homologous.insert(*phase, merged);
        }

        let mut contig = self.with_homologous(homologous);
        contig.ploidy = self.ploidy.max(other.ploidy).max(contig.phase_count());
        contig
    }

    pub fn intersection(&self, other: &ContigVariant) -> ContigVariant {
        let homologous = self
            .homologous
            .iter()
            .filter_map(|(phase, ours)| {
                other
                    .homologous
                    .get(phase)
                    .map(|theirs| (*phase, ours.intersection(theirs)))
            })
            .collect();

        self.with_homologous(homologous)
    }

    pub fn difference(&self, other: &ContigVariant) -> ContigVariant {
        let homologous = self
            .homologous
            .iter()
            .map(|(phase, ours)| {
                let remaining = match other.homologous.get(phase) {
                    Some(theirs) => ours.difference(theirs),
                    None => ours.clone(),
                };
                (*phase, remaining)
            })
            .collect();

        self.with_homologous(homologous)
    }

    pub fn filter_variants(&self, filter: &dyn VariantFilter) -> ContigVariant {
        let homologous = self
            .homologous
            .iter()
            .map(|(phase, ours)| (*phase, ours.filter_variants(filter)))
            .collect();

        self.with_homologous(homologous)
    }

    pub fn deep_copy(&self) -> ContigVariant {
        ContigVariant {
            contig_id: self.contig_id.clone(),
            ploidy: self.ploidy,
            homologous: self
                .homologous
                .iter()
                .map(|(phase, ours)| (*phase, ours.deep_copy()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use genovar_core::models::Dna5;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::variant::tests::snp;

    fn add(contig: &mut ContigVariant, offset: ContigOffset, phase: Phase, mutant: Dna5) -> bool {
        contig.add_variant(Arc::new(snp(offset, phase, mutant)))
    }

    #[rstest]
    fn test_ploidy_limits_phases() {
        let mut contig = ContigVariant::new("chr1", 1);
        assert!(add(&mut contig, 10, Phase::Maternal, Dna5::G));
        assert!(!add(&mut contig, 10, Phase::Paternal, Dna5::G));
        assert!(matches!(
            contig.homologous_mut(Phase::Paternal),
            Err(VariantError::PloidyExceeded { ploidy: 1, .. })
        ));

        let mut diploid = ContigVariant::new("chr1", DIPLOID);
        assert!(add(&mut diploid, 10, Phase::Maternal, Dna5::G));
        assert!(add(&mut diploid, 10, Phase::Paternal, Dna5::G));
        assert!(!add(&mut diploid, 12, Phase::Unphased, Dna5::G));
        assert_eq!(diploid.variant_count(), 2);
    }

    #[rstest]
    fn test_wrong_contig_rejected() {
        let mut contig = ContigVariant::new("chr2", DIPLOID);
        assert!(!add(&mut contig, 10, Phase::Maternal, Dna5::G));
        assert!(contig.is_empty());
    }

    #[rstest]
    fn test_set_algebra_per_phase() {
        let mut a = ContigVariant::new("chr1", DIPLOID);
        add(&mut a, 1, Phase::Maternal, Dna5::G);
        add(&mut a, 2, Phase::Paternal, Dna5::G);

        let mut b = ContigVariant::new("chr1", DIPLOID);
        add(&mut b, 1, Phase::Maternal, Dna5::G);
        // same allele, other phase
        add(&mut b, 2, Phase::Maternal, Dna5::G);

        assert_eq!(a.union(&b).variant_count(), 3);
        assert_eq!(a.intersection(&b).variant_count(), 1);

        let a_only = a.difference(&b);
        assert_eq!(a_only.variant_count(), 1);
        assert!(a_only.is_element(&snp(2, Phase::Paternal, Dna5::G)));
        // emptied phases are dropped
        assert_eq!(a.intersection(&b).phase_count(), 1);
    }

    #[rstest]
    fn test_erase_and_deep_copy() {
        let mut contig = ContigVariant::new("chr1", DIPLOID);
        add(&mut contig, 5, Phase::Maternal, Dna5::C);
        add(&mut contig, 6, Phase::Paternal, Dna5::C);

        let mut copy = contig.deep_copy();
        assert!(!copy.erase_variant(&snp(5, Phase::Paternal, Dna5::C)));
        assert!(copy.erase_variant(&snp(5, Phase::Maternal, Dna5::C)));
        assert_eq!(copy.variant_count(), 1);
        assert_eq!(contig.variant_count(), 2);
    }

    #[rstest]
    fn test_sorted_variants_by_phase() {
        let mut contig = ContigVariant::new("chr1", DIPLOID);
        add(&mut contig, 5, Phase::Maternal, Dna5::C);
        add(&mut contig, 7, Phase::Maternal, Dna5::C);
        add(&mut contig, 6, Phase::Paternal, Dna5::C);

        let maternal: Vec<_> = contig
            .sorted_variants(Phase::Maternal, 0, 100)
            .iter()
            .map(|v| v.offset())
            .collect();
        assert_eq!(maternal, vec![5, 7]);
        assert!(contig.sorted_variants(Phase::Unphased, 0, 100).is_empty());
    }
}
