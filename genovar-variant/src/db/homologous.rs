use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use log::{error, warn};

use genovar_core::models::{ContigOffset, Phase};

use crate::compound::CompoundVariant;
use crate::filter::VariantFilter;
use crate::variant::Variant;

///
/// Variants of one allele, keyed by offset.
///
/// The vector at an offset holds the classified copies of a single allele
/// (one per coding sequence or gene it falls in); they are always
/// analogous to one another.
///
pub type OffsetVariantMap = BTreeMap<ContigOffset, Vec<Arc<Variant>>>;

///
/// All the variants of one homologous copy (phase) of a contig.
///
#[derive(Debug, Clone, Default)]
pub struct HomologousVariant {
    phase: Phase,
    variants: OffsetVariantMap,
}

impl HomologousVariant {
    pub fn new(phase: Phase) -> Self {
        HomologousVariant {
            phase,
            variants: BTreeMap::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn variants(&self) -> &OffsetVariantMap {
        &self.variants
    }

    /// Number of offsets holding a variant.
    pub fn offset_count(&self) -> usize {
        self.variants.len()
    }

    /// Number of variants, counting every classified copy.
    pub fn variant_count(&self) -> usize {
        self.variants.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.variants.values().flatten()
    }

    ///
    /// Add a variant.
    ///
    /// Fails (logged) when the phase differs, when the offset already holds
    /// a different allele, or when the same classified copy is already held.
    ///
    pub fn add_variant(&mut self, variant: Arc<Variant>) -> bool {
        if variant.phase() != self.phase {
            error!(
                "add_variant(), variant phase: {} does not match homologous phase: {}",
                variant.phase(),
                self.phase
            );
            return false;
        }

        match self.variants.entry(variant.offset()) {
            Entry::Vacant(entry) => {
                entry.insert(vec![variant]);
                true
            }
            Entry::Occupied(mut entry) => {
                let copies = entry.get_mut();
                let same_allele = copies.iter().all(|copy| copy.analogous(&variant));
                let duplicate = copies.iter().any(|copy| copy.same_record(&variant));
                if !same_allele || duplicate {
                    warn!(
                        "add_variant(), phase: {} already holds a variant at offset: {}, rejected: {}",
                        self.phase,
                        variant.offset(),
                        variant
                    );
                    return false;
                }
                copies.push(variant);
                true
            }
        }
    }

    ///
    /// Add every member of a compound variant, or none of them.
    ///
    pub fn add_compound(&mut self, compound: &CompoundVariant) -> bool {
        let blocked = compound.members().iter().find(|member| {
            member.phase() != self.phase || self.variants.contains_key(&member.offset())
        });

        if let Some(member) = blocked {
            warn!(
                "add_compound(), compound: {} cannot be added, offset: {} is occupied or out of phase",
                compound,
                member.offset()
            );
            return false;
        }

        for member in compound.members() {
            self.variants.insert(member.offset(), vec![member.clone()]);
        }
        true
    }

    /// Remove the allele at the variant's offset if it is analogous. All its copies go.
    pub fn erase_variant(&mut self, variant: &Variant) -> bool {
        if !self.is_element(variant) {
            return false;
        }
        self.variants.remove(&variant.offset()).is_some()
    }

    /// True if an analogous variant is held at the same offset.
    pub fn is_element(&self, variant: &Variant) -> bool {
        self.variants
            .get(&variant.offset())
            .and_then(|copies| copies.first())
            .is_some_and(|copy| copy.analogous(variant))
    }

    fn analogous_at(&self, offset: ContigOffset, copies: &[Arc<Variant>]) -> bool {
        match (self.variants.get(&offset), copies.first()) {
            (Some(held), Some(variant)) => held.first().is_some_and(|copy| copy.analogous(variant)),
            _ => false,
        }
    }

    /// Offsets of either; where both hold a variant this collection's entry wins.
    pub fn union(&self, other: &HomologousVariant) -> HomologousVariant {
        let mut variants = self.variants.clone();
        for (offset, copies) in &other.variants {
            variants.entry(*offset).or_insert_with(|| copies.clone());
        }

        HomologousVariant {
            phase: self.phase,
            variants,
        }
    }

    /// Offsets where both hold analogous variants; this collection's entries are kept.
    pub fn intersection(&self, other: &HomologousVariant) -> HomologousVariant {
        let variants = self
            .variants
            .iter()
            .filter(|(offset, copies)| other.analogous_at(**offset, copies))
            .map(|(offset, copies)| (*offset, copies.clone()))
            .collect();

        HomologousVariant {
            phase: self.phase,
            variants,
        }
    }

    /// Offsets of this collection with no analogous variant in the other.
    pub fn difference(&self, other: &HomologousVariant) -> HomologousVariant {
        let variants = self
            .variants
            .iter()
            .filter(|(offset, copies)| !other.analogous_at(**offset, copies))
            .map(|(offset, copies)| (*offset, copies.clone()))
            .collect();

        HomologousVariant {
            phase: self.phase,
            variants,
        }
    }

    /// Accepted variants; offsets left empty are dropped.
    pub fn filter_variants(&self, filter: &dyn VariantFilter) -> HomologousVariant {
        let variants = self
            .variants
            .iter()
            .filter_map(|(offset, copies)| {
                let kept: Vec<Arc<Variant>> = copies
                    .iter()
                    .filter(|variant| filter.accept(variant))
                    .cloned()
                    .collect();
                (!kept.is_empty()).then_some((*offset, kept))
            })
            .collect();

        HomologousVariant {
            phase: self.phase,
            variants,
        }
    }

    /// A copy that shares no variant with this one.
    pub fn deep_copy(&self) -> HomologousVariant {
        let variants = self
            .variants
            .iter()
            .map(|(offset, copies)| {
                let copies = copies
                    .iter()
                    .map(|variant| Arc::new(variant.as_ref().clone()))
                    .collect();
                (*offset, copies)
            })
            .collect();

        HomologousVariant {
            phase: self.phase,
            variants,
        }
    }

    /// All variants at offsets in `[start, end)`, in offset order.
    pub fn sorted_variants(&self, start: ContigOffset, end: ContigOffset) -> Vec<Arc<Variant>> {
        if start >= end {
            return Vec::new();
        }
        self.variants
            .range(start..end)
            .flat_map(|(_, copies)| copies.iter().cloned())
            .collect()
    }

    /// One variant per offset in `[start, end)`: the first classified copy.
    pub fn allele_variants(&self, start: ContigOffset, end: ContigOffset) -> Vec<Arc<Variant>> {
        if start >= end {
            return Vec::new();
        }
        self.variants
            .range(start..end)
            .filter_map(|(_, copies)| copies.first().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use genovar_core::models::{
        CodingSequence, Dna5, ExtendDna5, FeatureInterval, GeneFeature, StrandSense,
    };
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::evidence::VariantEvidence;
    use crate::variant::tests::{snp, variant};
    use crate::variant::{Mutation, VariantDraft, VariantSequence};

    fn maternal(offset: ContigOffset, mutant: Dna5) -> Arc<Variant> {
        Arc::new(snp(offset, Phase::Maternal, mutant))
    }

    fn collection(entries: &[(ContigOffset, Dna5)]) -> HomologousVariant {
        let mut homologous = HomologousVariant::new(Phase::Maternal);
        for (offset, mutant) in entries {
            assert!(homologous.add_variant(maternal(*offset, *mutant)));
        }
        homologous
    }

    fn offsets(homologous: &HomologousVariant) -> BTreeSet<ContigOffset> {
        homologous.variants().keys().copied().collect()
    }

    #[rstest]
    fn test_duplicate_offset_rejected() {
        let mut homologous = HomologousVariant::new(Phase::Maternal);
        assert!(homologous.add_variant(maternal(100, Dna5::G)));
        assert!(!homologous.add_variant(maternal(100, Dna5::G)));
        assert!(!homologous.add_variant(maternal(100, Dna5::T)));
        assert_eq!(homologous.variant_count(), 1);
    }

    #[rstest]
    fn test_wrong_phase_rejected() {
        let mut homologous = HomologousVariant::new(Phase::Maternal);
        assert!(!homologous.add_variant(Arc::new(snp(100, Phase::Paternal, Dna5::G))));
        assert!(homologous.is_empty());
    }

    #[rstest]
    fn test_classified_copies_share_offset() {
        let coding = |id: &str| {
            let sequence = Arc::new(CodingSequence::new(
                id,
                "gene1",
                "chr1",
                StrandSense::Forward,
                vec![FeatureInterval::new(0, 200)],
            ));
            Arc::new(Variant::new(
                VariantDraft {
                    genome_id: "genome1".to_string(),
                    contig_id: "chr1".to_string(),
                    phase: Phase::Maternal,
                    offset: 100,
                    mutation: Mutation::Snp {
                        reference: Dna5::A,
                        mutant: Dna5::G,
                    },
                    quality: 30.0,
                    evidence: VariantEvidence::default(),
                },
                VariantSequence::Coding(sequence),
            ))
        };

        let mut homologous = HomologousVariant::new(Phase::Maternal);
        assert!(homologous.add_variant(coding("tx1")));
        assert!(homologous.add_variant(coding("tx2")));
        assert!(!homologous.add_variant(coding("tx2")));
        assert_eq!(homologous.offset_count(), 1);
        assert_eq!(homologous.variant_count(), 2);

        let gene = Arc::new(GeneFeature::new("gene1", "chr1", FeatureInterval::new(0, 200), StrandSense::Forward, vec![]));
        let intron = Arc::new(Variant::new(
            VariantDraft {
                genome_id: "genome1".to_string(),
                contig_id: "chr1".to_string(),
                phase: Phase::Maternal,
                offset: 100,
                mutation: Mutation::Snp {
                    reference: Dna5::A,
                    mutant: Dna5::G,
                },
                quality: 30.0,
                evidence: VariantEvidence::default(),
            },
            VariantSequence::Intron(gene),
        ));
        assert!(homologous.add_variant(intron));

        // erasing removes every copy of the allele
        assert!(homologous.erase_variant(&snp(100, Phase::Maternal, Dna5::G)));
        assert!(homologous.is_empty());
    }

    #[rstest]
    fn test_erase() {
        let mut homologous = collection(&[(5, Dna5::G), (9, Dna5::C)]);
        assert!(!homologous.erase_variant(&snp(5, Phase::Maternal, Dna5::T)));
        assert!(!homologous.erase_variant(&snp(6, Phase::Maternal, Dna5::G)));
        assert!(homologous.erase_variant(&snp(5, Phase::Maternal, Dna5::G)));
        assert_eq!(offsets(&homologous), BTreeSet::from([9]));
    }

    #[rstest]
    fn test_union_first_wins() {
        let a = collection(&[(5, Dna5::G)]);
        let b = collection(&[(5, Dna5::T), (7, Dna5::C)]);

        let union = a.union(&b);
        assert_eq!(offsets(&union), BTreeSet::from([5, 7]));
        assert_eq!(union.variants()[&5][0].mutant(), ExtendDna5::from(Dna5::G));
    }

    #[rstest]
    fn test_set_algebra_partitions_union() {
        let a = collection(&[(1, Dna5::G), (2, Dna5::G), (3, Dna5::G), (8, Dna5::C)]);
        let b = collection(&[(2, Dna5::G), (3, Dna5::T), (4, Dna5::G), (8, Dna5::C)]);

        let union = offsets(&a.union(&b));
        let intersection = offsets(&a.intersection(&b));
        let a_only = offsets(&a.difference(&b));
        let b_only = offsets(&b.difference(&a));

        assert_eq!(intersection, BTreeSet::from([2, 8]));
        assert_eq!(a_only, BTreeSet::from([1, 3]));
        assert_eq!(b_only, BTreeSet::from([3, 4]));

        assert!(intersection.is_disjoint(&a_only));
        assert!(intersection.is_disjoint(&b_only));
        let covered: BTreeSet<_> = intersection.iter().chain(&a_only).chain(&b_only).copied().collect();
        assert_eq!(covered, union);
        assert_eq!(intersection.len() + a_only.len(), a.offset_count());
    }

    #[rstest]
    fn test_filter_drops_empty_offsets() {
        let mut homologous = collection(&[(1, Dna5::G)]);
        assert!(homologous.add_variant(Arc::new(variant(
            2,
            Phase::Maternal,
            Mutation::Delete { reference: Dna5::A }
        ))));

        let snps = homologous.filter_variants(&|v: &Variant| v.is_snp());
        assert_eq!(offsets(&snps), BTreeSet::from([1]));
    }

    #[rstest]
    fn test_deep_copy_is_independent() {
        let original = collection(&[(1, Dna5::G), (2, Dna5::C)]);
        let mut copy = original.deep_copy();

        assert!(!Arc::ptr_eq(&original.variants()[&1][0], &copy.variants()[&1][0]));
        assert!(copy.erase_variant(&snp(1, Phase::Maternal, Dna5::G)));
        assert_eq!(copy.offset_count(), 1);
        assert_eq!(original.offset_count(), 2);
    }

    #[rstest]
    fn test_sorted_variants() {
        let homologous = collection(&[(1, Dna5::G), (5, Dna5::C), (9, Dna5::T)]);
        let found: Vec<_> = homologous.sorted_variants(1, 9).iter().map(|v| v.offset()).collect();
        assert_eq!(found, vec![1, 5]);
        assert!(homologous.sorted_variants(9, 1).is_empty());
    }

    #[rstest]
    fn test_add_compound_all_or_nothing() {
        let delete = |offset: ContigOffset| {
            Arc::new(variant(offset, Phase::Maternal, Mutation::Delete { reference: Dna5::A }))
        };
        let compound = CompoundVariant::new(vec![delete(10), delete(11), delete(12)]).unwrap();

        let mut blocked = collection(&[(11, Dna5::G)]);
        assert!(!blocked.add_compound(&compound));
        assert_eq!(blocked.offset_count(), 1);

        let mut open = collection(&[(20, Dna5::G)]);
        assert!(open.add_compound(&compound));
        assert_eq!(offsets(&open), BTreeSet::from([10, 11, 12, 20]));
    }
}
