use std::sync::Arc;

use log::{debug, error, warn};

use genovar_core::models::{
    Alphabet, CodingSequence, ContigOffset, ContigSize, DnaSequenceCoding, DnaSequenceLinear,
    DnaString, Phase, SignedOffset,
};
use genovar_offset::{VariantMutationOffset, mutant_coding_sub_sequence};

use crate::compound::{CompoundKind, MutationItem, aggregate_compounds};
use crate::db::contig::ContigVariant;
use crate::errors::{VariantError, VariantResult};
use crate::variant::{Mutation, Variant};

///
/// A reference window with one phase's variants applied.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MutatedRegion {
    /// The mutated bases.
    pub sequence: DnaSequenceLinear,
    /// Indels applied, keyed by contig offset.
    pub indel_adjust: VariantMutationOffset,
    /// Contig offset of the first base of the window.
    pub contig_offset: ContigOffset,
    /// Number of variants (compound members counted singly) that were applied.
    pub applied: usize,
}

/// Apply one single base variant. `offset_adjust` maps its contig offset into `sequence`.
fn mutate_single(
    variant: &Variant,
    offset_adjust: SignedOffset,
    sequence: &mut DnaSequenceLinear,
) -> VariantResult<SignedOffset> {
    let adjusted = variant.offset() as SignedOffset + offset_adjust;
    if adjusted < 0 || adjusted >= sequence.len() as SignedOffset {
        error!(
            "mutate_single(), calculated sequence offset: {} is out of range for sequence size: {}, variant: {}",
            adjusted,
            sequence.len(),
            variant
        );
        return Err(VariantError::MutationOutOfRange {
            offset: adjusted,
            size: sequence.len(),
        });
    }
    let sequence_offset = adjusted as ContigOffset;

    let base = sequence.at(sequence_offset);
    if base != Some(variant.reference()) {
        warn!(
            "mutate_single(), reference base: {} does not match sequence base: {} for variant: {}",
            variant.reference().to_char(),
            base.map(|base| base.to_char()).unwrap_or('-'),
            variant
        );
    }

    match variant.mutation() {
        Mutation::Snp { mutant, .. } => {
            sequence.modify_base(sequence_offset, *mutant);
        }
        Mutation::Insert { mutant, .. } => {
            let inserted: DnaString = [*mutant].into_iter().collect();
            sequence.insert_sub_sequence(sequence_offset, &inserted);
        }
        Mutation::Delete { .. } => {
            sequence.delete_sub_sequence(sequence_offset, 1);
        }
    }

    Ok(variant.mutation().size_modify())
}

///
/// Apply a phase's variants to the reference window `[contig_offset, contig_offset + length)`.
///
/// One allele per offset is applied, in offset order, with contiguous
/// insert and delete runs applied as compounds. A variant that cannot be
/// applied is logged and skipped. Only a window outside the reference is an
/// error.
///
pub fn mutate_region(
    contig: &ContigVariant,
    phase: Phase,
    reference: &DnaSequenceLinear,
    contig_offset: ContigOffset,
    length: ContigSize,
) -> VariantResult<MutatedRegion> {
    let mut sequence = reference.sub_sequence(contig_offset, length)?;
    let variants: Vec<Arc<Variant>> = contig
        .homologous(phase)
        .map(|homologous| homologous.allele_variants(contig_offset, contig_offset + length))
        .unwrap_or_default();

    let mut indel_adjust = VariantMutationOffset::new();
    let mut applied = 0;

    for item in aggregate_compounds(&variants) {
        let offset_adjust = indel_adjust.cumulative_shift(item.offset()) - contig_offset as SignedOffset;

        match item {
            MutationItem::Single(variant) => {
                if let Ok(delta) = mutate_single(&variant, offset_adjust, &mut sequence) {
                    if delta != 0 {
                        indel_adjust.add_indel(variant.offset(), delta);
                    }
                    applied += 1;
                }
            }
            MutationItem::Compound(compound) => {
                if compound.mutate_sequence(offset_adjust, &mut sequence).is_ok() {
                    match compound.kind() {
                        CompoundKind::Insert => {
                            indel_adjust.add_indel(compound.offset(), compound.size() as SignedOffset)
                        }
                        CompoundKind::Delete => {
                            for member in compound.members() {
                                indel_adjust.add_indel(member.offset(), -1);
                            }
                        }
                    }
                    applied += compound.members().len();
                }
            }
        }
    }

    debug!(
        "mutate_region(), contig: {} phase: {} window: [{}, {}) applied {} of {} variants, net size change: {}",
        contig.contig_id(),
        phase,
        contig_offset,
        contig_offset + length,
        applied,
        variants.len(),
        indel_adjust.total_shift()
    );

    Ok(MutatedRegion {
        sequence,
        indel_adjust,
        contig_offset,
        applied,
    })
}

///
/// The coding sequence of one phase with its variants applied.
///
/// The window spans the coding sequence's CDS bounds. A coding sequence
/// with no CDS gives an empty sequence.
///
pub fn mutant_coding_sequence(
    contig: &ContigVariant,
    phase: Phase,
    coding_sequence: &CodingSequence,
    reference: &DnaSequenceLinear,
) -> VariantResult<DnaSequenceCoding> {
    let Some(bounds) = coding_sequence.bounds() else {
        warn!(
            "mutant_coding_sequence(), coding sequence: {} has no CDS",
            coding_sequence.id()
        );
        return Ok(DnaSequenceCoding::new(DnaString::new(), coding_sequence.strand()));
    };

    let region = mutate_region(contig, phase, reference, bounds.begin, bounds.width())?;

    Ok(mutant_coding_sub_sequence(
        coding_sequence,
        &region.sequence,
        &region.indel_adjust,
        0,
        0,
        region.contig_offset,
    ))
}
