use log::debug;

use genovar_core::models::GenomeDatabase;

use crate::variant::{Variant, VariantDraft, VariantSequence};

///
/// Classify a draft against the genome database, creating one variant per feature.
///
/// For every gene covering the offset: one coding copy per coding sequence
/// that contains the offset, or, if none does, one intron copy for the
/// gene. An offset outside every gene gives exactly one non-coding variant.
///
pub fn classify_variant(draft: VariantDraft, database: &GenomeDatabase) -> Vec<Variant> {
    let genes = database.find_genes(&draft.contig_id, draft.offset);

    if genes.is_empty() {
        return vec![Variant::new(draft, VariantSequence::NonCoding)];
    }

    let mut variants = Vec::new();
    for gene in genes {
        let coding: Vec<_> = gene
            .coding_sequences()
            .iter()
            .filter(|sequence| sequence.is_within_coding(draft.offset))
            .cloned()
            .collect();

        if coding.is_empty() {
            variants.push(Variant::new(draft.clone(), VariantSequence::Intron(gene)));
        } else {
            for sequence in coding {
                variants.push(Variant::new(draft.clone(), VariantSequence::Coding(sequence)));
            }
        }
    }

    debug!(
        "classify_variant(), {}:{} classified into {} variants",
        draft.contig_id,
        draft.offset,
        variants.len()
    );

    variants
}
