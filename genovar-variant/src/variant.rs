use std::fmt::{self, Display};
use std::sync::Arc;

use genovar_core::models::{
    Alphabet, CodingSequence, ContigId, ContigOffset, Dna5, ExtendDna5, GeneFeature, GenomeId,
    OffsetIndex, Phase, SignedOffset,
};

use crate::evidence::VariantEvidence;

///
/// A single base edit at one contig offset.
///
/// An insert places `mutant` in front of the reference base at the offset;
/// a delete removes the reference base at the offset.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Snp { reference: Dna5, mutant: Dna5 },
    Insert { reference: Dna5, mutant: Dna5 },
    Delete { reference: Dna5 },
}

impl Mutation {
    pub fn reference(&self) -> Dna5 {
        match self {
            Mutation::Snp { reference, .. }
            | Mutation::Insert { reference, .. }
            | Mutation::Delete { reference } => *reference,
        }
    }

    /// The mutant allele as an extended symbol: a base, an insertion marker or the deletion marker.
    pub fn mutant(&self) -> ExtendDna5 {
        match self {
            Mutation::Snp { mutant, .. } => ExtendDna5::from(*mutant),
            Mutation::Insert { mutant, .. } => ExtendDna5::insertion_of(*mutant),
            Mutation::Delete { .. } => ExtendDna5::Delete,
        }
    }

    /// Change in sequence length when the edit is applied.
    pub fn size_modify(&self) -> SignedOffset {
        match self {
            Mutation::Snp { .. } => 0,
            Mutation::Insert { .. } => 1,
            Mutation::Delete { .. } => -1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Snp { .. } => "SNP",
            Mutation::Insert { .. } => "Insert",
            Mutation::Delete { .. } => "Delete",
        }
    }
}

/// The feature a variant was classified against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantSequence {
    Coding(Arc<CodingSequence>),
    Intron(Arc<GeneFeature>),
    NonCoding,
}

/// Classification without the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantClass {
    Coding,
    Intron,
    NonCoding,
}

impl VariantSequence {
    pub fn class(&self) -> VariantClass {
        match self {
            VariantSequence::Coding(_) => VariantClass::Coding,
            VariantSequence::Intron(_) => VariantClass::Intron,
            VariantSequence::NonCoding => VariantClass::NonCoding,
        }
    }

    /// Coding sequence id, gene id, or `None` for non-coding.
    pub fn feature_id(&self) -> Option<&str> {
        match self {
            VariantSequence::Coding(sequence) => Some(sequence.id()),
            VariantSequence::Intron(gene) => Some(gene.id()),
            VariantSequence::NonCoding => None,
        }
    }
}

///
/// The fields of a variant known before classification.
///
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    pub genome_id: GenomeId,
    pub contig_id: ContigId,
    pub phase: Phase,
    pub offset: ContigOffset,
    pub mutation: Mutation,
    pub quality: f64,
    pub evidence: VariantEvidence,
}

///
/// One called allele at a contig offset.
///
/// Immutable: there are no setters, and the classification is fixed at
/// construction. The offset is on the forward strand whatever the strand of
/// the feature it falls in.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    genome_id: GenomeId,
    contig_id: ContigId,
    phase: Phase,
    offset: ContigOffset,
    mutation: Mutation,
    quality: f64,
    evidence: VariantEvidence,
    sequence: VariantSequence,
}

impl Variant {
    pub fn new(draft: VariantDraft, sequence: VariantSequence) -> Self {
        Variant {
            genome_id: draft.genome_id,
            contig_id: draft.contig_id,
            phase: draft.phase,
            offset: draft.offset,
            mutation: draft.mutation,
            quality: draft.quality,
            evidence: draft.evidence,
            sequence,
        }
    }

    pub fn genome_id(&self) -> &str {
        &self.genome_id
    }

    pub fn contig_id(&self) -> &str {
        &self.contig_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offset(&self) -> ContigOffset {
        self.offset
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    pub fn reference(&self) -> Dna5 {
        self.mutation.reference()
    }

    pub fn mutant(&self) -> ExtendDna5 {
        self.mutation.mutant()
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn evidence(&self) -> &VariantEvidence {
        &self.evidence
    }

    pub fn sequence(&self) -> &VariantSequence {
        &self.sequence
    }

    pub fn class(&self) -> VariantClass {
        self.sequence.class()
    }

    pub fn coding_sequence(&self) -> Option<&Arc<CodingSequence>> {
        match &self.sequence {
            VariantSequence::Coding(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn is_snp(&self) -> bool {
        matches!(self.mutation, Mutation::Snp { .. })
    }

    pub fn is_insert(&self) -> bool {
        matches!(self.mutation, Mutation::Insert { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self.mutation, Mutation::Delete { .. })
    }

    /// Same offset and same mutant allele.
    pub fn analogous(&self, other: &Variant) -> bool {
        self.offset == other.offset && self.mutant() == other.mutant()
    }

    /// The two alleles of a diploid locus: analogous, on different phases.
    pub fn homozygous(&self, other: &Variant) -> bool {
        self.analogous(other) && self.phase != other.phase
    }

    /// Analogous and classified against the same feature.
    pub fn same_record(&self, other: &Variant) -> bool {
        self.analogous(other)
            && self.phase == other.phase
            && self.contig_id == other.contig_id
            && self.sequence.feature_id() == other.sequence.feature_id()
    }

    /// `ref` offset `mutant`, e.g. `A100X`.
    pub fn mutation_text(&self, output_index: OffsetIndex) -> String {
        format!(
            "{}{}{}",
            self.reference().to_char(),
            output_index.output(self.offset),
            self.mutant().to_char()
        )
    }

    /// Delimited record: genome, contig, phase, offset, quality, kind, mutation, feature.
    pub fn output(&self, delimiter: char, output_index: OffsetIndex) -> String {
        let feature = self.sequence.feature_id().unwrap_or("-");
        [
            self.genome_id.clone(),
            self.contig_id.clone(),
            self.phase.to_string(),
            output_index.output(self.offset).to_string(),
            self.quality.to_string(),
            self.mutation.name().to_string(),
            self.mutation_text(output_index),
            feature.to_string(),
        ]
        .join(&delimiter.to_string())
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{}",
            self.contig_id,
            self.offset,
            self.reference().to_char(),
            self.mutant().to_char()
        )
    }
}
