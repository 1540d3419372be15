use log::{error, warn};

use genovar_core::models::{
    CodingSequence, ContigOffset, ContigSize, DnaSequenceCoding, DnaSequenceLinear, DnaString,
    StrandSense,
};

use crate::errors::{OffsetError, OffsetResult};
use crate::exon_map::{ExonOffsetMap, exon_mutant_offset, exon_offset_map, intron_offset_map, map_size};
use crate::mutation_offset::VariantMutationOffset;

///
/// Extract part of a coding sequence from a linear window of its contig.
///
/// # Arguments
/// - sequence: forward strand bases; `sequence[0]` lies at contig offset `contig_offset`
/// - exons: the exon map, in the same coordinates as `contig_offset`
/// - strand: coding strand; reverse strand exons are read highest first and complemented
/// - sub_offset, sub_length: stranded window of the coding sequence; `(0, 0)` is the whole sequence
/// - contig_offset: contig offset of the first base of `sequence`
///
pub fn try_coding_sub_sequence(
    sequence: &DnaSequenceLinear,
    exons: &ExonOffsetMap,
    strand: StrandSense,
    sub_offset: ContigOffset,
    sub_length: ContigSize,
    contig_offset: ContigOffset,
) -> OffsetResult<DnaSequenceCoding> {
    let (Some((first_start, _)), Some((_, last_end))) = (exons.first_key_value(), exons.last_key_value())
    else {
        return Ok(DnaSequenceCoding::new(DnaString::new(), strand));
    };

    if *first_start < contig_offset {
        return Err(OffsetError::ExonOutOfBounds {
            exon_offset: *first_start,
            contig_offset,
            sequence_size: sequence.len(),
        });
    }
    if *last_end > contig_offset + sequence.len() {
        return Err(OffsetError::ExonOutOfBounds {
            exon_offset: *last_end,
            contig_offset,
            sequence_size: sequence.len(),
        });
    }

    let coding_size = map_size(exons);
    let sub_length = match (sub_offset, sub_length) {
        (0, 0) => coding_size,
        (_, length) => length,
    };
    if sub_offset as u64 + sub_length as u64 > coding_size as u64 {
        return Err(OffsetError::SubSequenceOutOfRange {
            offset: sub_offset,
            length: sub_length,
            size: coding_size,
        });
    }

    let strand = match strand {
        StrandSense::Unknown => {
            warn!("coding_sub_sequence(), has 'UNKNOWN' ('.') strand assuming 'FORWARD' ('+')");
            StrandSense::Forward
        }
        strand => strand,
    };

    let mut ordered: Vec<(&ContigOffset, &ContigOffset)> = exons.iter().collect();
    if strand == StrandSense::Reverse {
        ordered.reverse();
    }

    let bases = sequence.bases().as_slice();
    let sub_end = sub_offset + sub_length;
    let mut coding = DnaString::with_capacity(sub_length as usize);
    let mut relative_offset: ContigOffset = 0;

    for (start, end) in ordered {
        let exon_size = end - start;
        let lower = sub_offset.max(relative_offset);
        let upper = sub_end.min(relative_offset + exon_size);

        if lower < upper {
            match strand {
                StrandSense::Reverse => {
                    let from = (end - (upper - relative_offset) - contig_offset) as usize;
                    let to = (end - (lower - relative_offset) - contig_offset) as usize;
                    bases[from..to]
                        .iter()
                        .rev()
                        .for_each(|base| coding.push_back(base.complement()));
                }
                _ => {
                    let from = (start + (lower - relative_offset) - contig_offset) as usize;
                    let to = (start + (upper - relative_offset) - contig_offset) as usize;
                    bases[from..to].iter().for_each(|base| coding.push_back(*base));
                }
            }
        }

        relative_offset += exon_size;
        if relative_offset >= sub_end {
            break;
        }
    }

    if coding.len() != sub_length {
        error!(
            "coding_sub_sequence(), sub-sequence length: {} NOT EQUAL to specified length: {}",
            coding.len(),
            sub_length
        );
    }

    Ok(DnaSequenceCoding::new(coding, strand))
}

///
/// [`try_coding_sub_sequence`] that reports a bounds violation and returns an empty sequence.
///
pub fn coding_sub_sequence(
    sequence: &DnaSequenceLinear,
    exons: &ExonOffsetMap,
    strand: StrandSense,
    sub_offset: ContigOffset,
    sub_length: ContigSize,
    contig_offset: ContigOffset,
) -> DnaSequenceCoding {
    try_coding_sub_sequence(sequence, exons, strand, sub_offset, sub_length, contig_offset)
        .unwrap_or_else(|e| {
            error!("coding_sub_sequence(), {}", e);
            DnaSequenceCoding::new(DnaString::new(), strand)
        })
}

/// The (sub) coding sequence defined by the reference exons.
pub fn ref_coding_sub_sequence(
    coding_sequence: &CodingSequence,
    sequence: &DnaSequenceLinear,
    sub_offset: ContigOffset,
    sub_length: ContigSize,
    contig_offset: ContigOffset,
) -> DnaSequenceCoding {
    let exons = exon_offset_map(coding_sequence);
    coding_sub_sequence(
        sequence,
        &exons.intervals,
        exons.strand,
        sub_offset,
        sub_length,
        contig_offset,
    )
}

/// Concatenated intron bases of a coding sequence, stranded like the exons.
pub fn ref_intron_sub_sequence(
    coding_sequence: &CodingSequence,
    sequence: &DnaSequenceLinear,
    sub_offset: ContigOffset,
    sub_length: ContigSize,
    contig_offset: ContigOffset,
) -> DnaSequenceCoding {
    let introns = intron_offset_map(coding_sequence);
    coding_sub_sequence(
        sequence,
        &introns.intervals,
        introns.strand,
        sub_offset,
        sub_length,
        contig_offset,
    )
}

///
/// The coding sequence read from a mutated window.
///
/// `sequence` must already carry the indels recorded in `indel_adjust`;
/// the exons are shifted to match before extraction.
///
pub fn mutant_coding_sub_sequence(
    coding_sequence: &CodingSequence,
    sequence: &DnaSequenceLinear,
    indel_adjust: &VariantMutationOffset,
    sub_offset: ContigOffset,
    sub_length: ContigSize,
    contig_offset: ContigOffset,
) -> DnaSequenceCoding {
    let exons = exon_mutant_offset(coding_sequence, indel_adjust);
    coding_sub_sequence(
        sequence,
        &exons.intervals,
        exons.strand,
        sub_offset,
        sub_length,
        contig_offset,
    )
}
