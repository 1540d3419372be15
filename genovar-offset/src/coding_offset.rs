use std::fmt::{self, Display};

use log::{error, warn};

use genovar_core::models::{CodingSequence, ContigOffset, ContigSize, StrandSense};

use crate::exon_map::{ExonOffsetMap, exon_mutant_offset, exon_offset_map, map_size};
use crate::mutation_offset::VariantMutationOffset;

///
/// Result of a coordinate translation.
///
/// When `found` is false both `offset` and `length` are zero.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodingOffset {
    pub found: bool,
    pub offset: ContigOffset,
    pub length: ContigSize,
}

impl CodingOffset {
    pub fn new(offset: ContigOffset, length: ContigSize) -> Self {
        CodingOffset {
            found: true,
            offset,
            length,
        }
    }

    pub fn not_found() -> Self {
        CodingOffset::default()
    }
}

impl Display for CodingOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.found, self.offset, self.length)
    }
}

fn checked_strand(strand: StrandSense, caller: &str) -> StrandSense {
    match strand {
        StrandSense::Unknown => {
            warn!("{}() with UNKNOWN strand sense (assuming +)", caller);
            StrandSense::Forward
        }
        strand => strand,
    }
}

///
/// Translate a contig offset into a stranded offset within the coding sequence.
///
/// On the reverse strand offset 0 is the last base of the highest exon.
/// Offsets outside every exon return [`CodingOffset::not_found`].
///
pub fn offset_within_coding_sequence(
    exons: &ExonOffsetMap,
    strand: StrandSense,
    contig_offset: ContigOffset,
) -> CodingOffset {
    if exons.is_empty() {
        return CodingOffset::not_found();
    }

    let mut coding_offset: ContigOffset = 0;
    let mut is_coding = false;

    match checked_strand(strand, "offset_within_coding_sequence") {
        StrandSense::Reverse => {
            for (start, end) in exons.iter().rev() {
                if contig_offset >= *start && contig_offset < *end {
                    coding_offset += (end - contig_offset) - 1;
                    is_coding = true;
                } else if contig_offset < *start {
                    coding_offset += end - start;
                }
            }
        }
        _ => {
            for (start, end) in exons {
                if contig_offset >= *start && contig_offset < *end {
                    coding_offset += contig_offset - start;
                    is_coding = true;
                } else if contig_offset >= *end {
                    coding_offset += end - start;
                }
            }
        }
    }

    match is_coding {
        true => CodingOffset::new(coding_offset, map_size(exons)),
        false => CodingOffset::not_found(),
    }
}

///
/// Inverse of [`offset_within_coding_sequence`]: the contig offset of a
/// stranded coding sequence offset.
///
pub fn coding_sequence_contig_offset(
    exons: &ExonOffsetMap,
    strand: StrandSense,
    coding_offset: ContigOffset,
) -> CodingOffset {
    if exons.is_empty() {
        error!("coding_sequence_contig_offset(), coding sequence with no exon regions");
        return CodingOffset::not_found();
    }

    let strand = checked_strand(strand, "coding_sequence_contig_offset");
    let mut ordered: Vec<(&ContigOffset, &ContigOffset)> = exons.iter().collect();
    if strand == StrandSense::Reverse {
        ordered.reverse();
    }

    let mut begin_offset: ContigOffset = 0;
    let mut contig_offset: Option<ContigOffset> = None;
    for (start, end) in ordered {
        let end_offset = begin_offset + (end - start);
        if coding_offset >= begin_offset && coding_offset < end_offset {
            contig_offset = Some(match strand {
                StrandSense::Reverse => (end - 1) - (coding_offset - begin_offset),
                _ => start + (coding_offset - begin_offset),
            });
            break;
        }
        begin_offset = end_offset;
    }

    match contig_offset {
        Some(contig_offset) => CodingOffset::new(contig_offset, map_size(exons)),
        None => {
            error!(
                "coding_sequence_contig_offset(), Sequence Offset: {} not in coding sequence",
                coding_offset
            );
            CodingOffset::not_found()
        }
    }
}

/// [`offset_within_coding_sequence`] against the reference exons of a coding sequence.
pub fn ref_offset_within_coding_sequence(
    sequence: &CodingSequence,
    contig_offset: ContigOffset,
) -> CodingOffset {
    let exons = exon_offset_map(sequence);
    offset_within_coding_sequence(&exons.intervals, exons.strand, contig_offset)
}

/// [`coding_sequence_contig_offset`] against the reference exons of a coding sequence.
pub fn ref_coding_sequence_contig_offset(
    sequence: &CodingSequence,
    coding_offset: ContigOffset,
) -> CodingOffset {
    let exons = exon_offset_map(sequence);
    coding_sequence_contig_offset(&exons.intervals, exons.strand, coding_offset)
}

/// Translate an offset in mutated contig coordinates against the indel shifted exons.
pub fn mutant_offset_within_coding_sequence(
    sequence: &CodingSequence,
    indel_adjust: &VariantMutationOffset,
    mutant_contig_offset: ContigOffset,
) -> CodingOffset {
    let exons = exon_mutant_offset(sequence, indel_adjust);
    offset_within_coding_sequence(&exons.intervals, exons.strand, mutant_contig_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn exons() -> ExonOffsetMap {
        ExonOffsetMap::from([(10, 20), (30, 35)])
    }

    #[rstest]
    #[case(12, CodingOffset::new(2, 15))]
    #[case(10, CodingOffset::new(0, 15))]
    #[case(30, CodingOffset::new(10, 15))]
    #[case(34, CodingOffset::new(14, 15))]
    #[case(25, CodingOffset::not_found())]
    #[case(20, CodingOffset::not_found())]
    #[case(35, CodingOffset::not_found())]
    fn test_forward_contig_to_coding(
        exons: ExonOffsetMap,
        #[case] contig_offset: ContigOffset,
        #[case] expected: CodingOffset,
    ) {
        assert_eq!(
            offset_within_coding_sequence(&exons, StrandSense::Forward, contig_offset),
            expected
        );
    }

    #[rstest]
    #[case(34, CodingOffset::new(0, 15))]
    #[case(30, CodingOffset::new(4, 15))]
    #[case(19, CodingOffset::new(5, 15))]
    #[case(10, CodingOffset::new(14, 15))]
    #[case(25, CodingOffset::not_found())]
    fn test_reverse_contig_to_coding(
        exons: ExonOffsetMap,
        #[case] contig_offset: ContigOffset,
        #[case] expected: CodingOffset,
    ) {
        assert_eq!(
            offset_within_coding_sequence(&exons, StrandSense::Reverse, contig_offset),
            expected
        );
    }

    #[rstest]
    fn test_forward_coding_to_contig(exons: ExonOffsetMap) {
        let result = coding_sequence_contig_offset(&exons, StrandSense::Forward, 12);
        assert_eq!(result, CodingOffset::new(32, 15));
        assert!(!coding_sequence_contig_offset(&exons, StrandSense::Forward, 15).found);
    }

    #[rstest]
    #[case(StrandSense::Forward)]
    #[case(StrandSense::Reverse)]
    fn test_round_trip(exons: ExonOffsetMap, #[case] strand: StrandSense) {
        for contig_offset in (10..20).chain(30..35) {
            let coding = offset_within_coding_sequence(&exons, strand, contig_offset);
            assert!(coding.found);
            let contig = coding_sequence_contig_offset(&exons, strand, coding.offset);
            assert_eq!(contig.offset, contig_offset);
        }
    }

    #[rstest]
    fn test_empty_map() {
        let exons = ExonOffsetMap::new();
        assert_eq!(
            offset_within_coding_sequence(&exons, StrandSense::Forward, 3),
            CodingOffset::not_found()
        );
        assert!(!coding_sequence_contig_offset(&exons, StrandSense::Forward, 0).found);
    }

    #[rstest]
    fn test_unknown_strand_as_forward(exons: ExonOffsetMap) {
        assert_eq!(
            offset_within_coding_sequence(&exons, StrandSense::Unknown, 12),
            CodingOffset::new(2, 15)
        );
        assert_eq!(
            coding_sequence_contig_offset(&exons, StrandSense::Unknown, 12).offset,
            32
        );
    }
}
