use thiserror::Error;

use genovar_core::models::{ContigOffset, ContigSize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    #[error("CDS offset: {exon_offset} lies outside the target sequence [{contig_offset}, {contig_offset} + {sequence_size})")]
    ExonOutOfBounds {
        exon_offset: ContigOffset,
        contig_offset: ContigOffset,
        sequence_size: ContigSize,
    },

    #[error("Sub-sequence offset: {offset} + length: {length} > coding sequence size: {size}")]
    SubSequenceOutOfRange {
        offset: ContigOffset,
        length: ContigSize,
        size: ContigSize,
    },
}

pub type OffsetResult<T> = std::result::Result<T, OffsetError>;
