use thiserror::Error;

use crate::models::{ContigOffset, ContigSize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Window offset: {offset} + length: {length} exceeds sequence length: {size}")]
    OutOfRange {
        offset: ContigOffset,
        length: ContigSize,
        size: ContigSize,
    },

    #[error("Offset: {offset} is out of range for sequence length: {size}")]
    InvalidOffset { offset: ContigOffset, size: ContigSize },
}

pub type SequenceResult<T> = std::result::Result<T, SequenceError>;

#[derive(Error, Debug)]
pub enum GenomeDbError {
    #[error("Error parsing feature record at line {line}: {reason}")]
    FeatureParseError { line: usize, reason: String },

    #[error("Duplicate contig: {0}")]
    DuplicateContig(String),

    #[error("Duplicate feature id: {0}")]
    DuplicateFeature(String),

    #[error("Contig not found: {0}")]
    ContigNotFound(String),

    #[error("Error reading fasta file: {0}")]
    FastaError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
