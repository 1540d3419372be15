use thiserror::Error;

use genovar_core::models::{ContigOffset, ContigSize, Phase};

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("Genome: {0} already exists in the population")]
    DuplicateGenome(String),

    #[error("Contig: {0} already exists in the genome")]
    DuplicateContig(String),

    #[error("Contig: {contig_id} already holds {ploidy} phases, cannot add phase: {phase}")]
    PloidyExceeded {
        contig_id: String,
        ploidy: usize,
        phase: Phase,
    },

    #[error("Compound variant must have members")]
    EmptyCompound,

    #[error("Compound variant members must be contiguous {kind} variants on one contig and phase, offset: {offset}")]
    MalformedCompound { kind: String, offset: ContigOffset },

    #[error("Adjusted offset: {offset} is out of range for sequence size: {size}")]
    MutationOutOfRange { offset: i64, size: ContigSize },

    #[error("Error parsing variant record at line {line}: {reason}")]
    RecordParseError { line: usize, reason: String },

    #[error(transparent)]
    Sequence(#[from] genovar_core::SequenceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type VariantResult<T> = std::result::Result<T, VariantError>;
