//! Coordinate translation between contig space and coding sequence space.
//!
//! A coding sequence is described by its CDS intervals on the forward strand
//! of a contig. This crate turns those intervals into sorted, half-open
//! `[start, end)` exon (and intron) maps and translates offsets in both
//! directions:
//!
//! - **contig → coding**: a forward strand contig offset to a stranded offset
//!   within the concatenated exons, plus the total coding length
//! - **coding → contig**: the inverse
//! - **sub-sequence extraction**: copy (forward) or reverse complement
//!   (reverse) the exon slices of a linear window
//! - **indel adjustment**: shift exon boundaries by the net size of the
//!   indels applied to a mutated sequence
//!
//! Maps are rebuilt from the coding sequence on every call; nothing is cached.
//!
//! ## Quick Start
//!
//! ```rust
//! use genovar_core::models::StrandSense;
//! use genovar_offset::{ExonOffsetMap, coding_sequence_contig_offset, offset_within_coding_sequence};
//!
//! let exons = ExonOffsetMap::from([(10, 20), (30, 35)]);
//!
//! let coding = offset_within_coding_sequence(&exons, StrandSense::Forward, 12);
//! assert!(coding.found);
//! assert_eq!((coding.offset, coding.length), (2, 15));
//!
//! let contig = coding_sequence_contig_offset(&exons, StrandSense::Forward, 12);
//! assert_eq!(contig.offset, 32);
//!
//! // offset 25 is intronic
//! assert!(!offset_within_coding_sequence(&exons, StrandSense::Forward, 25).found);
//! ```
pub mod coding_offset;
pub mod errors;
pub mod exon_map;
pub mod mutation_offset;
pub mod sub_sequence;

// re-exports
pub use self::coding_offset::{
    CodingOffset, coding_sequence_contig_offset, mutant_offset_within_coding_sequence,
    offset_within_coding_sequence, ref_coding_sequence_contig_offset,
    ref_offset_within_coding_sequence,
};
pub use self::errors::{OffsetError, OffsetResult};
pub use self::exon_map::{
    ExonOffsetMap, OffsetMap, exon_mutant_offset, exon_offset_map, intron_offset_map,
};
pub use self::mutation_offset::VariantMutationOffset;
pub use self::sub_sequence::{
    coding_sub_sequence, mutant_coding_sub_sequence, ref_coding_sub_sequence,
    ref_intron_sub_sequence, try_coding_sub_sequence,
};
