//! # genovar
//!
//! Genome variant collections and coordinate translation.
//!
//! Each module is a separate crate behind a cargo feature:
//!
//! - `core`: alphabets, sequences, codons and the genome database models
//! - `offset`: exon maps and contig/coding sequence offset translation
//! - `variant`: variants, the population/genome/contig/phase hierarchy and its set algebra

#[cfg(feature = "core")]
#[doc(inline)]
pub use genovar_core as core;

#[cfg(feature = "offset")]
#[doc(inline)]
pub use genovar_offset as offset;

#[cfg(feature = "variant")]
#[doc(inline)]
pub use genovar_variant as variant;
