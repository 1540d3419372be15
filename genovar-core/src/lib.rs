//! Core models for genovar.
//!
//! This crate holds the leaf layer of the variant engine:
//!
//! - fixed alphabets ([`Dna5`], [`ExtendDna5`], [`AminoAcid`]) and the generic
//!   [`AlphabetString`] container
//! - linear and strand-oriented DNA sequences, codons and translation
//! - the genome database models (contigs, genes, coding sequences) that the
//!   coordinate engine and the variant classifier consume
//!
//! ## Quick Start
//!
//! ```rust
//! use genovar_core::models::{Dna5, DnaString};
//!
//! let bases = DnaString::from("ACGTN");
//! let window = bases.substr(1, 3).unwrap();
//! assert_eq!(window.to_string(), "CGT");
//! assert_eq!(Dna5::complement(Dna5::A), Dna5::T);
//! ```
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use self::errors::{GenomeDbError, SequenceError};
pub use self::models::*;
