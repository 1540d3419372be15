use log::error;

use crate::models::alphabet::{Alphabet, AminoAcid, Dna5};
use crate::models::alphabet_string::AminoString;
use crate::models::sequence::DnaSequenceCoding;
use crate::models::types::ContigOffset;

pub const CODON_SIZE: usize = 3;

/// The standard genetic code, indexed by `16 * b1 + 4 * b2 + b3` with bases ordered T, C, A, G.
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

fn tcag_index(base: Dna5) -> Option<usize> {
    match base {
        Dna5::T => Some(0),
        Dna5::C => Some(1),
        Dna5::A => Some(2),
        Dna5::G => Some(3),
        Dna5::N => None,
    }
}

/// Three consecutive bases of a coding sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codon {
    bases: [Dna5; CODON_SIZE],
}

impl Codon {
    /// Number of whole codons in a coding sequence.
    pub fn codon_length(sequence: &DnaSequenceCoding) -> ContigOffset {
        sequence.len() / CODON_SIZE as ContigOffset
    }

    ///
    /// Read the codon at `codon_index`.
    ///
    /// An index past the last whole codon is logged and the first codon is
    /// returned instead. A sequence too short to hold any codon gives `NNN`.
    ///
    pub fn new(sequence: &DnaSequenceCoding, codon_index: ContigOffset) -> Self {
        let mut codon_index = codon_index;
        if codon_index >= Codon::codon_length(sequence) {
            error!(
                "Invalid codon specified index:{}, for coding sequence length:{} (first codon returned)",
                codon_index,
                sequence.len()
            );
            codon_index = 0;
        }

        let base_offset = codon_index * CODON_SIZE as ContigOffset;
        let base_at = |i: ContigOffset| sequence.at(base_offset + i).unwrap_or(Dna5::N);

        Codon {
            bases: [base_at(0), base_at(1), base_at(2)],
        }
    }

    pub fn from_bases(bases: [Dna5; CODON_SIZE]) -> Self {
        Codon { bases }
    }

    pub fn bases(&self) -> &[Dna5; CODON_SIZE] {
        &self.bases
    }

    /// Replace one base. Indexes other than 0, 1 or 2 are logged and ignored.
    pub fn modify_base(&mut self, index: usize, base: Dna5) {
        match self.bases.get_mut(index) {
            Some(slot) => *slot = base,
            None => error!(
                "Invalid codon base index specified index:{}, must be < {})",
                index, CODON_SIZE
            ),
        }
    }

    /// Translate with the standard genetic code. Any `N` gives [`AminoAcid::Unknown`].
    pub fn amino_acid(&self) -> AminoAcid {
        let indexes = (
            tcag_index(self.bases[0]),
            tcag_index(self.bases[1]),
            tcag_index(self.bases[2]),
        );

        match indexes {
            (Some(b1), Some(b2), Some(b3)) => {
                AminoAcid::convert_char(STANDARD_CODE[16 * b1 + 4 * b2 + b3] as char)
            }
            _ => AminoAcid::Unknown,
        }
    }

    pub fn is_stop(&self) -> bool {
        self.amino_acid().is_stop()
    }
}

/// Translate every whole codon of a coding sequence; trailing partial codons are ignored.
pub fn translate(sequence: &DnaSequenceCoding) -> AminoString {
    (0..Codon::codon_length(sequence))
        .map(|index| Codon::new(sequence, index).amino_acid())
        .collect()
}
