use std::fmt::{self, Display};
use std::ops::Index;

use crate::errors::{SequenceError, SequenceResult};
use crate::models::alphabet::{Alphabet, AminoAcid, Dna5, ExtendDna5, Nucleotide};
use crate::models::types::{ContigOffset, ContigSize};

///
/// An ordered, zero-indexed string of alphabet symbols.
///
/// Iteration is double ended, so reverse strand walks can use `.iter().rev()`
/// without materialising a reversed copy.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlphabetString<A: Alphabet> {
    symbols: Vec<A>,
}

/// A string of the five letter nucleotide alphabet.
pub type DnaString = AlphabetString<Dna5>;
/// A string of the nucleotide alphabet extended with indel markers.
pub type ExtendDnaString = AlphabetString<ExtendDna5>;
/// A string of amino acids.
pub type AminoString = AlphabetString<AminoAcid>;

impl<A: Alphabet> Default for AlphabetString<A> {
    fn default() -> Self {
        AlphabetString {
            symbols: Vec::new(),
        }
    }
}

impl<A: Alphabet> AlphabetString<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        AlphabetString {
            symbols: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> ContigSize {
        self.symbols.len() as ContigSize
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, offset: ContigOffset) -> Option<A> {
        self.symbols.get(offset as usize).copied()
    }

    pub fn as_slice(&self) -> &[A] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.symbols.iter()
    }

    pub fn push_back(&mut self, symbol: A) {
        self.symbols.push(symbol);
    }

    pub fn append(&mut self, other: &AlphabetString<A>) {
        self.symbols.extend_from_slice(&other.symbols);
    }

    ///
    /// Copy the half-open window `[offset, offset + length)` into a new string.
    ///
    /// Windows that extend past the end of the string are an error, never clamped.
    ///
    pub fn substr(&self, offset: ContigOffset, length: ContigSize) -> SequenceResult<Self> {
        let end = offset as u64 + length as u64;
        if end > self.symbols.len() as u64 {
            return Err(SequenceError::OutOfRange {
                offset,
                length,
                size: self.len(),
            });
        }

        Ok(AlphabetString {
            symbols: self.symbols[offset as usize..end as usize].to_vec(),
        })
    }

    /// Replace the symbol at `offset` in place.
    pub fn modify(&mut self, offset: ContigOffset, symbol: A) -> SequenceResult<()> {
        match self.symbols.get_mut(offset as usize) {
            Some(slot) => {
                *slot = symbol;
                Ok(())
            }
            None => Err(SequenceError::InvalidOffset {
                offset,
                size: self.len(),
            }),
        }
    }

    /// Insert `other` so that its first symbol lands at `offset`. `offset == len()` appends.
    pub fn insert(&mut self, offset: ContigOffset, other: &AlphabetString<A>) -> SequenceResult<()> {
        if offset as usize > self.symbols.len() {
            return Err(SequenceError::InvalidOffset {
                offset,
                size: self.len(),
            });
        }

        let index = offset as usize;
        self.symbols
            .splice(index..index, other.symbols.iter().copied());
        Ok(())
    }

    /// Remove the half-open window `[offset, offset + length)`.
    pub fn erase(&mut self, offset: ContigOffset, length: ContigSize) -> SequenceResult<()> {
        let end = offset as u64 + length as u64;
        if end > self.symbols.len() as u64 {
            return Err(SequenceError::OutOfRange {
                offset,
                length,
                size: self.len(),
            });
        }

        self.symbols.drain(offset as usize..end as usize);
        Ok(())
    }
}

impl<A: Nucleotide> AlphabetString<A> {
    /// Reverse complement, read straight off the reverse iterator.
    pub fn reverse_complement(&self) -> Self {
        self.symbols.iter().rev().map(|symbol| symbol.complement()).collect()
    }
}

impl<A: Alphabet> From<&str> for AlphabetString<A> {
    fn from(value: &str) -> Self {
        AlphabetString {
            symbols: value.chars().map(A::convert_char).collect(),
        }
    }
}

impl<A: Alphabet> From<Vec<A>> for AlphabetString<A> {
    fn from(symbols: Vec<A>) -> Self {
        AlphabetString { symbols }
    }
}

impl<A: Alphabet> FromIterator<A> for AlphabetString<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        AlphabetString {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a AlphabetString<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl<A: Alphabet> Index<ContigOffset> for AlphabetString<A> {
    type Output = A;

    fn index(&self, offset: ContigOffset) -> &Self::Output {
        &self.symbols[offset as usize]
    }
}

impl<A: Alphabet> Display for AlphabetString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.symbols.iter().map(|symbol| symbol.to_char()).collect();
        write!(f, "{}", text)
    }
}
