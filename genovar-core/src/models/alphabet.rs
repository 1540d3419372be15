use std::fmt::Debug;
use std::hash::Hash;

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed set of single character symbols.
///
/// Every symbol has exactly one printable character and exactly one column
/// index. Column indexes are the positions of the symbols in [`Alphabet::SYMBOLS`],
/// which are the layout used by read count tables.
pub trait Alphabet: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// All symbols, in column order.
    const SYMBOLS: &'static [Self];

    /// The symbol unrecognised characters convert to.
    const UNKNOWN: Self;

    /// Printable character of the symbol.
    fn to_char(self) -> char;

    /// Match a character exactly (upper case), `None` if it is not in the alphabet.
    fn from_upper_char(chr: char) -> Option<Self>;

    /// Convert any character to a symbol. Case insensitive and total;
    /// unrecognised characters are logged and map to [`Alphabet::UNKNOWN`].
    fn convert_char(chr: char) -> Self {
        match Self::from_upper_char(chr.to_ascii_uppercase()) {
            Some(symbol) => symbol,
            None => {
                warn!(
                    "Invalid symbol: '{}' converted to: '{}'",
                    chr,
                    Self::UNKNOWN.to_char()
                );
                Self::UNKNOWN
            }
        }
    }

    fn to_column(self) -> usize {
        // SYMBOLS is small and every symbol is present exactly once.
        Self::SYMBOLS
            .iter()
            .position(|symbol| *symbol == self)
            .unwrap_or_else(|| unreachable!("symbol {:?} missing from its alphabet", self))
    }

    fn from_column(column: usize) -> Option<Self> {
        Self::SYMBOLS.get(column).copied()
    }

    fn column_count() -> usize {
        Self::SYMBOLS.len()
    }
}

/// Nucleotide alphabets have a complementary base for every symbol.
pub trait Nucleotide: Alphabet {
    fn complement(self) -> Self;
}

///
/// The standard five letter DNA alphabet. `U` is read as `T`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dna5 {
    A,
    C,
    G,
    T,
    N,
}

impl Dna5 {
    pub fn complement(self) -> Self {
        <Self as Nucleotide>::complement(self)
    }
}

impl Alphabet for Dna5 {
    const SYMBOLS: &'static [Self] = &[Dna5::A, Dna5::C, Dna5::G, Dna5::T, Dna5::N];
    const UNKNOWN: Self = Dna5::N;

    fn to_char(self) -> char {
        match self {
            Dna5::A => 'A',
            Dna5::C => 'C',
            Dna5::G => 'G',
            Dna5::T => 'T',
            Dna5::N => 'N',
        }
    }

    fn from_upper_char(chr: char) -> Option<Self> {
        match chr {
            'A' => Some(Dna5::A),
            'C' => Some(Dna5::C),
            'G' => Some(Dna5::G),
            'T' | 'U' => Some(Dna5::T),
            'N' => Some(Dna5::N),
            _ => None,
        }
    }

    fn to_column(self) -> usize {
        self as usize
    }
}

impl Nucleotide for Dna5 {
    fn complement(self) -> Self {
        match self {
            Dna5::A => Dna5::T,
            Dna5::C => Dna5::G,
            Dna5::G => Dna5::C,
            Dna5::T => Dna5::A,
            Dna5::N => Dna5::N,
        }
    }
}

///
/// The DNA5 alphabet extended with indel markers, used by read count tables.
///
/// `X` marks a deleted base; `E`, `F`, `I`, `J` and `K` mark an inserted
/// A, C, G, T and N respectively (K is the unknown inserted base).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExtendDna5 {
    A,
    C,
    G,
    T,
    N,
    Delete,
    InsertA,
    InsertC,
    InsertG,
    InsertT,
    InsertN,
}

impl ExtendDna5 {
    pub fn is_base_code(self) -> bool {
        self.base().is_some()
    }

    pub fn is_deletion(self) -> bool {
        self == ExtendDna5::Delete
    }

    pub fn is_insertion(self) -> bool {
        self.inserted_base().is_some()
    }

    /// The plain base for base codes.
    pub fn base(self) -> Option<Dna5> {
        match self {
            ExtendDna5::A => Some(Dna5::A),
            ExtendDna5::C => Some(Dna5::C),
            ExtendDna5::G => Some(Dna5::G),
            ExtendDna5::T => Some(Dna5::T),
            ExtendDna5::N => Some(Dna5::N),
            _ => None,
        }
    }

    /// The insertion marker for a base.
    pub fn insertion_of(base: Dna5) -> Self {
        match base {
            Dna5::A => ExtendDna5::InsertA,
            Dna5::C => ExtendDna5::InsertC,
            Dna5::G => ExtendDna5::InsertG,
            Dna5::T => ExtendDna5::InsertT,
            Dna5::N => ExtendDna5::InsertN,
        }
    }

    /// The inserted base for insertion markers.
    pub fn inserted_base(self) -> Option<Dna5> {
        match self {
            ExtendDna5::InsertA => Some(Dna5::A),
            ExtendDna5::InsertC => Some(Dna5::C),
            ExtendDna5::InsertG => Some(Dna5::G),
            ExtendDna5::InsertT => Some(Dna5::T),
            ExtendDna5::InsertN => Some(Dna5::N),
            _ => None,
        }
    }
}

impl From<Dna5> for ExtendDna5 {
    fn from(base: Dna5) -> Self {
        match base {
            Dna5::A => ExtendDna5::A,
            Dna5::C => ExtendDna5::C,
            Dna5::G => ExtendDna5::G,
            Dna5::T => ExtendDna5::T,
            Dna5::N => ExtendDna5::N,
        }
    }
}

impl Alphabet for ExtendDna5 {
    const SYMBOLS: &'static [Self] = &[
        ExtendDna5::A,
        ExtendDna5::C,
        ExtendDna5::G,
        ExtendDna5::T,
        ExtendDna5::N,
        ExtendDna5::Delete,
        ExtendDna5::InsertA,
        ExtendDna5::InsertC,
        ExtendDna5::InsertG,
        ExtendDna5::InsertT,
        ExtendDna5::InsertN,
    ];
    const UNKNOWN: Self = ExtendDna5::N;

    fn to_char(self) -> char {
        match self {
            ExtendDna5::A => 'A',
            ExtendDna5::C => 'C',
            ExtendDna5::G => 'G',
            ExtendDna5::T => 'T',
            ExtendDna5::N => 'N',
            ExtendDna5::Delete => 'X',
            ExtendDna5::InsertA => 'E',
            ExtendDna5::InsertC => 'F',
            ExtendDna5::InsertG => 'I',
            ExtendDna5::InsertT => 'J',
            ExtendDna5::InsertN => 'K',
        }
    }

    fn from_upper_char(chr: char) -> Option<Self> {
        match chr {
            'A' => Some(ExtendDna5::A),
            'C' => Some(ExtendDna5::C),
            'G' => Some(ExtendDna5::G),
            'T' | 'U' => Some(ExtendDna5::T),
            'N' => Some(ExtendDna5::N),
            'X' => Some(ExtendDna5::Delete),
            'E' => Some(ExtendDna5::InsertA),
            'F' => Some(ExtendDna5::InsertC),
            'I' => Some(ExtendDna5::InsertG),
            'J' => Some(ExtendDna5::InsertT),
            'K' => Some(ExtendDna5::InsertN),
            _ => None,
        }
    }

    fn to_column(self) -> usize {
        self as usize
    }
}

impl Nucleotide for ExtendDna5 {
    fn complement(self) -> Self {
        match self {
            ExtendDna5::A => ExtendDna5::T,
            ExtendDna5::C => ExtendDna5::G,
            ExtendDna5::G => ExtendDna5::C,
            ExtendDna5::T => ExtendDna5::A,
            ExtendDna5::N => ExtendDna5::N,
            ExtendDna5::Delete => ExtendDna5::Delete,
            ExtendDna5::InsertA => ExtendDna5::InsertT,
            ExtendDna5::InsertC => ExtendDna5::InsertG,
            ExtendDna5::InsertG => ExtendDna5::InsertC,
            ExtendDna5::InsertT => ExtendDna5::InsertA,
            ExtendDna5::InsertN => ExtendDna5::InsertN,
        }
    }
}

///
/// The twenty standard amino acids, the stop codon (`*`) and an unknown residue (`X`).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AminoAcid {
    Ala,
    Arg,
    Asn,
    Asp,
    Cys,
    Gln,
    Glu,
    Gly,
    His,
    Ile,
    Leu,
    Lys,
    Met,
    Phe,
    Pro,
    Ser,
    Thr,
    Trp,
    Tyr,
    Val,
    Stop,
    Unknown,
}

impl AminoAcid {
    pub fn is_stop(self) -> bool {
        self == AminoAcid::Stop
    }
}

impl Alphabet for AminoAcid {
    const SYMBOLS: &'static [Self] = &[
        AminoAcid::Ala,
        AminoAcid::Arg,
        AminoAcid::Asn,
        AminoAcid::Asp,
        AminoAcid::Cys,
        AminoAcid::Gln,
        AminoAcid::Glu,
        AminoAcid::Gly,
        AminoAcid::His,
        AminoAcid::Ile,
        AminoAcid::Leu,
        AminoAcid::Lys,
        AminoAcid::Met,
        AminoAcid::Phe,
        AminoAcid::Pro,
        AminoAcid::Ser,
        AminoAcid::Thr,
        AminoAcid::Trp,
        AminoAcid::Tyr,
        AminoAcid::Val,
        AminoAcid::Stop,
        AminoAcid::Unknown,
    ];
    const UNKNOWN: Self = AminoAcid::Unknown;

    fn to_char(self) -> char {
        match self {
            AminoAcid::Ala => 'A',
            AminoAcid::Arg => 'R',
            AminoAcid::Asn => 'N',
            AminoAcid::Asp => 'D',
            AminoAcid::Cys => 'C',
            AminoAcid::Gln => 'Q',
            AminoAcid::Glu => 'E',
            AminoAcid::Gly => 'G',
            AminoAcid::His => 'H',
            AminoAcid::Ile => 'I',
            AminoAcid::Leu => 'L',
            AminoAcid::Lys => 'K',
            AminoAcid::Met => 'M',
            AminoAcid::Phe => 'F',
            AminoAcid::Pro => 'P',
            AminoAcid::Ser => 'S',
            AminoAcid::Thr => 'T',
            AminoAcid::Trp => 'W',
            AminoAcid::Tyr => 'Y',
            AminoAcid::Val => 'V',
            AminoAcid::Stop => '*',
            AminoAcid::Unknown => 'X',
        }
    }

    fn from_upper_char(chr: char) -> Option<Self> {
        match chr {
            'A' => Some(AminoAcid::Ala),
            'R' => Some(AminoAcid::Arg),
            'N' => Some(AminoAcid::Asn),
            'D' => Some(AminoAcid::Asp),
            'C' => Some(AminoAcid::Cys),
            'Q' => Some(AminoAcid::Gln),
            'E' => Some(AminoAcid::Glu),
            'G' => Some(AminoAcid::Gly),
            'H' => Some(AminoAcid::His),
            'I' => Some(AminoAcid::Ile),
            'L' => Some(AminoAcid::Leu),
            'K' => Some(AminoAcid::Lys),
            'M' => Some(AminoAcid::Met),
            'F' => Some(AminoAcid::Phe),
            'P' => Some(AminoAcid::Pro),
            'S' => Some(AminoAcid::Ser),
            'T' => Some(AminoAcid::Thr),
            'W' => Some(AminoAcid::Trp),
            'Y' => Some(AminoAcid::Tyr),
            'V' => Some(AminoAcid::Val),
            '*' => Some(AminoAcid::Stop),
            'X' => Some(AminoAcid::Unknown),
            _ => None,
        }
    }

    fn to_column(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn assert_columns_round_trip<A: Alphabet>() {
        for symbol in A::SYMBOLS {
            assert_eq!(A::from_column(symbol.to_column()), Some(*symbol));
        }
        assert_eq!(A::from_column(A::column_count()), None);
    }

    fn assert_chars_round_trip<A: Alphabet>() {
        for symbol in A::SYMBOLS {
            assert_eq!(A::convert_char(symbol.to_char()), *symbol);
            assert_eq!(
                A::convert_char(symbol.to_char().to_ascii_lowercase()),
                *symbol
            );
        }
    }

    #[rstest]
    fn test_columns_round_trip() {
        assert_columns_round_trip::<Dna5>();
        assert_columns_round_trip::<ExtendDna5>();
        assert_columns_round_trip::<AminoAcid>();
    }

    #[rstest]
    fn test_chars_round_trip() {
        assert_chars_round_trip::<Dna5>();
        assert_chars_round_trip::<ExtendDna5>();
        assert_chars_round_trip::<AminoAcid>();
    }

    #[rstest]
    fn test_complement_is_involution() {
        for base in Dna5::SYMBOLS {
            assert_eq!(base.complement().complement(), *base);
        }
        for symbol in ExtendDna5::SYMBOLS {
            assert_eq!(symbol.complement().complement(), *symbol);
        }
        assert_eq!(Dna5::N.complement(), Dna5::N);
    }

    #[rstest]
    #[case('a', Dna5::A)]
    #[case('u', Dna5::T)]
    #[case('U', Dna5::T)]
    #[case('?', Dna5::N)]
    #[case('-', Dna5::N)]
    fn test_convert_char(#[case] chr: char, #[case] expected: Dna5) {
        assert_eq!(Dna5::convert_char(chr), expected);
    }

    #[rstest]
    fn test_extend_markers() {
        assert!(ExtendDna5::Delete.is_deletion());
        assert!(ExtendDna5::InsertG.is_insertion());
        assert_eq!(ExtendDna5::InsertG.inserted_base(), Some(Dna5::G));
        assert!(ExtendDna5::C.is_base_code());
        assert_eq!(ExtendDna5::convert_char('k'), ExtendDna5::InsertN);
        assert_eq!(ExtendDna5::from(Dna5::T), ExtendDna5::T);
    }

    #[rstest]
    fn test_dna5_columns_are_stable() {
        assert_eq!(Dna5::A.to_column(), 0);
        assert_eq!(Dna5::N.to_column(), 4);
        assert_eq!(ExtendDna5::Delete.to_column(), 5);
    }
}
