pub mod alphabet;
pub mod alphabet_string;
pub mod codon;
pub mod feature;
pub mod genome_db;
pub mod sequence;
pub mod types;

// re-export for cleaner imports
pub use self::alphabet::{Alphabet, AminoAcid, Dna5, ExtendDna5, Nucleotide};
pub use self::alphabet_string::{AlphabetString, AminoString, DnaString, ExtendDnaString};
pub use self::codon::{Codon, translate};
pub use self::feature::{CodingSequence, FeatureInterval, GeneFeature, StrandSense};
pub use self::genome_db::{ContigFeatures, GenomeDatabase, single_sequence_gene};
pub use self::sequence::{DnaSequenceCoding, DnaSequenceLinear};
pub use self::types::{
    ContigId, ContigOffset, ContigSize, FeatureId, GenomeId, OffsetIndex, Phase, SignedOffset,
};
