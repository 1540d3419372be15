use log::{error, warn};

use crate::errors::SequenceResult;
use crate::models::alphabet::Dna5;
use crate::models::alphabet_string::DnaString;
use crate::models::feature::StrandSense;
use crate::models::types::{ContigOffset, ContigSize};

///
/// Forward strand DNA as it lies on a contig (or a window of a contig).
///
/// This is the sequence variants are applied to, so it supports the
/// length-changing edits that indels need.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DnaSequenceLinear {
    bases: DnaString,
}

impl DnaSequenceLinear {
    pub fn new(bases: DnaString) -> Self {
        DnaSequenceLinear { bases }
    }

    pub fn bases(&self) -> &DnaString {
        &self.bases
    }

    pub fn len(&self) -> ContigSize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn at(&self, offset: ContigOffset) -> Option<Dna5> {
        self.bases.get(offset)
    }

    pub fn sub_sequence(&self, offset: ContigOffset, length: ContigSize) -> SequenceResult<Self> {
        Ok(DnaSequenceLinear::new(self.bases.substr(offset, length)?))
    }

    ///
    /// Insert bases so the first inserted base lands at `offset`.
    ///
    /// Returns false (logged) if `offset` is past the end of the sequence.
    ///
    pub fn insert_sub_sequence(&mut self, offset: ContigOffset, inserted: &DnaString) -> bool {
        match self.bases.insert(offset, inserted) {
            Ok(()) => true,
            Err(e) => {
                error!("insert_sub_sequence(), {}", e);
                false
            }
        }
    }

    /// Delete `size` bases starting at `offset`. Returns false (logged) if the window overruns.
    pub fn delete_sub_sequence(&mut self, offset: ContigOffset, size: ContigSize) -> bool {
        match self.bases.erase(offset, size) {
            Ok(()) => true,
            Err(e) => {
                error!("delete_sub_sequence(), {}", e);
                false
            }
        }
    }

    /// Replace a single base. Invalid offsets are logged and the write is ignored.
    pub fn modify_base(&mut self, offset: ContigOffset, base: Dna5) -> bool {
        match self.bases.modify(offset, base) {
            Ok(()) => true,
            Err(e) => {
                error!("modify_base(), {}", e);
                false
            }
        }
    }
}

impl From<&str> for DnaSequenceLinear {
    fn from(value: &str) -> Self {
        DnaSequenceLinear::new(DnaString::from(value))
    }
}

impl From<DnaString> for DnaSequenceLinear {
    fn from(bases: DnaString) -> Self {
        DnaSequenceLinear::new(bases)
    }
}

///
/// Strand oriented DNA: bases read 5' to 3' along the coding strand.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DnaSequenceCoding {
    bases: DnaString,
    strand: StrandSense,
}

impl DnaSequenceCoding {
    pub fn new(bases: DnaString, strand: StrandSense) -> Self {
        DnaSequenceCoding { bases, strand }
    }

    ///
    /// Orient a whole linear sequence: copied as is for the forward strand,
    /// reverse complemented for the reverse strand. An unknown strand is
    /// treated as forward.
    ///
    pub fn from_linear(linear: &DnaSequenceLinear, strand: StrandSense) -> Self {
        let bases = match strand {
            StrandSense::Unknown => {
                warn!("from_linear(), has 'UNKNOWN' ('.') strand assuming 'FORWARD' ('+')");
                linear.bases().clone()
            }
            StrandSense::Forward => linear.bases().clone(),
            StrandSense::Reverse => linear.bases().reverse_complement(),
        };

        DnaSequenceCoding::new(bases, strand)
    }

    pub fn bases(&self) -> &DnaString {
        &self.bases
    }

    pub fn strand(&self) -> StrandSense {
        self.strand
    }

    pub fn len(&self) -> ContigSize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn at(&self, offset: ContigOffset) -> Option<Dna5> {
        self.bases.get(offset)
    }
}
