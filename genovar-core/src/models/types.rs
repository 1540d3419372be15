use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A zero-based base position on the forward strand of a contig.
pub type ContigOffset = u32;
/// A base count.
pub type ContigSize = u32;
/// A signed base count, used for indel shifts and offset adjustments.
pub type SignedOffset = i64;

pub type GenomeId = String;
pub type ContigId = String;
pub type FeatureId = String;

///
/// Which homologous copy of a contig a variant belongs to.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    #[default]
    Unphased,
    Maternal,
    Paternal,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unphased => write!(f, "unphased"),
            Phase::Maternal => write!(f, "maternal"),
            Phase::Paternal => write!(f, "paternal"),
        }
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unphased" | "u" | "." => Ok(Phase::Unphased),
            "maternal" | "a" | "0" => Ok(Phase::Maternal),
            "paternal" | "b" | "1" => Ok(Phase::Paternal),
            _ => Err(format!("Invalid phase: {}", s)),
        }
    }
}

/// Whether offsets are written zero-based (internal) or one-based (VCF/GFF style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetIndex {
    #[default]
    ZeroBased,
    OneBased,
}

impl OffsetIndex {
    pub fn output(&self, offset: ContigOffset) -> u64 {
        match self {
            OffsetIndex::ZeroBased => offset as u64,
            OffsetIndex::OneBased => offset as u64 + 1,
        }
    }
}
