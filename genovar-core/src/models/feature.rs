use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::models::types::{ContigId, ContigOffset, ContigSize, FeatureId};

/// Strand of a genomic feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrandSense {
    #[default]
    Forward,
    Reverse,
    Unknown,
}

impl Display for StrandSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrandSense::Forward => write!(f, "+"),
            StrandSense::Reverse => write!(f, "-"),
            StrandSense::Unknown => write!(f, "."),
        }
    }
}

impl FromStr for StrandSense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(StrandSense::Forward),
            "-" => Ok(StrandSense::Reverse),
            "." | "?" => Ok(StrandSense::Unknown),
            _ => Err(format!("Invalid strand: {}", s)),
        }
    }
}

///
/// A half-open `[begin, end)` contig interval of a feature.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureInterval {
    pub begin: ContigOffset,
    pub end: ContigOffset,
}

impl FeatureInterval {
    pub fn new(begin: ContigOffset, end: ContigOffset) -> Self {
        FeatureInterval { begin, end }
    }

    pub fn width(&self) -> ContigSize {
        self.end.saturating_sub(self.begin)
    }

    pub fn contains(&self, offset: ContigOffset) -> bool {
        offset >= self.begin && offset < self.end
    }
}

///
/// A coding sequence (a transcript's CDS) as supplied by the genome database.
///
/// The CDS intervals are kept in provider order; consumers that need them
/// sorted build an exon map.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodingSequence {
    id: FeatureId,
    gene_id: FeatureId,
    contig_id: ContigId,
    strand: StrandSense,
    cds: Vec<FeatureInterval>,
}

impl CodingSequence {
    pub fn new(
        id: impl Into<FeatureId>,
        gene_id: impl Into<FeatureId>,
        contig_id: impl Into<ContigId>,
        strand: StrandSense,
        cds: Vec<FeatureInterval>,
    ) -> Self {
        CodingSequence {
            id: id.into(),
            gene_id: gene_id.into(),
            contig_id: contig_id.into(),
            strand,
            cds,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn contig_id(&self) -> &str {
        &self.contig_id
    }

    pub fn strand(&self) -> StrandSense {
        self.strand
    }

    pub fn cds(&self) -> &[FeatureInterval] {
        &self.cds
    }

    /// True if the offset falls inside any CDS interval.
    pub fn is_within_coding(&self, offset: ContigOffset) -> bool {
        self.cds.iter().any(|interval| interval.contains(offset))
    }

    /// Smallest CDS begin and largest CDS end.
    pub fn bounds(&self) -> Option<FeatureInterval> {
        let begin = self.cds.iter().map(|interval| interval.begin).min()?;
        let end = self.cds.iter().map(|interval| interval.end).max()?;
        Some(FeatureInterval::new(begin, end))
    }
}

///
/// A gene and the coding sequences annotated within it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneFeature {
    id: FeatureId,
    contig_id: ContigId,
    interval: FeatureInterval,
    strand: StrandSense,
    coding_sequences: Vec<Arc<CodingSequence>>,
}

impl GeneFeature {
    pub fn new(
        id: impl Into<FeatureId>,
        contig_id: impl Into<ContigId>,
        interval: FeatureInterval,
        strand: StrandSense,
        coding_sequences: Vec<Arc<CodingSequence>>,
    ) -> Self {
        GeneFeature {
            id: id.into(),
            contig_id: contig_id.into(),
            interval,
            strand,
            coding_sequences,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn contig_id(&self) -> &str {
        &self.contig_id
    }

    pub fn interval(&self) -> FeatureInterval {
        self.interval
    }

    pub fn strand(&self) -> StrandSense {
        self.strand
    }

    pub fn coding_sequences(&self) -> &[Arc<CodingSequence>] {
        &self.coding_sequences
    }

    pub fn contains(&self, offset: ContigOffset) -> bool {
        self.interval.contains(offset)
    }
}
