use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use log::{error, warn};

use genovar_core::models::{CodingSequence, ContigOffset, ContigSize, StrandSense};

use crate::mutation_offset::VariantMutationOffset;

/// Half-open `[start, end)` intervals keyed by start.
pub type ExonOffsetMap = BTreeMap<ContigOffset, ContigOffset>;

///
/// A strand tagged interval map built from a coding sequence.
///
/// `valid` is false when the source was malformed (duplicate or overlapping
/// intervals, unknown strand). The map still holds every interval that could
/// be inserted.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetMap {
    pub strand: StrandSense,
    pub intervals: ExonOffsetMap,
    pub valid: bool,
}

impl OffsetMap {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Sum of interval widths.
    pub fn total_size(&self) -> ContigSize {
        map_size(&self.intervals)
    }
}

pub fn map_size(intervals: &ExonOffsetMap) -> ContigSize {
    intervals
        .iter()
        .map(|(start, end)| end.saturating_sub(*start))
        .sum()
}

/// Unknown strand is reported and treated as forward.
pub(crate) fn oriented_strand(strand: StrandSense, caller: &str, sequence_id: &str) -> StrandSense {
    match strand {
        StrandSense::Unknown => {
            warn!(
                "{}(), Unknown strand (assuming +) for coding sequence id: {}",
                caller, sequence_id
            );
            StrandSense::Forward
        }
        strand => strand,
    }
}

fn insert_interval(
    intervals: &mut ExonOffsetMap,
    start: ContigOffset,
    end: ContigOffset,
    caller: &str,
    sequence_id: &str,
) -> bool {
    match intervals.entry(start) {
        Entry::Occupied(_) => {
            error!(
                "{}(), Duplicate exon offset: {} for coding sequence id: {}",
                caller, start, sequence_id
            );
            false
        }
        Entry::Vacant(entry) => {
            entry.insert(end);
            true
        }
    }
}

fn has_overlap(intervals: &ExonOffsetMap, sequence_id: &str) -> bool {
    let mut overlap = false;
    for ((_, previous_end), (start, _)) in intervals.iter().zip(intervals.iter().skip(1)) {
        if start < previous_end {
            error!(
                "Overlapping exon at offset: {} (previous end: {}) for coding sequence id: {}",
                start, previous_end, sequence_id
            );
            overlap = true;
        }
    }

    overlap
}

///
/// Build the exon map of a coding sequence from its CDS intervals.
///
/// Duplicate starts are logged and dropped; the map is returned with
/// `valid == false`.
///
pub fn exon_offset_map(sequence: &CodingSequence) -> OffsetMap {
    let mut valid = sequence.strand() != StrandSense::Unknown;
    let strand = oriented_strand(sequence.strand(), "exon_offset_map", sequence.id());

    let mut intervals = ExonOffsetMap::new();
    for cds in sequence.cds() {
        valid &= insert_interval(&mut intervals, cds.begin, cds.end, "exon_offset_map", sequence.id());
    }
    valid &= !has_overlap(&intervals, sequence.id());

    OffsetMap {
        strand,
        intervals,
        valid,
    }
}

///
/// The gaps between consecutive exons.
///
/// There is one intron per pair of adjacent exons, so a single exon
/// coding sequence yields an empty map.
///
pub fn intron_offset_map(sequence: &CodingSequence) -> OffsetMap {
    let exons = exon_offset_map(sequence);

    let intervals = exons
        .intervals
        .iter()
        .zip(exons.intervals.iter().skip(1))
        .map(|((_, exon_end), (next_start, _))| (*exon_end, *next_start.max(exon_end)))
        .collect();

    OffsetMap {
        strand: exons.strand,
        intervals,
        valid: exons.valid,
    }
}

///
/// The exon map moved into mutated sequence coordinates.
///
/// Each start and end is shifted independently by the net indel size before
/// it, so an exon's width changes by the indels that fall inside it.
///
pub fn exon_mutant_offset(sequence: &CodingSequence, indel_adjust: &VariantMutationOffset) -> OffsetMap {
    let reference = exon_offset_map(sequence);
    let mut valid = reference.valid;

    let mut intervals = ExonOffsetMap::new();
    for (start, end) in &reference.intervals {
        let mutant_start = indel_adjust.adjust_offset(*start);
        let mutant_end = indel_adjust.adjust_offset(*end).max(mutant_start);
        valid &= insert_interval(
            &mut intervals,
            mutant_start,
            mutant_end,
            "exon_mutant_offset",
            sequence.id(),
        );
    }

    OffsetMap {
        strand: reference.strand,
        intervals,
        valid,
    }
}
