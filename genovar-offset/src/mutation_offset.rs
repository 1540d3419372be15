use std::collections::BTreeMap;

use log::error;

use genovar_core::models::{ContigOffset, SignedOffset};

///
/// Indel adjustment table.
///
/// Records the net size change of every indel applied to a contig, keyed by
/// the reference offset of the indel. An insertion at `offset` places its
/// bases in front of the reference base at `offset`; a deletion at `offset`
/// removes bases starting at `offset`.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantMutationOffset {
    indels: BTreeMap<ContigOffset, SignedOffset>,
}

impl VariantMutationOffset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an indel. Indels at the same offset accumulate; a net zero entry is removed.
    pub fn add_indel(&mut self, offset: ContigOffset, delta: SignedOffset) {
        let entry = self.indels.entry(offset).or_insert(0);
        *entry += delta;
        if *entry == 0 {
            self.indels.remove(&offset);
        }
    }

    pub fn clear(&mut self) {
        self.indels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indels.is_empty()
    }

    pub fn indel_count(&self) -> usize {
        self.indels.len()
    }

    pub fn indels(&self) -> impl Iterator<Item = (&ContigOffset, &SignedOffset)> {
        self.indels.iter()
    }

    /// Net shift of all indels strictly before `offset`.
    pub fn cumulative_shift(&self, offset: ContigOffset) -> SignedOffset {
        self.indels.range(..offset).map(|(_, delta)| delta).sum()
    }

    /// Net shift over the whole table.
    pub fn total_shift(&self) -> SignedOffset {
        self.indels.values().sum()
    }

    ///
    /// Map a reference offset into the mutated sequence.
    ///
    /// A shift that would move the offset below zero is logged and clamped to zero.
    ///
    pub fn adjust_offset(&self, offset: ContigOffset) -> ContigOffset {
        let adjusted = offset as SignedOffset + self.cumulative_shift(offset);
        if adjusted < 0 {
            error!(
                "adjust_offset(), offset: {} shifted by indels to negative offset: {}",
                offset, adjusted
            );
            return 0;
        }

        adjusted as ContigOffset
    }
}
