use std::fmt::{self, Display};
use std::sync::Arc;

use log::{error, warn};

use genovar_core::models::{
    Alphabet, ContigOffset, ContigSize, DnaSequenceLinear, DnaString, OffsetIndex, Phase,
    SignedOffset,
};

use crate::errors::{VariantError, VariantResult};
use crate::variant::{Mutation, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Insert,
    Delete,
}

impl CompoundKind {
    fn of(variant: &Variant) -> Option<Self> {
        match variant.mutation() {
            Mutation::Insert { .. } => Some(CompoundKind::Insert),
            Mutation::Delete { .. } => Some(CompoundKind::Delete),
            Mutation::Snp { .. } => None,
        }
    }
}

impl Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundKind::Insert => write!(f, "insert"),
            CompoundKind::Delete => write!(f, "delete"),
        }
    }
}

///
/// A multi-base insert or delete made of single base members.
///
/// Members lie on one contig and phase, at contiguous increasing offsets,
/// and are all inserts or all deletes.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundVariant {
    kind: CompoundKind,
    members: Vec<Arc<Variant>>,
}

impl CompoundVariant {
    pub fn new(members: Vec<Arc<Variant>>) -> VariantResult<Self> {
        let first = members.first().ok_or(VariantError::EmptyCompound)?;
        let kind = CompoundKind::of(first).ok_or_else(|| VariantError::MalformedCompound {
            kind: first.mutation().name().to_string(),
            offset: first.offset(),
        })?;

        for (index, member) in members.iter().enumerate() {
            let contiguous = member.offset() == first.offset() + index as ContigOffset;
            if !contiguous
                || CompoundKind::of(member) != Some(kind)
                || member.contig_id() != first.contig_id()
                || member.phase() != first.phase()
            {
                return Err(VariantError::MalformedCompound {
                    kind: kind.to_string(),
                    offset: member.offset(),
                });
            }
        }

        Ok(CompoundVariant { kind, members })
    }

    pub fn kind(&self) -> CompoundKind {
        self.kind
    }

    pub fn members(&self) -> &[Arc<Variant>] {
        &self.members
    }

    /// Offset of the first member.
    pub fn offset(&self) -> ContigOffset {
        self.members[0].offset()
    }

    pub fn contig_id(&self) -> &str {
        self.members[0].contig_id()
    }

    pub fn phase(&self) -> Phase {
        self.members[0].phase()
    }

    pub fn size(&self) -> ContigSize {
        self.members.len() as ContigSize
    }

    /// `+(n)` or `-(n)` followed by the offset.
    pub fn mutation_text(&self, output_index: OffsetIndex) -> String {
        let sign = match self.kind {
            CompoundKind::Insert => '+',
            CompoundKind::Delete => '-',
        };
        format!("{}({}){}", sign, self.size(), output_index.output(self.offset()))
    }

    ///
    /// Apply the run to a linear sequence.
    ///
    /// `offset_adjust` maps the compound's contig offset to an offset in
    /// `sequence`. Reference base mismatches are logged and do not stop the
    /// edit. Returns the change in sequence length; if the adjusted window
    /// does not fit the sequence, it is left untouched and an error returned.
    ///
    pub fn mutate_sequence(
        &self,
        offset_adjust: SignedOffset,
        sequence: &mut DnaSequenceLinear,
    ) -> VariantResult<SignedOffset> {
        let adjusted = self.offset() as SignedOffset + offset_adjust;
        let sequence_size = sequence.len();
        let out_of_range = || {
            error!(
                "mutate_sequence(), calculated sequence offset: {} is out of range for sequence size: {}, variant: {}",
                adjusted,
                sequence_size,
                self.mutation_text(OffsetIndex::ZeroBased)
            );
            VariantError::MutationOutOfRange {
                offset: adjusted,
                size: sequence_size,
            }
        };

        if adjusted < 0 || adjusted >= sequence_size as SignedOffset {
            return Err(out_of_range());
        }
        let sequence_offset = adjusted as ContigOffset;
        if self.kind == CompoundKind::Delete && sequence_offset + self.size() > sequence_size {
            return Err(out_of_range());
        }

        self.check_reference(sequence, sequence_offset);

        match self.kind {
            CompoundKind::Insert => {
                let inserted: DnaString = self
                    .members
                    .iter()
                    .filter_map(|member| match member.mutation() {
                        Mutation::Insert { mutant, .. } => Some(*mutant),
                        _ => None,
                    })
                    .collect();
                sequence.insert_sub_sequence(sequence_offset, &inserted);
                Ok(inserted.len() as SignedOffset)
            }
            CompoundKind::Delete => {
                sequence.delete_sub_sequence(sequence_offset, self.size());
                Ok(-(self.size() as SignedOffset))
            }
        }
    }

    fn check_reference(&self, sequence: &DnaSequenceLinear, sequence_offset: ContigOffset) {
        for (index, member) in self.members.iter().enumerate() {
            let base = sequence.at(sequence_offset + index as ContigOffset);
            if base != Some(member.reference()) {
                warn!(
                    "mutate_sequence(), {} reference base: {} does not match sequence base: {} at contig: {} offset: {}",
                    self.kind,
                    member.reference().to_char(),
                    base.map(|base| base.to_char()).unwrap_or('-'),
                    member.contig_id(),
                    member.offset()
                );
            }
        }
    }
}

impl Display for CompoundVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.contig_id(),
            self.mutation_text(OffsetIndex::ZeroBased)
        )
    }
}

/// Either a compound run or a variant that is not part of one.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationItem {
    Single(Arc<Variant>),
    Compound(CompoundVariant),
}

impl MutationItem {
    pub fn offset(&self) -> ContigOffset {
        match self {
            MutationItem::Single(variant) => variant.offset(),
            MutationItem::Compound(compound) => compound.offset(),
        }
    }
}

///
/// Group offset-ordered variants into compound runs.
///
/// Consecutive inserts (or deletes) on the same contig and phase at
/// contiguous offsets form a compound when the run has two or more members;
/// everything else is returned as a single.
///
pub fn aggregate_compounds(variants: &[Arc<Variant>]) -> Vec<MutationItem> {
    let mut items = Vec::new();
    let mut run: Vec<Arc<Variant>> = Vec::new();

    let flush = |run: &mut Vec<Arc<Variant>>, items: &mut Vec<MutationItem>| match run.len() {
        0 => {}
        1 => items.push(MutationItem::Single(run.remove(0))),
        _ => match CompoundVariant::new(std::mem::take(run)) {
            Ok(compound) => items.push(MutationItem::Compound(compound)),
            Err(e) => error!("aggregate_compounds(), {}", e),
        },
    };

    for variant in variants {
        let extends_run = run.last().is_some_and(|last| {
            CompoundKind::of(variant).is_some()
                && CompoundKind::of(last) == CompoundKind::of(variant)
                && last.offset() + 1 == variant.offset()
                && last.contig_id() == variant.contig_id()
                && last.phase() == variant.phase()
        });

        if !extends_run {
            flush(&mut run, &mut items);
        }

        match CompoundKind::of(variant) {
            Some(_) => run.push(variant.clone()),
            None => items.push(MutationItem::Single(variant.clone())),
        }
    }
    flush(&mut run, &mut items);

    items
}
