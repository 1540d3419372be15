use bio::alignment::AlignmentOperation;
use bio::alignment::pairwise::Aligner;
use log::debug;

use genovar_core::models::{Alphabet, ContigOffset, Dna5, DnaString};

/// Kind of a single base alignment edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Match,
    Mismatch,
    Insert,
    Delete,
}

///
/// One base of an alignment between a reference and an alternate allele.
///
/// `reference` is `None` for inserts; `alternate` is `None` for deletes.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditItem {
    pub kind: EditKind,
    pub contig_offset: ContigOffset,
    pub reference: Option<Dna5>,
    pub alternate: Option<Dna5>,
}

impl EditItem {
    fn new(
        kind: EditKind,
        contig_offset: ContigOffset,
        reference: Option<Dna5>,
        alternate: Option<Dna5>,
    ) -> Self {
        EditItem {
            kind,
            contig_offset,
            reference,
            alternate,
        }
    }
}

///
/// Turns a reference/alternate allele pair into per-base edits.
///
/// Returns `None` when the pair cannot be expressed as edits.
///
pub trait SequenceAligner: Send + Sync {
    fn align(
        &self,
        reference: &DnaString,
        alternate: &DnaString,
        contig_offset: ContigOffset,
    ) -> Option<Vec<EditItem>>;
}

///
/// Affine gap global alignment of the alternate allele against the reference.
///
/// Inserted bases are placed at consecutive offsets starting at the next
/// aligned reference base.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalAligner {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for GlobalAligner {
    fn default() -> Self {
        GlobalAligner {
            match_score: 1,
            mismatch_score: -1,
            gap_open: -5,
            gap_extend: -1,
        }
    }
}

fn to_bytes(bases: &[Dna5]) -> Vec<u8> {
    bases.iter().map(|base| base.to_char() as u8).collect()
}

impl SequenceAligner for GlobalAligner {
    fn align(
        &self,
        reference: &DnaString,
        alternate: &DnaString,
        contig_offset: ContigOffset,
    ) -> Option<Vec<EditItem>> {
        let reference = reference.as_slice();
        let alternate = alternate.as_slice();

        let (match_score, mismatch_score) = (self.match_score, self.mismatch_score);
        let score = move |a: u8, b: u8| match a == b {
            true => match_score,
            false => mismatch_score,
        };
        // gap penalties must not be positive
        let mut aligner = Aligner::with_capacity(
            alternate.len(),
            reference.len(),
            self.gap_open.min(0),
            self.gap_extend.min(0),
            score,
        );
        // x is the alternate, y the reference: Ins is an alternate base facing a reference gap
        let alignment = aligner.global(&to_bytes(alternate), &to_bytes(reference));

        let mut edits = Vec::with_capacity(alignment.operations.len());
        let mut ref_index: usize = 0;
        let mut alt_index: usize = 0;
        let mut insert_run: ContigOffset = 0;
        for operation in alignment.operations {
            let ref_offset = contig_offset + ref_index as ContigOffset;
            match operation {
                AlignmentOperation::Match | AlignmentOperation::Subst => {
                    let (ref_base, alt_base) = (*reference.get(ref_index)?, *alternate.get(alt_index)?);
                    let kind = match ref_base == alt_base {
                        true => EditKind::Match,
                        false => EditKind::Mismatch,
                    };
                    edits.push(EditItem::new(kind, ref_offset, Some(ref_base), Some(alt_base)));
                    ref_index += 1;
                    alt_index += 1;
                    insert_run = 0;
                }
                AlignmentOperation::Ins => {
                    let alt_base = *alternate.get(alt_index)?;
                    edits.push(EditItem::new(
                        EditKind::Insert,
                        ref_offset + insert_run,
                        None,
                        Some(alt_base),
                    ));
                    alt_index += 1;
                    insert_run += 1;
                }
                AlignmentOperation::Del => {
                    let ref_base = *reference.get(ref_index)?;
                    edits.push(EditItem::new(EditKind::Delete, ref_offset, Some(ref_base), None));
                    ref_index += 1;
                    insert_run = 0;
                }
                AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {}
            }
        }

        debug!(
            "GlobalAligner, offset: {} reference: {} bases, alternate: {} bases, {} edits, score: {}",
            contig_offset,
            reference.len(),
            alternate.len(),
            edits.len(),
            alignment.score
        );

        Some(edits)
    }
}

///
/// Aligner for VCF style alleles.
///
/// The shared prefix and suffix are trimmed. What remains must be an
/// equal length substitution, a pure insertion or a pure deletion. Any
/// other edit goes to the global fallback, or is declined without one.
///
/// Inserted bases are placed at consecutive offsets starting at the base
/// following the shared prefix.
///
#[derive(Debug, Clone, Copy)]
pub struct AnchoredAligner {
    fallback: Option<GlobalAligner>,
}

impl AnchoredAligner {
    /// Anchored alignment with a [`GlobalAligner`] fallback for complex alleles.
    pub fn new() -> Self {
        AnchoredAligner {
            fallback: Some(GlobalAligner::default()),
        }
    }

    /// Anchored alignment only; complex alleles are declined.
    pub fn strict() -> Self {
        AnchoredAligner { fallback: None }
    }
}

impl Default for AnchoredAligner {
    fn default() -> Self {
        Self::new()
    }
}

fn shared_prefix(reference: &[Dna5], alternate: &[Dna5]) -> usize {
    reference
        .iter()
        .zip(alternate)
        .take_while(|(r, a)| r == a)
        .count()
}

fn shared_suffix(reference: &[Dna5], alternate: &[Dna5]) -> usize {
    reference
        .iter()
        .rev()
        .zip(alternate.iter().rev())
        .take_while(|(r, a)| r == a)
        .count()
}

impl SequenceAligner for AnchoredAligner {
    fn align(
        &self,
        reference_allele: &DnaString,
        alternate_allele: &DnaString,
        contig_offset: ContigOffset,
    ) -> Option<Vec<EditItem>> {
        let reference = reference_allele.as_slice();
        let alternate = alternate_allele.as_slice();

        let prefix = shared_prefix(reference, alternate);
        let suffix = shared_suffix(&reference[prefix..], &alternate[prefix..]);
        let ref_core = &reference[prefix..reference.len() - suffix];
        let alt_core = &alternate[prefix..alternate.len() - suffix];

        let core_offset = contig_offset + prefix as ContigOffset;
        let mut edits: Vec<EditItem> = reference[..prefix]
            .iter()
            .enumerate()
            .map(|(i, base)| {
                EditItem::new(
                    EditKind::Match,
                    contig_offset + i as ContigOffset,
                    Some(*base),
                    Some(*base),
                )
            })
            .collect();

        match (ref_core.len(), alt_core.len()) {
            (0, 0) => {}
            (r, a) if r == a => {
                for (i, (ref_base, alt_base)) in ref_core.iter().zip(alt_core).enumerate() {
                    let kind = match ref_base == alt_base {
                        true => EditKind::Match,
                        false => EditKind::Mismatch,
                    };
                    edits.push(EditItem::new(
                        kind,
                        core_offset + i as ContigOffset,
                        Some(*ref_base),
                        Some(*alt_base),
                    ));
                }
            }
            (0, _) => {
                for (i, alt_base) in alt_core.iter().enumerate() {
                    edits.push(EditItem::new(
                        EditKind::Insert,
                        core_offset + i as ContigOffset,
                        None,
                        Some(*alt_base),
                    ));
                }
            }
            (_, 0) => {
                for (i, ref_base) in ref_core.iter().enumerate() {
                    edits.push(EditItem::new(
                        EditKind::Delete,
                        core_offset + i as ContigOffset,
                        Some(*ref_base),
                        None,
                    ));
                }
            }
            (r, a) => {
                debug!(
                    "AnchoredAligner, complex edit at offset: {} (reference: {} bases, alternate: {} bases)",
                    core_offset, r, a
                );
                return self
                    .fallback
                    .and_then(|global| global.align(reference_allele, alternate_allele, contig_offset));
            }
        }

        Some(edits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn kinds(edits: &[EditItem]) -> Vec<(EditKind, ContigOffset)> {
        edits.iter().map(|edit| (edit.kind, edit.contig_offset)).collect()
    }

    fn align(reference: &str, alternate: &str) -> Option<Vec<EditItem>> {
        AnchoredAligner::new().align(&reference.into(), &alternate.into(), 100)
    }

    fn align_strict(reference: &str, alternate: &str) -> Option<Vec<EditItem>> {
        AnchoredAligner::strict().align(&reference.into(), &alternate.into(), 100)
    }

    #[rstest]
    fn test_snp() {
        let edits = align("A", "G").unwrap();
        assert_eq!(kinds(&edits), vec![(EditKind::Mismatch, 100)]);
        assert_eq!(edits[0].alternate, Some(Dna5::G));
    }

    #[rstest]
    fn test_mnp_keeps_inner_match() {
        let edits = align("ACT", "GCA").unwrap();
        assert_eq!(
            kinds(&edits),
            vec![
                (EditKind::Mismatch, 100),
                (EditKind::Match, 101),
                (EditKind::Mismatch, 102)
            ]
        );
    }

    #[rstest]
    fn test_insert() {
        let edits = align("A", "ATG").unwrap();
        assert_eq!(
            kinds(&edits),
            vec![
                (EditKind::Match, 100),
                (EditKind::Insert, 101),
                (EditKind::Insert, 102)
            ]
        );
        assert_eq!(edits[1].alternate, Some(Dna5::T));
        assert_eq!(edits[1].reference, None);
    }

    #[rstest]
    fn test_delete() {
        let edits = align("ACGT", "AT").unwrap();
        assert_eq!(
            kinds(&edits),
            vec![
                (EditKind::Match, 100),
                (EditKind::Delete, 101),
                (EditKind::Delete, 102)
            ]
        );
        assert_eq!(edits[2].reference, Some(Dna5::G));
    }

    #[rstest]
    #[case("AC", "GTT")]
    #[case("ACG", "TT")]
    fn test_complex_declined(#[case] reference: &str, #[case] alternate: &str) {
        assert!(align_strict(reference, alternate).is_none());
    }

    #[rstest]
    fn test_complex_falls_back_to_global() {
        // two substitutions and one deleted reference base
        let edits = align("ACG", "TT").unwrap();
        let mut offsets: Vec<ContigOffset> = edits.iter().map(|edit| edit.contig_offset).collect();
        offsets.sort();
        assert_eq!(offsets, vec![100, 101, 102]);
        assert_eq!(edits.iter().filter(|edit| edit.kind == EditKind::Mismatch).count(), 2);
        assert_eq!(edits.iter().filter(|edit| edit.kind == EditKind::Delete).count(), 1);
    }

    #[rstest]
    fn test_global_insert_run() {
        let edits = GlobalAligner::default()
            .align(&"AT".into(), &"AGGGT".into(), 10)
            .unwrap();
        assert_eq!(
            kinds(&edits),
            vec![
                (EditKind::Match, 10),
                (EditKind::Insert, 11),
                (EditKind::Insert, 12),
                (EditKind::Insert, 13),
                (EditKind::Match, 11)
            ]
        );
        assert!(edits[1..4].iter().all(|edit| edit.alternate == Some(Dna5::G)));
    }

    #[rstest]
    fn test_global_matches_anchored_on_simple_edits() {
        let global = GlobalAligner::default();
        let edits = global.align(&"ACGT".into(), &"AT".into(), 100).unwrap();
        let deletes: Vec<ContigOffset> = edits
            .iter()
            .filter(|edit| edit.kind == EditKind::Delete)
            .map(|edit| edit.contig_offset)
            .collect();
        assert_eq!(deletes, vec![101, 102]);
    }

    #[rstest]
    fn test_identical_alleles() {
        let edits = align("AC", "AC").unwrap();
        assert!(edits.iter().all(|edit| edit.kind == EditKind::Match));
    }
}
