use std::sync::Arc;

use log::{debug, warn};

use genovar_core::models::{
    Alphabet, ContigId, ContigOffset, Dna5, DnaString, ExtendDna5, GenomeDatabase, GenomeId, Phase,
};

use crate::aligner::{EditKind, SequenceAligner};
use crate::classify::classify_variant;
use crate::evidence::{InfoData, ReadCountEvidence, VariantEvidence};
use crate::variant::{Mutation, Variant, VariantDraft};

/// Separator of multiple alternate alleles in one record.
pub const MULTIPLE_ALT_SEPARATOR: char = ',';

///
/// One parsed variant record, as supplied by the VCF reader.
///
/// `alternate` may list several comma separated alleles.
///
#[derive(Debug, Clone, PartialEq)]
pub struct VcfVariantRecord {
    pub genome_id: GenomeId,
    pub contig_id: ContigId,
    pub phase: Phase,
    pub offset: ContigOffset,
    pub reference: String,
    pub alternate: String,
    pub quality: f64,
    pub info: Option<Arc<InfoData>>,
    pub record_index: usize,
}

impl VcfVariantRecord {
    /// Alternate alleles, skipping symbolic (`<DEL>`), spanning (`*`) and missing (`.`) ones.
    pub fn alternates(&self) -> Vec<&str> {
        self.alternate
            .split(MULTIPLE_ALT_SEPARATOR)
            .map(str::trim)
            .filter(|alt| !(alt.starts_with('<') || *alt == "*" || *alt == "."))
            .collect()
    }
}

///
/// Creates classified variants from records.
///
/// Every allele is split into single base variants (SNPs and the members
/// of insert and delete runs), each of which is classified against the
/// genome database.
///
pub struct VariantFactory<'a, A: SequenceAligner> {
    database: &'a GenomeDatabase,
    aligner: A,
}

impl<'a, A: SequenceAligner> VariantFactory<'a, A> {
    pub fn new(database: &'a GenomeDatabase, aligner: A) -> Self {
        VariantFactory { database, aligner }
    }

    pub fn database(&self) -> &GenomeDatabase {
        self.database
    }

    /// Reference base at an offset, `N` if the contig or its bases are unknown.
    fn reference_base(&self, contig_id: &str, offset: ContigOffset) -> Dna5 {
        self.database
            .contig(contig_id)
            .and_then(|contig| contig.sequence().at(offset))
            .unwrap_or(Dna5::N)
    }

    pub fn create_variants(&self, record: &VcfVariantRecord) -> Vec<Variant> {
        let alternates = record.alternates();
        if alternates.is_empty() {
            warn!(
                "create_variants(), record: {} at {}:{} has no usable alternate allele: '{}'",
                record.record_index, record.contig_id, record.offset, record.alternate
            );
            return Vec::new();
        }

        let reference = DnaString::from(record.reference.as_str());
        let mut variants = Vec::new();

        for alternate in alternates {
            let alternate = DnaString::from(alternate);
            let Some(edits) = self.aligner.align(&reference, &alternate, record.offset) else {
                warn!(
                    "create_variants(), record: {} at {}:{}, cannot align reference: {} to alternate: {}",
                    record.record_index, record.contig_id, record.offset, reference, alternate
                );
                continue;
            };

            for edit in edits {
                let mutation = match (edit.kind, edit.reference, edit.alternate) {
                    (EditKind::Mismatch, Some(reference), Some(mutant)) => Mutation::Snp { reference, mutant },
                    (EditKind::Insert, _, Some(mutant)) => Mutation::Insert {
                        reference: self.reference_base(&record.contig_id, edit.contig_offset),
                        mutant,
                    },
                    (EditKind::Delete, Some(reference), _) => Mutation::Delete { reference },
                    _ => continue,
                };

                let draft = VariantDraft {
                    genome_id: record.genome_id.clone(),
                    contig_id: record.contig_id.clone(),
                    phase: record.phase,
                    offset: edit.contig_offset,
                    mutation,
                    quality: record.quality,
                    evidence: VariantEvidence::from_record(record.record_index, record.info.clone()),
                };
                variants.extend(classify_variant(draft, self.database));
            }
        }

        debug!(
            "create_variants(), record: {} created {} variants",
            record.record_index,
            variants.len()
        );

        variants
    }
}

/// Minimum support for a read count variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadCountThresholds {
    pub min_read_count: u32,
    pub min_proportion: f64,
}

impl Default for ReadCountThresholds {
    fn default() -> Self {
        ReadCountThresholds {
            min_read_count: 1,
            min_proportion: 0.0,
        }
    }
}

///
/// Create variants from the read counts observed at one contig offset.
///
/// `counts` is indexed by [`ExtendDna5`] column. Every non-reference
/// column with a non-zero count becomes a SNP, insert or delete when the
/// total read count and the column's proportion of it meet the thresholds.
///
#[allow(clippy::too_many_arguments)]
pub fn read_count_variants(
    database: &GenomeDatabase,
    genome_id: &str,
    contig_id: &str,
    phase: Phase,
    offset: ContigOffset,
    counts: &[u32],
    quality: f64,
    thresholds: ReadCountThresholds,
) -> Vec<Variant> {
    if counts.len() != ExtendDna5::column_count() {
        warn!(
            "read_count_variants(), expected {} count columns, found {}",
            ExtendDna5::column_count(),
            counts.len()
        );
        return Vec::new();
    }

    let Some(reference) = database
        .contig(contig_id)
        .and_then(|contig| contig.sequence().at(offset))
    else {
        warn!(
            "read_count_variants(), no reference base for contig: {} offset: {}",
            contig_id, offset
        );
        return Vec::new();
    };

    let total_count: u64 = counts.iter().map(|count| u64::from(*count)).sum();
    if total_count < u64::from(thresholds.min_read_count) {
        return Vec::new();
    }

    let mut variants = Vec::new();
    for (column, count) in counts.iter().enumerate() {
        let Some(symbol) = ExtendDna5::from_column(column) else {
            continue;
        };
        if *count == 0 || symbol == ExtendDna5::from(reference) {
            continue;
        }

        let read_count = ReadCountEvidence {
            mutant_count: *count,
            total_count,
            counts: counts.to_vec(),
        };
        if read_count.proportion() < thresholds.min_proportion {
            continue;
        }

        let mutation = match (symbol.base(), symbol.inserted_base()) {
            (Some(mutant), _) => Mutation::Snp { reference, mutant },
            (None, Some(mutant)) => Mutation::Insert { reference, mutant },
            (None, None) => Mutation::Delete { reference },
        };

        let draft = VariantDraft {
            genome_id: genome_id.to_string(),
            contig_id: contig_id.to_string(),
            phase,
            offset,
            mutation,
            quality,
            evidence: VariantEvidence::from_read_count(read_count),
        };
        variants.extend(classify_variant(draft, database));
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    use genovar_core::models::{
        CodingSequence, ContigFeatures, DnaSequenceLinear, FeatureInterval, StrandSense,
    };
    use genovar_core::models::single_sequence_gene;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::aligner::AnchoredAligner;
    use crate::variant::VariantClass;

    #[fixture]
    fn database() -> GenomeDatabase {
        let mut contig = ContigFeatures::new("chr1", DnaSequenceLinear::from("ACGTACGTACGTACGTACGT"));
        contig.add_gene(Arc::new(single_sequence_gene(CodingSequence::new(
            "tx1",
            "gene1",
            "chr1",
            StrandSense::Forward,
            vec![FeatureInterval::new(0, 10)],
        ))));
        let mut database = GenomeDatabase::new("ref");
        database.add_contig(contig).unwrap();
        database
    }

    fn record(offset: ContigOffset, reference: &str, alternate: &str) -> VcfVariantRecord {
        VcfVariantRecord {
            genome_id: "sample1".to_string(),
            contig_id: "chr1".to_string(),
            phase: Phase::Maternal,
            offset,
            reference: reference.to_string(),
            alternate: alternate.to_string(),
            quality: 40.0,
            info: Some(Arc::new(InfoData::parse("DP=10"))),
            record_index: 7,
        }
    }

    #[rstest]
    fn test_multi_alt_split(database: GenomeDatabase) {
        let factory = VariantFactory::new(&database, AnchoredAligner::new());
        let variants = factory.create_variants(&record(2, "G", "A,T,<DEL>"));

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].to_string(), "chr1:2 G>A");
        assert_eq!(variants[1].to_string(), "chr1:2 G>T");
        assert_eq!(variants[0].class(), VariantClass::Coding);
        // both alleles share the record's info block
        let info = variants[0].evidence().info.as_ref().unwrap();
        assert!(Arc::ptr_eq(info, variants[1].evidence().info.as_ref().unwrap()));
    }

    #[rstest]
    fn test_indel_members(database: GenomeDatabase) {
        let factory = VariantFactory::new(&database, AnchoredAligner::new());

        let inserts = factory.create_variants(&record(8, "A", "ATT"));
        assert_eq!(inserts.iter().map(|v| v.offset()).collect::<Vec<_>>(), vec![9, 10]);
        assert!(inserts.iter().all(|v| v.is_insert()));
        // offset 10 is past the coding sequence
        assert_eq!(inserts[1].class(), VariantClass::NonCoding);

        let deletes = factory.create_variants(&record(12, "ACGT", "AT"));
        assert_eq!(deletes.iter().map(|v| v.offset()).collect::<Vec<_>>(), vec![13, 14]);
        assert_eq!(deletes[0].reference(), Dna5::C);
    }

    #[rstest]
    fn test_declined_allele(database: GenomeDatabase) {
        let factory = VariantFactory::new(&database, AnchoredAligner::strict());
        assert!(factory.create_variants(&record(4, "AC", "GTT")).is_empty());
        assert!(factory.create_variants(&record(4, "A", ".")).is_empty());
    }

    #[rstest]
    fn test_complex_allele_members(database: GenomeDatabase) {
        let factory = VariantFactory::new(&database, AnchoredAligner::new());
        let variants = factory.create_variants(&record(0, "ACG", "TT"));

        assert_eq!(variants.len(), 3);
        let mut offsets: Vec<ContigOffset> = variants.iter().map(|v| v.offset()).collect();
        offsets.sort();
        assert_eq!(offsets, vec![0, 1, 2]);
        assert_eq!(variants.iter().filter(|v| v.is_delete()).count(), 1);
        assert!(variants.iter().all(|v| v.class() == VariantClass::Coding));
    }

    #[rstest]
    fn test_read_count_variants(database: GenomeDatabase) {
        // offset 4 is an A; 6 reads of G, 3 of A, 1 deletion
        let mut counts = vec![0u32; ExtendDna5::column_count()];
        counts[ExtendDna5::A.to_column()] = 3;
        counts[ExtendDna5::G.to_column()] = 6;
        counts[ExtendDna5::Delete.to_column()] = 1;

        let thresholds = ReadCountThresholds {
            min_read_count: 5,
            min_proportion: 0.5,
        };
        let variants = read_count_variants(&database, "sample1", "chr1", Phase::Unphased, 4, &counts, 20.0, thresholds);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].to_string(), "chr1:4 A>G");
        assert_eq!(variants[0].evidence().read_count.as_ref().unwrap().mutant_count, 6);

        let permissive = ReadCountThresholds::default();
        let variants = read_count_variants(&database, "sample1", "chr1", Phase::Unphased, 4, &counts, 20.0, permissive);
        assert_eq!(variants.len(), 2);
        assert!(variants[1].is_delete());

        let strict = ReadCountThresholds {
            min_read_count: 11,
            min_proportion: 0.0,
        };
        assert!(read_count_variants(&database, "sample1", "chr1", Phase::Unphased, 4, &counts, 20.0, strict).is_empty());
    }

    #[rstest]
    fn test_read_count_saturated_column(database: GenomeDatabase) {
        let mut counts = vec![0u32; ExtendDna5::column_count()];
        counts[ExtendDna5::A.to_column()] = 1;
        counts[ExtendDna5::G.to_column()] = u32::MAX;

        let thresholds = ReadCountThresholds {
            min_read_count: 100,
            min_proportion: 0.9,
        };
        let variants = read_count_variants(&database, "sample1", "chr1", Phase::Unphased, 4, &counts, 20.0, thresholds);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].to_string(), "chr1:4 A>G");

        let read_count = variants[0].evidence().read_count.as_ref().unwrap();
        assert_eq!(read_count.total_count, u64::from(u32::MAX) + 1);
        assert!(read_count.proportion() > 0.99);
    }
}
