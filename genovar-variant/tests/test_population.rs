//! End to end tests: a genome database and a variant table loaded from disk,
//! built into a population, then compared, filtered and translated.

use std::collections::BTreeSet;
use std::io::Write;

use genovar_core::models::{ContigOffset, GenomeDatabase, Phase, translate};
use genovar_offset::ref_offset_within_coding_sequence;
use genovar_variant::*;

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::NamedTempFile;

//                 0         1
//                 0123456789012345
const CHR1: &str = "NNATGAAACCCTGANN";

fn write_lines(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write");
    }
    file
}

#[fixture]
fn database() -> GenomeDatabase {
    let features = write_lines(&[
        "# contig\tgene\tsequence\tbegin\tend\tstrand",
        "chr1\tgene1\ttx1\t2\t8\t+",
        "chr1\tgene1\ttx1\t11\t14\t+",
    ]);
    let fasta = write_lines(&[">chr1", CHR1, ">chr2", "ACGTACGT"]);

    let mut database =
        GenomeDatabase::from_feature_table("ref", features.path()).expect("Failed to load features");
    database.load_fasta(fasta.path()).expect("Failed to load fasta");
    database
}

#[fixture]
fn records() -> Vec<VcfVariantRecord> {
    let table = write_lines(&[
        "#genome\tcontig\tphase\tpos\tref\talt\tqual\tinfo",
        "sample1\tchr1\tmaternal\t5\tG\tGGGG\t50\tDP=20",
        "sample1\tchr1\tpaternal\t3\tA\tG\t20\tDP=4;LOWQ",
        "sample2\tchr1\tmaternal\t5\tG\tGGGG\t40",
        "sample2\tchr1\tmaternal\t10\tC\tT\t35",
        "sample2\tchr2\tunphased\t1\tA\tC\t10",
    ]);
    read_variant_table(table.path()).expect("Failed to read variants")
}

#[fixture]
fn population(database: GenomeDatabase, records: Vec<VcfVariantRecord>) -> PopulationVariant {
    let factory = VariantFactory::new(&database, AnchoredAligner::new());
    build_population(&factory, "cohort", &records, DIPLOID)
}

fn offsets(genome: &GenomeVariant) -> BTreeSet<(String, Phase, ContigOffset)> {
    genome
        .iter()
        .map(|variant| (variant.contig_id().to_string(), variant.phase(), variant.offset()))
        .collect()
}

#[rstest]
fn test_population_built(population: PopulationVariant) {
    assert_eq!(population.genome_count(), 2);

    let sample1 = population.genome("sample1").unwrap();
    assert_eq!(sample1.variant_count(), 4);
    let maternal = sample1
        .contig("chr1")
        .unwrap()
        .sorted_variants(Phase::Maternal, 0, 16);
    assert_eq!(maternal.iter().map(|v| v.offset()).collect::<Vec<_>>(), vec![5, 6, 7]);
    assert!(maternal.iter().all(|v| v.is_insert() && v.class() == VariantClass::Coding));

    let sample2 = population.genome("sample2").unwrap();
    assert_eq!(sample2.variant_count(), 5);
    assert_eq!(sample2.contig_count(), 2);
}

#[rstest]
fn test_genome_comparison_partitions_union(population: PopulationVariant) {
    let a = population.genome("sample1").unwrap();
    let b = population.genome("sample2").unwrap();

    let union = offsets(&a.union(b));
    let shared = offsets(&a.intersection(b));
    let a_only = offsets(&a.difference(b));
    let b_only = offsets(&b.difference(a));

    assert_eq!(shared.len(), 3);
    assert_eq!(a_only.len(), 1);
    assert_eq!(b_only.len(), 2);
    assert!(shared.is_disjoint(&a_only));
    assert!(shared.is_disjoint(&b_only));
    assert!(a_only.is_disjoint(&b_only));

    let covered: BTreeSet<_> = shared.iter().chain(&a_only).chain(&b_only).cloned().collect();
    assert_eq!(covered, union);
}

#[rstest]
fn test_filters(population: PopulationVariant) {
    let filter = AndFilter(vec![
        Box::new(ClassFilter {
            class: VariantClass::Coding,
        }),
        Box::new(QualityFilter { min_quality: 30.0 }),
    ]);
    let filtered = population.filter_variants(&filter);
    assert_eq!(filtered.variant_count(), 6);

    let flagged = population.filter_variants(&InfoFlagFilter {
        key: "LOWQ".to_string(),
    });
    assert_eq!(flagged.variant_count(), 1);

    // filtering never touches the source
    assert_eq!(population.variant_count(), 9);
}

#[rstest]
fn test_deep_copy_then_erase(population: PopulationVariant) {
    let mut copy = population.deep_copy();
    let target = population.genome("sample2").unwrap().iter().next().unwrap().clone();

    assert!(copy.erase_variant(&target));
    assert!(!copy.erase_variant(&target));
    assert_eq!(copy.variant_count(), population.variant_count() - 1);
    assert!(population.genome("sample2").unwrap().is_element(&target));
}

#[rstest]
#[case(Phase::Maternal, "ATGGGGAAATGA", "MGK*")]
#[case(Phase::Paternal, "GTGAAATGA", "VK*")]
#[case(Phase::Unphased, "ATGAAATGA", "MK*")]
fn test_mutant_protein(
    database: GenomeDatabase,
    population: PopulationVariant,
    #[case] phase: Phase,
    #[case] bases: &str,
    #[case] protein: &str,
) {
    let sequence = database.coding_sequence("tx1").unwrap();
    let reference = database.contig("chr1").unwrap().sequence();
    let contig = population.genome("sample1").unwrap().contig("chr1").unwrap();

    let coding = mutant_coding_sequence(contig, phase, &sequence, reference).unwrap();
    assert_eq!(coding.bases().to_string(), bases);
    assert_eq!(translate(&coding).to_string(), protein);
}

#[rstest]
fn test_variant_coding_offset(population: PopulationVariant) {
    let sample1 = population.genome("sample1").unwrap();
    let snp = sample1
        .contig("chr1")
        .unwrap()
        .sorted_variants(Phase::Paternal, 0, 16)
        .remove(0);

    let sequence = snp.coding_sequence().unwrap();
    let coding = ref_offset_within_coding_sequence(sequence, snp.offset());
    assert_eq!((coding.found, coding.offset, coding.length), (true, 0, 9));
    assert_eq!(snp.mutation_text(genovar_core::models::OffsetIndex::OneBased), "A3G");
}
