//! Loading a genome database from a gzipped feature table and a fasta file.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::{NamedTempFile, TempDir};

use genovar_core::models::{
    DnaSequenceCoding, FeatureInterval, GenomeDatabase, StrandSense, translate,
};

use pretty_assertions::assert_eq;
use rstest::*;

const FEATURES: &str = "\
# contig\tgene\tsequence\tbegin\tend\tstrand
chr1\tgene1\ttx1\t0\t6\t+
chr1\tgene1\ttx1\t9\t12\t+
chr1\tgene1\t.\t0\t20\t+
chr1\tgene2\t\t30\t40\t-
chr2\tgene3\ttx3\t0\t9\t-
";

#[fixture]
fn database() -> GenomeDatabase {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("features.tsv.gz");
    let file = std::fs::File::create(&path).expect("Failed to create feature table");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(FEATURES.as_bytes()).expect("Failed to write");
    encoder.finish().expect("Failed to finish gzip stream");

    let mut fasta = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(fasta, ">chr1").expect("Failed to write");
    writeln!(fasta, "ATGAAACCCTGANNNNNNNN").expect("Failed to write");
    writeln!(fasta, ">chr2").expect("Failed to write");
    // reverse complement of ATG GCC TAA
    writeln!(fasta, "TTAGGCCAT").expect("Failed to write");
    writeln!(fasta, ">chrM").expect("Failed to write");
    writeln!(fasta, "ACGT").expect("Failed to write");

    let mut database = GenomeDatabase::from_feature_table("ref", &path).expect("Failed to load features");
    database.load_fasta(fasta.path()).expect("Failed to load fasta");
    database
}

#[rstest]
fn test_contigs_and_genes(database: GenomeDatabase) {
    assert_eq!(database.contig_count(), 3);

    let chr1 = database.contig("chr1").unwrap();
    assert_eq!(chr1.gene_count(), 2);
    assert_eq!(chr1.contig_size(), 20);

    let genes = chr1.find_genes(15);
    assert_eq!(genes.len(), 1);
    assert_eq!(genes[0].interval(), FeatureInterval::new(0, 20));
    assert!(genes[0].coding_sequences()[0].is_within_coding(10));
    assert!(!genes[0].coding_sequences()[0].is_within_coding(15));

    // a gene without coding sequences
    let gene2 = chr1.find_genes(35);
    assert!(gene2[0].coding_sequences().is_empty());
    assert_eq!(gene2[0].strand(), StrandSense::Reverse);

    assert_eq!(database.contig("chrM").unwrap().gene_count(), 0);
}

#[rstest]
fn test_coding_sequences_translate(database: GenomeDatabase) {
    let tx1 = database.coding_sequence("tx1").unwrap();
    let chr1 = database.contig("chr1").unwrap().sequence();
    let bases: String = tx1
        .cds()
        .iter()
        .map(|interval| {
            chr1.sub_sequence(interval.begin, interval.width())
                .unwrap()
                .bases()
                .to_string()
        })
        .collect();
    assert_eq!(bases, "ATGAAATGA");

    let tx3 = database.coding_sequence("tx3").unwrap();
    let chr2 = database.contig("chr2").unwrap().sequence();
    let coding = DnaSequenceCoding::from_linear(chr2, tx3.strand());
    assert_eq!(coding.bases().to_string(), "ATGGCCTAA");
    assert_eq!(translate(&coding).to_string(), "MA*");

    assert!(database.coding_sequence("tx9").is_none());
}
