use genovar_core::models::{
    CodingSequence, ContigOffset, DnaSequenceLinear, FeatureInterval, StrandSense, translate,
};
use genovar_offset::*;

use pretty_assertions::assert_eq;
use rstest::*;

fn three_exon_sequence(strand: StrandSense) -> CodingSequence {
    CodingSequence::new(
        "tx1",
        "gene1",
        "chr1",
        strand,
        vec![
            FeatureInterval::new(100, 110),
            FeatureInterval::new(200, 212),
            FeatureInterval::new(300, 305),
        ],
    )
}

#[rstest]
#[case(StrandSense::Forward)]
#[case(StrandSense::Reverse)]
fn test_every_coding_base_round_trips(#[case] strand: StrandSense) {
    let sequence = three_exon_sequence(strand);
    let mut seen: Vec<ContigOffset> = Vec::new();

    for contig_offset in 90..320 {
        let coding = ref_offset_within_coding_sequence(&sequence, contig_offset);
        assert_eq!(coding.found, sequence.is_within_coding(contig_offset));
        if !coding.found {
            continue;
        }
        assert_eq!(coding.length, 27);
        seen.push(coding.offset);

        let contig = ref_coding_sequence_contig_offset(&sequence, coding.offset);
        assert_eq!(contig.offset, contig_offset);
    }

    // every coding offset is hit exactly once
    seen.sort();
    assert_eq!(seen, (0..27).collect::<Vec<_>>());
}

#[rstest]
fn test_adjusted_length_matches_indels() {
    let sequence = three_exon_sequence(StrandSense::Forward);
    let mut adjust = VariantMutationOffset::new();
    adjust.add_indel(102, 2); // insert in exon 1
    adjust.add_indel(150, -4); // delete in intron
    adjust.add_indel(205, -3); // delete in exon 2
    adjust.add_indel(303, 1); // insert in exon 3
    adjust.add_indel(400, 7); // after the coding sequence

    let reference = exon_offset_map(&sequence);
    let mutant = exon_mutant_offset(&sequence, &adjust);

    assert!(mutant.valid);
    assert_eq!(mutant.total_size(), reference.total_size() + 2 - 3 + 1);
}

#[rstest]
fn test_mutant_translation() {
    // ATG AAA TGA over two exons, with CCC in the intron
    let reference = DnaSequenceLinear::from("ATGAAACCCTGA");
    let sequence = CodingSequence::new(
        "tx1",
        "gene1",
        "chr1",
        StrandSense::Forward,
        vec![FeatureInterval::new(0, 6), FeatureInterval::new(9, 12)],
    );

    let coding = ref_coding_sub_sequence(&sequence, &reference, 0, 0, 0);
    assert_eq!(translate(&coding).to_string(), "MK*");

    // insert GGG before offset 3
    let mut mutated = reference.clone();
    assert!(mutated.insert_sub_sequence(3, &"GGG".into()));
    let mut adjust = VariantMutationOffset::new();
    adjust.add_indel(3, 3);

    let coding = mutant_coding_sub_sequence(&sequence, &mutated, &adjust, 0, 0, 0);
    assert_eq!(coding.bases().to_string(), "ATGGGGAAATGA");
    assert_eq!(translate(&coding).to_string(), "MGK*");

    // the intron shifted to [9, 12)
    let within = mutant_offset_within_coding_sequence(&sequence, &adjust, 10);
    assert!(!within.found);
    let within = mutant_offset_within_coding_sequence(&sequence, &adjust, 12);
    assert_eq!((within.found, within.offset, within.length), (true, 9, 12));
}
