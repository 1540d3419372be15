use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::errors::GenomeDbError;
use crate::models::feature::{CodingSequence, FeatureInterval, GeneFeature, StrandSense};
use crate::models::types::{ContigId, ContigOffset, FeatureId};

/// Sequence id marking a feature table row that gives explicit gene bounds.
pub const GENE_BOUNDS_MARKER: &str = ".";

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// One row of a feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub contig_id: ContigId,
    pub gene_id: FeatureId,
    pub sequence_id: Option<FeatureId>,
    pub interval: FeatureInterval,
    pub strand: StrandSense,
}

///
/// Parse a `contig gene_id sequence_id begin end strand` feature line.
///
/// An empty sequence id is a gene without coding sequences; `.` supplies
/// the gene's own bounds.
///
pub fn parse_feature_line(line: &str) -> Result<FeatureRecord, String> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 6 {
        return Err(format!("expected 6 columns, found {}: {:?}", parts.len(), parts));
    }

    let begin: ContigOffset = parts[3]
        .parse()
        .map_err(|_| format!("Error in parsing begin offset: {:?}", parts))?;
    let end: ContigOffset = parts[4]
        .parse()
        .map_err(|_| format!("Error in parsing end offset: {:?}", parts))?;
    if end < begin {
        return Err(format!("end offset: {} precedes begin offset: {}", end, begin));
    }

    Ok(FeatureRecord {
        contig_id: parts[0].to_string(),
        gene_id: parts[1].to_string(),
        sequence_id: Some(parts[2].to_string()).filter(|s| !s.is_empty()),
        interval: FeatureInterval::new(begin, end),
        strand: parts[5].trim().parse()?,
    })
}

#[derive(Default)]
struct GeneBuilder {
    contig_id: ContigId,
    strand: StrandSense,
    explicit_bounds: Option<FeatureInterval>,
    row_bounds: Option<FeatureInterval>,
    sequences: BTreeMap<FeatureId, Vec<FeatureInterval>>,
}

///
/// Assemble feature rows into genes per contig. CDS intervals keep their file order.
///
pub fn group_feature_records(
    records: Vec<FeatureRecord>,
) -> Result<BTreeMap<ContigId, Vec<GeneFeature>>, GenomeDbError> {
    let mut builders: BTreeMap<FeatureId, GeneBuilder> = BTreeMap::new();

    for record in records {
        let builder = builders
            .entry(record.gene_id.clone())
            .or_insert_with(|| GeneBuilder {
                contig_id: record.contig_id.clone(),
                strand: record.strand,
                ..Default::default()
            });

        if builder.contig_id != record.contig_id {
            return Err(GenomeDbError::DuplicateFeature(record.gene_id));
        }

        builder.row_bounds = Some(match builder.row_bounds {
            Some(bounds) => FeatureInterval::new(
                bounds.begin.min(record.interval.begin),
                bounds.end.max(record.interval.end),
            ),
            None => record.interval,
        });

        match record.sequence_id.as_deref() {
            Some(GENE_BOUNDS_MARKER) => builder.explicit_bounds = Some(record.interval),
            Some(sequence_id) => builder
                .sequences
                .entry(sequence_id.to_string())
                .or_default()
                .push(record.interval),
            None => {}
        }
    }

    let mut contigs: BTreeMap<ContigId, Vec<GeneFeature>> = BTreeMap::new();
    for (gene_id, builder) in builders {
        let coding_sequences = builder
            .sequences
            .into_iter()
            .map(|(sequence_id, cds)| {
                Arc::new(CodingSequence::new(
                    sequence_id,
                    gene_id.clone(),
                    builder.contig_id.clone(),
                    builder.strand,
                    cds,
                ))
            })
            .collect();

        let interval = builder
            .explicit_bounds
            .or(builder.row_bounds)
            .unwrap_or(FeatureInterval::new(0, 0));

        contigs
            .entry(builder.contig_id.clone())
            .or_default()
            .push(GeneFeature::new(
                gene_id,
                builder.contig_id,
                interval,
                builder.strand,
                coding_sequences,
            ));
    }

    Ok(contigs)
}
