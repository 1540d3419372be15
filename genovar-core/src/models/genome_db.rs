use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bio::io::fasta;
use log::{info, warn};

use crate::errors::GenomeDbError;
use crate::models::alphabet::{Alphabet, Dna5};
use crate::models::alphabet_string::DnaString;
use crate::models::feature::{CodingSequence, FeatureInterval, GeneFeature};
use crate::models::sequence::DnaSequenceLinear;
use crate::models::types::{ContigId, ContigOffset, ContigSize, GenomeId};
use crate::utils::{FeatureRecord, get_dynamic_reader, group_feature_records, parse_feature_line};

///
/// One contig of the reference genome: its bases and the genes annotated on it.
///
#[derive(Debug, Clone, Default)]
pub struct ContigFeatures {
    contig_id: ContigId,
    sequence: DnaSequenceLinear,
    genes: BTreeMap<ContigOffset, Vec<Arc<GeneFeature>>>,
    max_gene_width: ContigSize,
}

impl ContigFeatures {
    pub fn new(contig_id: impl Into<ContigId>, sequence: DnaSequenceLinear) -> Self {
        ContigFeatures {
            contig_id: contig_id.into(),
            sequence,
            genes: BTreeMap::new(),
            max_gene_width: 0,
        }
    }

    pub fn contig_id(&self) -> &str {
        &self.contig_id
    }

    pub fn sequence(&self) -> &DnaSequenceLinear {
        &self.sequence
    }

    pub fn set_sequence(&mut self, sequence: DnaSequenceLinear) {
        self.sequence = sequence;
    }

    pub fn contig_size(&self) -> ContigSize {
        self.sequence.len()
    }

    pub fn add_gene(&mut self, gene: Arc<GeneFeature>) {
        self.max_gene_width = self.max_gene_width.max(gene.interval().width());
        self.genes
            .entry(gene.interval().begin)
            .or_default()
            .push(gene);
    }

    pub fn gene_count(&self) -> usize {
        self.genes.values().map(|genes| genes.len()).sum()
    }

    pub fn genes(&self) -> impl Iterator<Item = &Arc<GeneFeature>> {
        self.genes.values().flatten()
    }

    /// All genes whose `[begin, end)` interval covers the offset.
    pub fn find_genes(&self, offset: ContigOffset) -> Vec<Arc<GeneFeature>> {
        let lower = offset.saturating_sub(self.max_gene_width);
        self.genes
            .range(lower..=offset)
            .flat_map(|(_, genes)| genes.iter())
            .filter(|gene| gene.contains(offset))
            .cloned()
            .collect()
    }

    pub fn coding_sequence(&self, sequence_id: &str) -> Option<Arc<CodingSequence>> {
        self.genes()
            .flat_map(|gene| gene.coding_sequences().iter())
            .find(|sequence| sequence.id() == sequence_id)
            .cloned()
    }
}

///
/// The reference genome: contig sequences and gene/CDS feature boundaries.
///
/// Variant collections hold `Arc` handles into this database; it is never
/// owned by them.
///
#[derive(Debug, Clone, Default)]
pub struct GenomeDatabase {
    genome_id: GenomeId,
    contigs: BTreeMap<ContigId, ContigFeatures>,
}

impl GenomeDatabase {
    pub fn new(genome_id: impl Into<GenomeId>) -> Self {
        GenomeDatabase {
            genome_id: genome_id.into(),
            contigs: BTreeMap::new(),
        }
    }

    pub fn genome_id(&self) -> &str {
        &self.genome_id
    }

    pub fn add_contig(&mut self, contig: ContigFeatures) -> Result<(), GenomeDbError> {
        match self.contigs.entry(contig.contig_id().to_string()) {
            Entry::Occupied(entry) => Err(GenomeDbError::DuplicateContig(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(contig);
                Ok(())
            }
        }
    }

    pub fn contig(&self, contig_id: &str) -> Option<&ContigFeatures> {
        self.contigs.get(contig_id)
    }

    pub fn contig_mut(&mut self, contig_id: &str) -> Option<&mut ContigFeatures> {
        self.contigs.get_mut(contig_id)
    }

    pub fn contigs(&self) -> impl Iterator<Item = &ContigFeatures> {
        self.contigs.values()
    }

    pub fn contig_count(&self) -> usize {
        self.contigs.len()
    }

    /// Genes covering the offset; empty if the contig is unknown.
    pub fn find_genes(&self, contig_id: &str, offset: ContigOffset) -> Vec<Arc<GeneFeature>> {
        self.contig(contig_id)
            .map(|contig| contig.find_genes(offset))
            .unwrap_or_default()
    }

    pub fn coding_sequence(&self, sequence_id: &str) -> Option<Arc<CodingSequence>> {
        self.contigs
            .values()
            .find_map(|contig| contig.coding_sequence(sequence_id))
    }

    ///
    /// Build a database from a tab separated feature table (optionally gzipped).
    ///
    /// # Arguments
    /// - genome_id: name of the reference genome
    /// - path: feature table with columns `contig gene_id sequence_id begin end strand`
    pub fn from_feature_table(genome_id: impl Into<GenomeId>, path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;

        let mut records: Vec<FeatureRecord> = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let record = parse_feature_line(&line)
                .map_err(|reason| GenomeDbError::FeatureParseError {
                    line: index + 1,
                    reason,
                })
                .with_context(|| format!("Failed to parse feature table: {}", path.display()))?;
            records.push(record);
        }

        let mut database = GenomeDatabase::new(genome_id);
        for (contig_id, genes) in group_feature_records(records)? {
            let mut contig = ContigFeatures::new(contig_id, DnaSequenceLinear::default());
            for gene in genes {
                contig.add_gene(Arc::new(gene));
            }
            database.add_contig(contig)?;
        }

        info!(
            "Genome database: {} loaded {} contigs from {}",
            database.genome_id,
            database.contig_count(),
            path.display()
        );

        Ok(database)
    }

    ///
    /// Attach reference bases from a fasta file. Contigs not already present are added without genes.
    ///
    pub fn load_fasta(&mut self, path: &Path) -> Result<()> {
        let reader = get_dynamic_reader(path)?;
        let fasta_reader = fasta::Reader::new(reader);

        for record in fasta_reader.records() {
            let record = record.map_err(|e| GenomeDbError::FastaError(e.to_string()))?;
            let bases: DnaString = record
                .seq()
                .iter()
                .map(|base| Dna5::convert_char(*base as char))
                .collect();
            let sequence = DnaSequenceLinear::new(bases);

            match self.contigs.get_mut(record.id()) {
                Some(contig) => contig.set_sequence(sequence),
                None => {
                    warn!(
                        "Fasta contig: {} has no annotated features, adding without genes",
                        record.id()
                    );
                    self.add_contig(ContigFeatures::new(record.id(), sequence))?;
                }
            }
        }

        Ok(())
    }
}

impl Display for GenomeDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GenomeDatabase {} with {} contigs.",
            self.genome_id,
            self.contig_count()
        )
    }
}

/// Convenience constructor for a single-CDS gene, used by loaders and tests.
pub fn single_sequence_gene(sequence: CodingSequence) -> GeneFeature {
    let interval = sequence.bounds().unwrap_or(FeatureInterval::new(0, 0));
    GeneFeature::new(
        sequence.gene_id().to_string(),
        sequence.contig_id().to_string(),
        interval,
        sequence.strand(),
        vec![Arc::new(sequence)],
    )
}
