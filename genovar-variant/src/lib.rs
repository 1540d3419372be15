//! Variants and variant collections.
//!
//! A [`Variant`] is one called allele at a contig offset: an immutable
//! record with its phase, quality evidence and classification against the
//! genome database (coding, intron or non-coding). Variants are created from
//! parsed records by a [`VariantFactory`] and organised into a four level
//! hierarchy:
//!
//! - [`PopulationVariant`]: genomes keyed by genome id
//! - [`GenomeVariant`]: contigs keyed by contig id
//! - [`ContigVariant`]: one collection per phase, up to the ploidy
//! - [`HomologousVariant`]: variants keyed by offset
//!
//! Every level supports union, intersection, difference, filtering and
//! deep copies. Phased variants can be applied to a reference window to give
//! the mutated sequence and the indel adjustment that coordinate
//! translation needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genovar_core::models::{ContigFeatures, DnaSequenceLinear, GenomeDatabase, Phase};
//! use genovar_variant::{AnchoredAligner, DIPLOID, GenomeVariant, VariantFactory, VcfVariantRecord};
//!
//! let mut database = GenomeDatabase::new("ref");
//! database.add_contig(ContigFeatures::new("chr1", DnaSequenceLinear::from("ACGTACGT"))).unwrap();
//!
//! let factory = VariantFactory::new(&database, AnchoredAligner::new());
//! let record = VcfVariantRecord {
//!     genome_id: "sample1".to_string(),
//!     contig_id: "chr1".to_string(),
//!     phase: Phase::Maternal,
//!     offset: 2,
//!     reference: "G".to_string(),
//!     alternate: "T".to_string(),
//!     quality: 30.0,
//!     info: None,
//!     record_index: 0,
//! };
//!
//! let mut genome = GenomeVariant::new("sample1");
//! for variant in factory.create_variants(&record) {
//!     assert!(genome.add_variant(Arc::new(variant), DIPLOID));
//! }
//! assert_eq!(genome.variant_count(), 1);
//! ```
pub mod aligner;
pub mod classify;
pub mod compound;
pub mod concurrent;
pub mod db;
pub mod errors;
pub mod evidence;
pub mod factory;
pub mod filter;
pub mod io;
pub mod mutation;
pub mod variant;

// re-exports
pub use self::aligner::{AnchoredAligner, EditItem, EditKind, GlobalAligner, SequenceAligner};
pub use self::classify::classify_variant;
pub use self::compound::{CompoundKind, CompoundVariant, MutationItem, aggregate_compounds};
pub use self::concurrent::{ThreadSafeGenomeBuilder, build_genome_parallel, build_population};
pub use self::db::{
    ContigVariant, DIPLOID, GenomeVariant, HomologousVariant, OffsetVariantMap, PopulationVariant,
};
pub use self::errors::{VariantError, VariantResult};
pub use self::evidence::{InfoData, InfoValue, ReadCountEvidence, VariantEvidence, bin_to_vector};
pub use self::factory::{
    ReadCountThresholds, VariantFactory, VcfVariantRecord, read_count_variants,
};
pub use self::filter::{
    AndFilter, ClassFilter, ContigFilter, InfoFlagFilter, NotFilter, OrFilter, PhaseFilter,
    QualityFilter, RegionFilter, SnpFilter, VariantFilter,
};
pub use self::io::{parse_variant_line, read_variant_table};
pub use self::mutation::{MutatedRegion, mutant_coding_sequence, mutate_region};
pub use self::variant::{Mutation, Variant, VariantClass, VariantDraft, VariantSequence};
