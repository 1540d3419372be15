//! The variant collection hierarchy: population, genome, contig, phase.
pub mod contig;
pub mod genome;
pub mod homologous;
pub mod population;

pub use self::contig::{ContigVariant, DIPLOID};
pub use self::genome::GenomeVariant;
pub use self::homologous::{HomologousVariant, OffsetVariantMap};
pub use self::population::PopulationVariant;
