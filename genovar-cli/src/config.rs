use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use genovar_core::models::{GenomeDatabase, OffsetIndex};
use genovar_variant::{
    AndFilter, ClassFilter, ContigFilter, DIPLOID, QualityFilter, VariantClass, VariantFilter,
};

fn default_genome_id() -> String {
    "reference".to_string()
}

fn default_ploidy() -> usize {
    DIPLOID
}

#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct FilterConfig {
    pub min_quality: Option<f64>,
    #[serde(default)]
    pub coding_only: bool,
    pub contigs: Option<Vec<String>>,
}

impl FilterConfig {
    /// All configured conditions joined; an empty config accepts everything.
    pub fn build(&self) -> AndFilter {
        let mut filters: Vec<Box<dyn VariantFilter>> = Vec::new();
        if let Some(min_quality) = self.min_quality {
            filters.push(Box::new(QualityFilter { min_quality }));
        }
        if self.coding_only {
            filters.push(Box::new(ClassFilter {
                class: VariantClass::Coding,
            }));
        }
        if let Some(contigs) = &self.contigs {
            filters.push(Box::new(ContigFilter::new(contigs.iter().cloned())));
        }
        AndFilter(filters)
    }
}

///
/// A run configuration.
///
/// ```toml
/// genome_id = "Pf3D7"
/// feature_table = "features.tsv.gz"
/// fasta = "Pf3D7.fasta"
/// ploidy = 2
/// one_based = true
///
/// [filter]
/// min_quality = 30.0
/// coding_only = true
/// contigs = ["chr1", "chr2"]
/// ```
///
/// Relative paths are resolved against the directory of the config file.
///
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_genome_id")]
    pub genome_id: String,
    pub feature_table: PathBuf,
    pub fasta: Option<PathBuf>,
    #[serde(default = "default_ploidy")]
    pub ploidy: usize,
    #[serde(default)]
    pub one_based: bool,
    #[serde(default)]
    pub filter: FilterConfig,
    pub output: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Ploidy must be between 1 and 3, found {0}")]
    InvalidPloidy(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl RunConfig {
    pub fn output_index(&self) -> OffsetIndex {
        match self.one_based {
            true => OffsetIndex::OneBased,
            false => OffsetIndex::ZeroBased,
        }
    }

    /// The genome database named by the config, with reference bases if a fasta is given.
    pub fn load_database(&self) -> anyhow::Result<GenomeDatabase> {
        let mut database = GenomeDatabase::from_feature_table(&self.genome_id, &self.feature_table)
            .with_context(|| format!("Failed to load genome: {}", self.genome_id))?;
        if let Some(fasta) = &self.fasta {
            database
                .load_fasta(fasta)
                .with_context(|| format!("Failed to load fasta: {}", fasta.display()))?;
        }
        Ok(database)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &Path| match path.is_relative() {
            true => base.join(path),
            false => path.to_path_buf(),
        };
        self.feature_table = resolve(&self.feature_table);
        self.fasta = self.fasta.as_deref().map(resolve);
        self.output = self.output.as_deref().map(resolve);
    }
}

impl TryFrom<&Path> for RunConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> ConfigResult<Self> {
        let toml_str = read_to_string(path)?;
        let mut config: RunConfig = toml::from_str(&toml_str)?;

        // three phases: unphased, maternal and paternal
        if config.ploidy == 0 || config.ploidy > 3 {
            return Err(ConfigError::InvalidPloidy(config.ploidy));
        }
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }
}
