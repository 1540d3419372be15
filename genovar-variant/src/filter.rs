use std::collections::BTreeSet;

use genovar_core::models::{ContigId, ContigOffset, Phase};

use crate::variant::{Variant, VariantClass};

///
/// A predicate over variants. Collections keep the variants it accepts.
///
/// Any `Fn(&Variant) -> bool` closure is a filter.
///
pub trait VariantFilter: Send + Sync {
    fn accept(&self, variant: &Variant) -> bool;

    fn name(&self) -> String {
        "closure".to_string()
    }
}

impl<F> VariantFilter for F
where
    F: Fn(&Variant) -> bool + Send + Sync,
{
    fn accept(&self, variant: &Variant) -> bool {
        self(variant)
    }
}

/// Quality at or above a minimum.
pub struct QualityFilter {
    pub min_quality: f64,
}

impl VariantFilter for QualityFilter {
    fn accept(&self, variant: &Variant) -> bool {
        variant.quality() >= self.min_quality
    }

    fn name(&self) -> String {
        format!("quality >= {}", self.min_quality)
    }
}

pub struct PhaseFilter {
    pub phase: Phase,
}

impl VariantFilter for PhaseFilter {
    fn accept(&self, variant: &Variant) -> bool {
        variant.phase() == self.phase
    }

    fn name(&self) -> String {
        format!("phase == {}", self.phase)
    }
}

/// Variants on any of the listed contigs.
pub struct ContigFilter {
    pub contigs: BTreeSet<ContigId>,
}

impl ContigFilter {
    pub fn new<I, S>(contigs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ContigId>,
    {
        ContigFilter {
            contigs: contigs.into_iter().map(Into::into).collect(),
        }
    }
}

impl VariantFilter for ContigFilter {
    fn accept(&self, variant: &Variant) -> bool {
        self.contigs.contains(variant.contig_id())
    }

    fn name(&self) -> String {
        format!("contig in {:?}", self.contigs)
    }
}

/// Variants on one contig within `[start, end)`.
pub struct RegionFilter {
    pub contig_id: ContigId,
    pub start: ContigOffset,
    pub end: ContigOffset,
}

impl VariantFilter for RegionFilter {
    fn accept(&self, variant: &Variant) -> bool {
        variant.contig_id() == self.contig_id
            && variant.offset() >= self.start
            && variant.offset() < self.end
    }

    fn name(&self) -> String {
        format!("{}:[{}, {})", self.contig_id, self.start, self.end)
    }
}

pub struct ClassFilter {
    pub class: VariantClass,
}

impl VariantFilter for ClassFilter {
    fn accept(&self, variant: &Variant) -> bool {
        variant.class() == self.class
    }

    fn name(&self) -> String {
        format!("class == {:?}", self.class)
    }
}

pub struct SnpFilter;

impl VariantFilter for SnpFilter {
    fn accept(&self, variant: &Variant) -> bool {
        variant.is_snp()
    }

    fn name(&self) -> String {
        "snp".to_string()
    }
}

/// Variants whose INFO data sets a flag.
pub struct InfoFlagFilter {
    pub key: String,
}

impl VariantFilter for InfoFlagFilter {
    fn accept(&self, variant: &Variant) -> bool {
        variant.evidence().info_flag(&self.key)
    }

    fn name(&self) -> String {
        format!("info flag {}", self.key)
    }
}

pub struct NotFilter(pub Box<dyn VariantFilter>);

impl VariantFilter for NotFilter {
    fn accept(&self, variant: &Variant) -> bool {
        !self.0.accept(variant)
    }

    fn name(&self) -> String {
        format!("not ({})", self.0.name())
    }
}

/// Accepts when every filter accepts; an empty list accepts everything.
pub struct AndFilter(pub Vec<Box<dyn VariantFilter>>);

impl VariantFilter for AndFilter {
    fn accept(&self, variant: &Variant) -> bool {
        self.0.iter().all(|filter| filter.accept(variant))
    }

    fn name(&self) -> String {
        self.0
            .iter()
            .map(|filter| format!("({})", filter.name()))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

pub struct OrFilter(pub Vec<Box<dyn VariantFilter>>);

impl VariantFilter for OrFilter {
    fn accept(&self, variant: &Variant) -> bool {
        self.0.iter().any(|filter| filter.accept(variant))
    }

    fn name(&self) -> String {
        self.0
            .iter()
            .map(|filter| format!("({})", filter.name()))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
