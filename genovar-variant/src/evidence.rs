use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::sync::Arc;

use log::{error, warn};

/// Separator of the values in a `"1|0|0"` bin string.
pub const BIN_DELIMITER: char = '|';

///
/// A typed INFO field value.
///
/// Numeric lists are typed by their contents: all integers become
/// `Integers`, otherwise all numbers become `Floats`, anything else is
/// kept as `Strings`.
///
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Flag,
    Integers(Vec<i64>),
    Floats(Vec<f64>),
    Strings(Vec<String>),
}

impl InfoValue {
    pub fn parse(text: &str) -> Self {
        let items: Vec<&str> = text.split(',').collect();

        if let Ok(integers) = items.iter().map(|item| item.parse()).collect::<Result<Vec<i64>, _>>() {
            return InfoValue::Integers(integers);
        }
        if let Ok(floats) = items.iter().map(|item| item.parse()).collect::<Result<Vec<f64>, _>>() {
            return InfoValue::Floats(floats);
        }

        InfoValue::Strings(items.into_iter().map(String::from).collect())
    }

    fn type_name(&self) -> &'static str {
        match self {
            InfoValue::Flag => "flag",
            InfoValue::Integers(_) => "integer",
            InfoValue::Floats(_) => "float",
            InfoValue::Strings(_) => "string",
        }
    }
}

///
/// The INFO column of one variant record.
///
/// Accessors never fail: a missing key returns an empty value, a key of the
/// wrong type is logged and returns an empty value.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoData {
    values: BTreeMap<String, InfoValue>,
}

impl InfoData {
    /// Parse `KEY=VALUE;FLAG;...`. An empty or `.` field gives no values.
    pub fn parse(info: &str) -> Self {
        let mut values = BTreeMap::new();

        for field in info.split(';').map(str::trim) {
            if field.is_empty() || field == "." {
                continue;
            }
            match field.split_once('=') {
                Some((key, value)) => values.insert(key.to_string(), InfoValue::parse(value)),
                None => values.insert(field.to_string(), InfoValue::Flag),
            };
        }

        InfoData { values }
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn mismatch(&self, key: &str, expected: &str) {
        if let Some(value) = self.values.get(key) {
            error!(
                "InfoData, field: {} holds {} data, not {} data",
                key,
                value.type_name(),
                expected
            );
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(InfoValue::Flag) => true,
            _ => {
                self.mismatch(key, "flag");
                false
            }
        }
    }

    pub fn integers(&self, key: &str) -> Vec<i64> {
        match self.values.get(key) {
            Some(InfoValue::Integers(values)) => values.clone(),
            _ => {
                self.mismatch(key, "integer");
                Vec::new()
            }
        }
    }

    /// Integer values are widened.
    pub fn floats(&self, key: &str) -> Vec<f64> {
        match self.values.get(key) {
            Some(InfoValue::Floats(values)) => values.clone(),
            Some(InfoValue::Integers(values)) => values.iter().map(|value| *value as f64).collect(),
            _ => {
                self.mismatch(key, "float");
                Vec::new()
            }
        }
    }

    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.values.get(key) {
            Some(InfoValue::Strings(values)) => values.clone(),
            _ => {
                self.mismatch(key, "string");
                Vec::new()
            }
        }
    }
}

///
/// Convert a bin string such as `"1|0|0|0|1"` into its values.
///
/// Only the first string is read. A bin count other than `expected_size`
/// or an unparsable value is logged and gives an empty vector.
///
pub fn bin_to_vector(bin_data: &[String], expected_size: usize) -> Vec<f64> {
    let Some(bin_string) = bin_data.first() else {
        return Vec::new();
    };

    let bins: Vec<&str> = bin_string.split(BIN_DELIMITER).collect();
    if bins.len() != expected_size {
        warn!(
            "bin_to_vector(), expected bin size: {}, actual bin size: {}, bin string: {}",
            expected_size,
            bins.len(),
            bin_string
        );
        return Vec::new();
    }

    let mut values = Vec::with_capacity(bins.len());
    for bin in bins {
        match bin.trim().parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                error!(
                    "bin_to_vector(), problem converting bin: {} to a number, bin string: {}",
                    bin, bin_string
                );
                return Vec::new();
            }
        }
    }

    values
}

/// Read counts behind a variant called from a pileup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCountEvidence {
    pub mutant_count: u32,
    pub total_count: u64,
    /// Counts per [`genovar_core::models::ExtendDna5`] column.
    pub counts: Vec<u32>,
}

impl ReadCountEvidence {
    pub fn proportion(&self) -> f64 {
        match self.total_count {
            0 => 0.0,
            total => self.mutant_count as f64 / total as f64,
        }
    }
}

///
/// Where a variant came from and the supporting data recorded with it.
///
/// INFO data is shared by every allele split from the same record.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantEvidence {
    pub record_index: Option<usize>,
    pub read_count: Option<ReadCountEvidence>,
    pub info: Option<Arc<InfoData>>,
}

impl VariantEvidence {
    pub fn from_record(record_index: usize, info: Option<Arc<InfoData>>) -> Self {
        VariantEvidence {
            record_index: Some(record_index),
            read_count: None,
            info,
        }
    }

    pub fn from_read_count(read_count: ReadCountEvidence) -> Self {
        VariantEvidence {
            record_index: None,
            read_count: Some(read_count),
            info: None,
        }
    }

    pub fn info_flag(&self, key: &str) -> bool {
        self.info.as_ref().is_some_and(|info| info.flag(key))
    }
}

impl Display for VariantEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.record_index {
            write!(f, "record:{}", index)?;
        }
        if let Some(read_count) = &self.read_count {
            write!(
                f,
                "reads:{}/{}",
                read_count.mutant_count, read_count.total_count
            )?;
        }
        Ok(())
    }
}
