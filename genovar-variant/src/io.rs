use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use genovar_core::models::{ContigOffset, Phase};
use genovar_core::utils::get_dynamic_reader;

use crate::errors::{VariantError, VariantResult};
use crate::evidence::InfoData;
use crate::factory::VcfVariantRecord;

/// Columns before the optional INFO column.
const REQUIRED_COLUMNS: usize = 7;

///
/// Parse one row of a variant table.
///
/// Columns: `genome contig phase position ref alt quality [info]`. The
/// position is one-based as in VCF and is stored zero-based; a quality of
/// `.` reads as zero.
///
pub fn parse_variant_line(line: &str, line_number: usize) -> VariantResult<VcfVariantRecord> {
    let parse_error = |reason: String| VariantError::RecordParseError {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < REQUIRED_COLUMNS {
        return Err(parse_error(format!(
            "expected at least {} columns, found {}",
            REQUIRED_COLUMNS,
            fields.len()
        )));
    }

    let phase: Phase = fields[2].parse().map_err(parse_error)?;
    let position: ContigOffset = fields[3]
        .parse()
        .map_err(|_| parse_error(format!("invalid position: {}", fields[3])))?;
    if position == 0 {
        return Err(parse_error("positions are one-based, found 0".to_string()));
    }
    let quality = match fields[6] {
        "." => 0.0,
        text => text
            .parse::<f64>()
            .map_err(|_| parse_error(format!("invalid quality: {}", text)))?,
    };
    let info = fields
        .get(REQUIRED_COLUMNS)
        .map(|info| Arc::new(InfoData::parse(info)));

    Ok(VcfVariantRecord {
        genome_id: fields[0].to_string(),
        contig_id: fields[1].to_string(),
        phase,
        offset: position - 1,
        reference: fields[4].to_string(),
        alternate: fields[5].to_string(),
        quality,
        info,
        record_index: line_number,
    })
}

///
/// Read a tab separated variant table (optionally gzipped).
///
/// Blank lines and lines starting with `#` are skipped.
///
pub fn read_variant_table(path: &Path) -> Result<Vec<VcfVariantRecord>> {
    let reader = get_dynamic_reader(path)?;

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of {}", index + 1, path.display()))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_variant_line(&line, index + 1)
            .with_context(|| format!("Failed to parse variant table: {}", path.display()))?;
        records.push(record);
    }

    info!("Read {} variant records from {}", records.len(), path.display());
    Ok(records)
}
