//! Snapshot files: one headerless CSV row of 32 values per snapshot.
//!
//! Rows are read as whole lines so that a short or long row stays a row of
//! its own length and is rejected at the snapshot boundary, not by the reader.

use anyhow::{Context, Result};
use barycenter::feed::{encode, SNAPSHOT_LEN};
use barycenter::geom2::rand::{draw_constraint_set, BandCfg, ReplayToken};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Unit separator: never present in numeric CSV, so every line is one cell.
const LINE_SEP: u8 = 0x1f;

/// Parse one CSV line. Cells that are not numbers become NaN and are
/// reported by the boundary as non-finite.
fn parse_row(line: &str) -> Vec<f64> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    line.split(',')
        .map(|cell| cell.trim().parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}

/// Read all rows, each with its own field count.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .with_separator(LINE_SEP)
        .with_quote_char(None)
        // 0: read every column as String.
        .with_infer_schema_length(Some(0))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let Some(lines) = df.iter().next() else {
        return Ok(Vec::new());
    };
    let rows: Vec<Vec<f64>> = lines
        .str()?
        .into_iter()
        .map(|line| parse_row(line.unwrap_or("")))
        .collect();
    let ragged = rows.iter().filter(|r| r.len() != SNAPSHOT_LEN).count();
    tracing::info!(rows = rows.len(), ragged, "snapshot_csv_rows");
    Ok(rows)
}

/// Write `count` random, valid snapshots drawn with replay tokens `(seed, 0..count)`.
pub fn write_sample(path: &Path, count: u64, seed: u64) -> Result<()> {
    let mut cols: Vec<Vec<f64>> = vec![Vec::with_capacity(count as usize); SNAPSHOT_LEN];
    for index in 0..count {
        let set = draw_constraint_set(BandCfg::default(), ReplayToken { seed, index });
        for (col, v) in cols.iter_mut().zip(encode(&set)) {
            col.push(v);
        }
    }
    let series: Vec<Series> = cols
        .into_iter()
        .enumerate()
        .map(|(k, vals)| Series::new(format!("v{k}").as_str().into(), vals))
        .collect();
    let mut df = DataFrame::new(series)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(false)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
