//! Readers for label-first numeric tables.
//!
//! The default format is plain text with one sample per line and values
//! separated by any amount of whitespace, e.g.
//!
//! ```text
//!   2.0000000e+00  1.2340000e+00  -3.1200000e-01
//!   1.0000000e+00  8.7000000e-01   2.0500000e+00
//! ```
//!
//! Files ending in `.csv` or `.tsv` go through the `csv` crate instead.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::data_handling::Dataset;

/// Configuration for reading delimited dataset files.
#[derive(Debug, Clone)]
pub struct DatasetReaderConfig {
    /// Field delimiter. `None` splits on runs of whitespace.
    pub delimiter: Option<u8>,
    /// Skip the first record of a delimited file.
    pub has_headers: bool,
}

impl Default for DatasetReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_headers: false,
        }
    }
}

impl DatasetReaderConfig {
    /// Pick a delimiter from the file extension: `.csv` is comma separated,
    /// `.tsv` tab separated, anything else whitespace separated.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        let delimiter = match ext.as_deref() {
            Some("csv") => Some(b','),
            Some("tsv") => Some(b'\t'),
            _ => None,
        };
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

/// Read a dataset, choosing the format from the file extension.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let config = DatasetReaderConfig::for_path(&path);
    read_dataset_with_config(path, &config)
}

/// Read a dataset using an explicit configuration.
pub fn read_dataset_with_config<P: AsRef<Path>>(
    path: P,
    config: &DatasetReaderConfig,
) -> Result<Dataset> {
    let path = path.as_ref();
    let rows = match config.delimiter {
        None => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
            parse_whitespace_rows(BufReader::new(file))
                .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?
        }
        Some(delimiter) => read_delimited_rows(path, delimiter, config.has_headers)?,
    };

    log::debug!("Read {} rows from {}", rows.len(), path.display());

    Dataset::from_rows(rows)
        .with_context(|| format!("Invalid dataset in {}", path.display()))
}

/// Parse whitespace separated rows; blank lines are skipped.
pub fn parse_whitespace_rows<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_idx + 1))?;
        let row = line
            .split_whitespace()
            .map(|token| parse_value(token, line_idx + 1))
            .collect::<Result<Vec<f64>>>()?;
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn read_delimited_rows(path: &Path, delimiter: u8, has_headers: bool) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("Failed to read {}", path.display()))?;
        let line = record.position().map_or(rows.len() + 1, |p| p.line() as usize);
        let row = record
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| parse_value(field, line))
            .collect::<Result<Vec<f64>>>()?;
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn parse_value(token: &str, line: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| anyhow!("Invalid numeric value '{}' at line {}", token, line))
}
