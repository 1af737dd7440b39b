use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use knn_select::FeatureSubset;

pub fn validate_data_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Not a regular file: {}", path.display());
    }
    Ok(())
}

/// Parse a comma or whitespace separated list of feature indices, e.g. `1,3, 5`.
pub fn parse_feature_list(s: &str) -> Result<FeatureSubset> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .with_context(|| format!("Invalid feature index: '{}'", token))
        })
        .collect()
}

/// Print `message` and read one trimmed line of input.
///
/// Fails when the input is closed before a line was entered.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    let n = input.read_line(&mut line).context("Failed to read input")?;
    if n == 0 {
        anyhow::bail!("No input provided");
    }
    Ok(line.trim().to_string())
}
