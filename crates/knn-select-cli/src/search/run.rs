//! CLI search helpers for knn-select.
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use knn_select::{loocv_accuracy, Dataset, FeatureSubset, GreedySearch, SearchConfig, SearchOutcome};

use crate::search::report::{beginning_line, dataset_banner, subset_line, write_event};

/// Load a search configuration from a JSON file.
pub fn load_search_config<P: AsRef<Path>>(path: P) -> Result<SearchConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: SearchConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Print the dataset banner with the all-features baseline accuracy.
pub fn write_baseline<W: Write>(data: &Dataset, out: &mut W) -> Result<f64> {
    let baseline = loocv_accuracy(data, &data.all_features())?;
    for line in dataset_banner(data, baseline) {
        writeln!(out, "{}", line)?;
    }
    Ok(baseline)
}

/// Run the configured search, writing the progress transcript to `out`.
pub fn run_search<W: Write>(data: &Dataset, config: &SearchConfig, out: &mut W) -> Result<SearchOutcome> {
    let direction = config.direction;
    writeln!(out, "{}", beginning_line(direction))?;

    GreedySearch::new(data, config.clone())
        .try_run_with(|event| write_event(out, direction, event))
        .context("Failed to write search progress")
}

/// Print the accuracy of a single subset.
pub fn evaluate_subset<W: Write>(data: &Dataset, subset: &FeatureSubset, out: &mut W) -> Result<f64> {
    let accuracy = loocv_accuracy(data, subset)
        .with_context(|| format!("Cannot evaluate feature subset {}", subset))?;
    writeln!(out, "{}", subset_line(subset, accuracy))?;
    Ok(accuracy)
}

/// Write the search outcome as pretty JSON.
pub fn write_outcome_json<P: AsRef<Path>>(path: P, outcome: &SearchOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize search outcome")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write outcome: {}", path.as_ref().display()))?;
    Ok(())
}
