//! Progress transcript formatting.
//!
//! Accuracies are printed as percentages with one decimal digit and subsets
//! in set notation, e.g. `Using feature(s) {4, 2} accuracy is 93.5%`.
use std::io::Write;

use anyhow::Result;
use knn_select::{Dataset, FeatureSubset, SearchDirection, SearchEvent};

pub fn format_percent(accuracy: f64) -> String {
    format!("{:.1}%", accuracy * 100.0)
}

pub fn dataset_banner(data: &Dataset, baseline: f64) -> Vec<String> {
    vec![
        format!(
            "This dataset has {} features (not including the class attribute), with {} instances.",
            data.n_features(),
            data.n_samples()
        ),
        format!(
            "Running nearest neighbor with all {} features, using \"leaving-one-out\" evaluation, I get an accuracy of {}",
            data.n_features(),
            format_percent(baseline)
        ),
    ]
}

pub fn beginning_line(direction: SearchDirection) -> &'static str {
    match direction {
        SearchDirection::Forward => "Beginning search.",
        SearchDirection::Backward => "Beginning backward elimination.",
    }
}

pub fn subset_line(subset: &FeatureSubset, accuracy: f64) -> String {
    format!(
        "Using feature(s) {} accuracy is {}",
        subset,
        format_percent(accuracy)
    )
}

pub fn candidate_line(direction: SearchDirection, subset: &FeatureSubset, accuracy: f64) -> String {
    match direction {
        SearchDirection::Forward => format!("   {}", subset_line(subset, accuracy)),
        SearchDirection::Backward => subset_line(subset, accuracy),
    }
}

pub fn level_line(direction: SearchDirection, feature: usize, accuracy: f64) -> String {
    match direction {
        SearchDirection::Forward => format!(
            "Feature set {{{}}} was best, accuracy is {}",
            feature,
            format_percent(accuracy)
        ),
        SearchDirection::Backward => format!(
            "Removing feature {} for best accuracy of {}",
            feature,
            format_percent(accuracy)
        ),
    }
}

pub fn finished_line(best_subset: &FeatureSubset, best_accuracy: f64) -> String {
    format!(
        "Finished search. The best feature subset is {}, which has an accuracy of {}",
        best_subset,
        format_percent(best_accuracy)
    )
}

/// Write the transcript line for one search event.
pub fn write_event<W: Write>(out: &mut W, direction: SearchDirection, event: &SearchEvent) -> Result<()> {
    let line = match event {
        SearchEvent::Candidate {
            subset, accuracy, ..
        } => candidate_line(direction, subset, *accuracy),
        SearchEvent::LevelChosen {
            feature, accuracy, ..
        } => level_line(direction, *feature, *accuracy),
        SearchEvent::Finished {
            best_subset,
            best_accuracy,
        } => finished_line(best_subset, *best_accuracy),
    };
    writeln!(out, "{}", line)?;
    Ok(())
}
