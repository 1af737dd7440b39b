//! Labelled numeric datasets.
//!
//! A `Dataset` is a rectangular table of `f64` where column 0 holds the class
//! label and columns `1..=n_features` hold feature values. Feature indices
//! used throughout the crate address these columns directly, so index 0 is
//! never a feature.
use crate::error::SelectionError;
use crate::feature_selection::subset::FeatureSubset;
use crate::math::Array2;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Array2<f64>,
}

impl Dataset {
    /// Build a dataset from label-first rows.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::MalformedDataset` when there are fewer than two
    /// samples (leave-one-out needs at least one neighbor), when rows are
    /// empty, when rows differ in width, or when a value is NaN or infinite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SelectionError> {
        if rows.len() < 2 {
            return Err(SelectionError::MalformedDataset(format!(
                "need at least 2 samples, found {}",
                rows.len()
            )));
        }
        if rows[0].is_empty() {
            return Err(SelectionError::MalformedDataset(
                "samples must contain a class label column".to_string(),
            ));
        }
        let samples =
            Array2::from_rows(rows).map_err(|e| SelectionError::MalformedDataset(e.to_string()))?;
        check_finite(&samples)?;
        Ok(Dataset { samples })
    }

    /// Wrap an existing matrix whose first column holds the labels.
    pub fn from_array(samples: Array2<f64>) -> Result<Self, SelectionError> {
        if samples.nrows() < 2 {
            return Err(SelectionError::MalformedDataset(format!(
                "need at least 2 samples, found {}",
                samples.nrows()
            )));
        }
        if samples.ncols() == 0 {
            return Err(SelectionError::MalformedDataset(
                "samples must contain a class label column".to_string(),
            ));
        }
        check_finite(&samples)?;
        Ok(Dataset { samples })
    }

    pub fn n_samples(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of feature columns, excluding the label.
    pub fn n_features(&self) -> usize {
        self.samples.ncols() - 1
    }

    pub fn label(&self, sample: usize) -> f64 {
        self.samples[(sample, 0)]
    }

    /// Full row for a sample, label at position 0.
    pub fn row(&self, sample: usize) -> &[f64] {
        self.samples.row_slice(sample)
    }

    pub fn labels(&self) -> Vec<f64> {
        self.samples.column(0)
    }

    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    /// The subset `{1, ..., n_features}` in ascending order.
    pub fn all_features(&self) -> FeatureSubset {
        FeatureSubset::full(self.n_features())
    }

    /// Check that every index in `subset` names a feature column.
    pub fn check_subset(&self, subset: &FeatureSubset) -> Result<(), SelectionError> {
        let n_features = self.n_features();
        match subset.iter().find(|&idx| idx == 0 || idx > n_features) {
            Some(index) => Err(SelectionError::InvalidFeatureIndex { index, n_features }),
            None => Ok(()),
        }
    }

    /// Number of samples per class label, ordered by label value.
    pub fn class_counts(&self) -> Vec<(f64, usize)> {
        let mut counts: Vec<(f64, usize)> = Vec::new();
        for label in self.samples.rows().map(|row| row[0]) {
            match counts.iter_mut().find(|(seen, _)| *seen == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label, 1)),
            }
        }
        counts.sort_by(|a, b| a.0.total_cmp(&b.0));
        counts
    }

    pub fn log_summary(&self) {
        log::info!(
            "This dataset has {} features (not including the class attribute), with {} instances.",
            self.n_features(),
            self.n_samples()
        );
        for (label, count) in self.class_counts() {
            log::debug!("Class {}: {} instances", label, count);
        }
    }
}

fn check_finite(samples: &Array2<f64>) -> Result<(), SelectionError> {
    for (i, row) in samples.rows().enumerate() {
        if let Some(col) = row.iter().position(|v| !v.is_finite()) {
            return Err(SelectionError::MalformedDataset(format!(
                "row {} column {} is not a finite number ({})",
                i + 1,
                col + 1,
                row[col]
            )));
        }
    }
    Ok(())
}
