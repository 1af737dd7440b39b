use std::error::Error;
use std::fmt;

/// Errors raised when a dataset or feature subset cannot be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Rows of unequal width, zero-width rows, or fewer than two samples.
    MalformedDataset(String),
    /// A subset referenced a column outside `1..=n_features`.
    InvalidFeatureIndex { index: usize, n_features: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::MalformedDataset(reason) => write!(f, "Malformed dataset: {}", reason),
            SelectionError::InvalidFeatureIndex { index, n_features } => write!(
                f,
                "Feature index {} is out of range, expected a value in 1..={}",
                index, n_features
            ),
        }
    }
}

impl Error for SelectionError {}
