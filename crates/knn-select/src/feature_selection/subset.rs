//! Sets of feature column indices.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A set of feature indices that remembers insertion order.
///
/// Order only matters for display: `{4, 2, 7}` prints the features in the
/// order they were added by a forward search. Equality and evaluation treat
/// the subset as an unordered set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct FeatureSubset {
    indices: Vec<usize>,
}

impl FeatureSubset {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{1, ..., n_features}` in ascending order.
    pub fn full(n_features: usize) -> Self {
        FeatureSubset {
            indices: (1..=n_features).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, feature: usize) -> bool {
        self.indices.contains(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Add a feature; returns `false` if it was already present.
    pub fn insert(&mut self, feature: usize) -> bool {
        if self.contains(feature) {
            return false;
        }
        self.indices.push(feature);
        true
    }

    /// Remove a feature, keeping the order of the others.
    pub fn remove(&mut self, feature: usize) -> bool {
        match self.indices.iter().position(|&f| f == feature) {
            Some(pos) => {
                self.indices.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Copy of this subset with `feature` appended.
    pub fn with(&self, feature: usize) -> Self {
        let mut next = self.clone();
        next.insert(feature);
        next
    }

    /// Copy of this subset with `feature` removed.
    pub fn without(&self, feature: usize) -> Self {
        let mut next = self.clone();
        next.remove(feature);
        next
    }

    /// Indices in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut indices = self.indices.clone();
        indices.sort_unstable();
        indices
    }
}

impl PartialEq for FeatureSubset {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted() == other.sorted()
    }
}

impl Eq for FeatureSubset {}

impl FromIterator<usize> for FeatureSubset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut subset = FeatureSubset::new();
        for feature in iter {
            subset.insert(feature);
        }
        subset
    }
}

impl From<Vec<usize>> for FeatureSubset {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

impl From<FeatureSubset> for Vec<usize> {
    fn from(subset: FeatureSubset) -> Self {
        subset.indices
    }
}

impl fmt::Display for FeatureSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, feature) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", feature)?;
        }
        write!(f, "}}")
    }
}
