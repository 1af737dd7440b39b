//! 1-nearest-neighbor lookup restricted to a feature subset.
use crate::data_handling::Dataset;
use crate::error::SelectionError;
use crate::feature_selection::subset::FeatureSubset;

/// Nearest-neighbor classifier over the samples of a `Dataset`, measuring
/// Euclidean distance on the columns of a feature subset only.
///
/// Columns outside the subset do not take part in the distance sum at all.
/// With an empty subset every pair of samples is at distance zero.
pub struct NearestNeighbor<'a> {
    data: &'a Dataset,
    /// Ascending, so any ordering of the same subset sums identically.
    features: Vec<usize>,
}

impl<'a> NearestNeighbor<'a> {
    /// Create a classifier, validating the subset against the dataset.
    pub fn new(data: &'a Dataset, subset: &FeatureSubset) -> Result<Self, SelectionError> {
        data.check_subset(subset)?;
        Ok(Self::new_unchecked(data, subset))
    }

    /// Skip index validation; callers must build `subset` from valid columns.
    pub(crate) fn new_unchecked(data: &'a Dataset, subset: &FeatureSubset) -> Self {
        NearestNeighbor {
            data,
            features: subset.sorted(),
        }
    }

    /// Euclidean distance between two samples over the subset columns.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let row_a = self.data.row(a);
        let row_b = self.data.row(b);
        self.features
            .iter()
            .map(|&f| {
                let d = row_a[f] - row_b[f];
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Closest sample to `query`, never `query` itself.
    ///
    /// Samples are scanned in ascending index order and a candidate only
    /// replaces the current nearest when it is strictly closer, so the first
    /// sample at the minimum distance wins. Returns `None` when the dataset
    /// holds no other sample.
    pub fn nearest(&self, query: usize) -> Option<(usize, f64)> {
        let mut nearest: Option<usize> = None;
        let mut best = f64::INFINITY;
        for k in 0..self.data.n_samples() {
            if k == query {
                continue;
            }
            let distance = self.distance(query, k);
            if distance < best {
                best = distance;
                nearest = Some(k);
            }
        }
        nearest.map(|k| (k, best))
    }

    /// Predicted label for `query`: the label of its nearest neighbor.
    pub fn predict(&self, query: usize) -> Option<f64> {
        self.nearest(query).map(|(k, _)| self.data.label(k))
    }
}
