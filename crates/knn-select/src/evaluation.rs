//! Leave-one-out cross-validated accuracy of the 1-nearest-neighbor classifier.
use crate::data_handling::Dataset;
use crate::error::SelectionError;
use crate::feature_selection::subset::FeatureSubset;
use crate::models::nearest_neighbor::NearestNeighbor;

/// Leave-one-out accuracy of 1-NN using only the columns in `subset`.
///
/// Each sample is held out in turn and classified by the label of its
/// nearest other sample (first one found on ties). The result is the
/// fraction of samples whose predicted label equals their own label, using
/// exact floating point comparison since labels are small integers stored
/// as `f64`.
///
/// Runs in `O(N^2 * |subset|)`; nothing is cached between calls.
///
/// # Errors
///
/// `SelectionError::InvalidFeatureIndex` if `subset` holds an index outside
/// `1..=data.n_features()`.
///
/// # Examples
///
/// ```rust
/// use knn_select::{loocv_accuracy, Dataset, FeatureSubset};
///
/// let data = Dataset::from_rows(vec![
///     vec![1.0, 1.0, 10.0],
///     vec![1.0, 1.1, 10.0],
///     vec![2.0, 5.0, 10.0],
///     vec![2.0, 5.1, 10.0],
/// ])
/// .unwrap();
/// let accuracy = loocv_accuracy(&data, &FeatureSubset::from_iter([1])).unwrap();
/// assert_eq!(accuracy, 1.0);
/// ```
pub fn loocv_accuracy(data: &Dataset, subset: &FeatureSubset) -> Result<f64, SelectionError> {
    data.check_subset(subset)?;
    Ok(loocv_accuracy_unchecked(data, subset))
}

/// Same as [`loocv_accuracy`] without index validation.
pub(crate) fn loocv_accuracy_unchecked(data: &Dataset, subset: &FeatureSubset) -> f64 {
    let classifier = NearestNeighbor::new_unchecked(data, subset);
    let n_samples = data.n_samples();

    let n_correct = (0..n_samples)
        .filter(|&i| {
            // a sample without any neighbor counts as misclassified
            classifier
                .predict(i)
                .map_or(false, |predicted| predicted == data.label(i))
        })
        .count();

    log::trace!(
        "LOOCV on {} -> {}/{} correct",
        subset,
        n_correct,
        n_samples
    );

    n_correct as f64 / n_samples as f64
}
